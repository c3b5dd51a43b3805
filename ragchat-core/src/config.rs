//! Configuration management
//!
//! All settings are static for the lifetime of the process: they are read
//! once at startup (file, then environment) and shared read-only afterwards.

use crate::error::{ErrorContext, RagchatError, RagchatResult};
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const MIN_CHUNK_SIZE: usize = 100;
pub const MAX_CHUNK_SIZE: usize = 10_000;
/// Overlap must stay at least this far below the chunk size
pub const CHUNK_OVERLAP_MARGIN: usize = 50;
pub const CUSTOMIZABLE_CHAIN: &str = "customizable";
pub const DEFAULT_COLLECTION: &str = "default";

pub const ENV_ENVIRONMENT: &str = "RAGCHAT_ENV";
pub const ENV_API_URL: &str = "RAGCHAT_API_URL";
pub const ENV_API_TOKEN: &str = "RAGCHAT_API_TOKEN";

/// Deployment environment, selects the default backend URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl std::str::FromStr for Environment {
    type Err = RagchatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(RagchatError::Config {
                message: format!("Unknown environment: {}", other),
                source: None,
                context: ErrorContext::new("config")
                    .with_operation("parse_environment")
                    .with_suggestion("Use 'development' or 'production'"),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub environment: Environment,
    /// Explicit base URL; wins over the per-environment URLs
    pub base_url: Option<String>,
    pub development_url: String,
    pub production_url: String,
    pub timeout_seconds: u64,
    /// Keep and send cookies, like a browser client with credentials enabled
    pub with_credentials: bool,
    pub access_token: Option<String>,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            base_url: None,
            development_url: "http://localhost:8000".to_string(),
            production_url: "https://api.ragchat.example.com".to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            with_credentials: true,
            access_token: None,
            user_agent: format!("ragchat/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ApiConfig {
    /// Base URL the transport should talk to
    pub fn resolved_base_url(&self) -> &str {
        if let Some(url) = &self.base_url {
            return url;
        }
        match self.environment {
            Environment::Development => &self.development_url,
            Environment::Production => &self.production_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub temperature: f32,
    pub max_tokens: u32,
    pub rag_num_results: u32,
    /// Collection to ground answers in when the user has not picked one
    pub default_collection: Option<String>,
    pub skip_memory: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 1000,
            rag_num_results: 3,
            default_collection: None,
            skip_memory: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub collection: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            chunk_overlap: 200,
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    pub name: String,
    pub temperature: f32,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            name: CUSTOMIZABLE_CHAIN.to_string(),
            temperature: 0.7,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RagchatConfig {
    pub api: ApiConfig,
    pub chat: ChatConfig,
    pub upload: UploadConfig,
    pub chain: ChainConfig,
    pub logging: LoggingConfig,
}

impl RagchatConfig {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> RagchatResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RagchatError::Config {
            message: format!("Failed to read config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("read_file")
                .with_suggestion("Check if the config file exists and is readable"),
        })?;

        let config: RagchatConfig = toml::from_str(&content).map_err(|e| RagchatError::Config {
            message: format!("Failed to parse config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("parse_toml")
                .with_suggestion("Check TOML syntax in config file"),
        })?;

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> RagchatResult<()> {
        let content = self.to_toml()?;

        std::fs::write(path, content).map_err(|e| RagchatError::Config {
            message: format!("Failed to write config file: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("write_file")
                .with_suggestion("Check if the directory exists and is writable"),
        })?;

        Ok(())
    }

    pub fn to_toml(&self) -> RagchatResult<String> {
        toml::to_string_pretty(self).map_err(|e| RagchatError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config").with_operation("serialize_toml"),
        })
    }

    /// Apply `RAGCHAT_*` environment variables on top of the loaded values
    pub fn apply_env_overrides(&mut self) -> RagchatResult<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Same as [`Self::apply_env_overrides`] with an injectable lookup
    pub fn apply_overrides<F>(&mut self, lookup: F) -> RagchatResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(env) = lookup(ENV_ENVIRONMENT) {
            self.api.environment = env.parse()?;
        }
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = Some(url);
        }
        if let Some(token) = lookup(ENV_API_TOKEN).filter(|v| !v.trim().is_empty()) {
            self.api.access_token = Some(token);
        }
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> RagchatResult<()> {
        let base_url = self.api.resolved_base_url();
        let parsed = url::Url::parse(base_url).map_err(|e| RagchatError::Config {
            message: format!("Invalid API base URL '{}': {}", base_url, e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("config")
                .with_operation("validate")
                .with_suggestion("Set api.base_url to an absolute http(s) URL"),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid("API base URL must use http or https", "api.base_url"));
        }

        if self.api.timeout_seconds == 0 {
            return Err(invalid(
                "API timeout_seconds must be greater than 0",
                "api.timeout_seconds",
            ));
        }

        if !(0.0..=1.0).contains(&self.chat.temperature) {
            return Err(invalid(
                "chat.temperature must be between 0.0 and 1.0",
                "chat.temperature",
            ));
        }

        if self.chat.max_tokens == 0 {
            return Err(invalid(
                "chat.max_tokens must be greater than 0",
                "chat.max_tokens",
            ));
        }

        if !(MIN_CHUNK_SIZE..=MAX_CHUNK_SIZE).contains(&self.upload.chunk_size) {
            return Err(invalid(
                &format!(
                    "upload.chunk_size must be between {} and {}",
                    MIN_CHUNK_SIZE, MAX_CHUNK_SIZE
                ),
                "upload.chunk_size",
            ));
        }

        if self.upload.chunk_overlap > self.upload.chunk_size - CHUNK_OVERLAP_MARGIN {
            return Err(invalid(
                &format!(
                    "upload.chunk_overlap must be at most chunk_size - {}",
                    CHUNK_OVERLAP_MARGIN
                ),
                "upload.chunk_overlap",
            ));
        }

        if !(0.0..=1.0).contains(&self.chain.temperature) {
            return Err(invalid(
                "chain.temperature must be between 0.0 and 1.0",
                "chain.temperature",
            ));
        }

        Ok(())
    }
}

fn invalid(message: &str, key: &str) -> RagchatError {
    RagchatError::Config {
        message: message.to_string(),
        source: None,
        context: ErrorContext::new("config")
            .with_operation("validate")
            .with_metadata("key", key)
            .with_suggestion(&format!("Fix '{}' in your configuration file", key)),
    }
}

/// Locations searched when no explicit config file is given, in priority order
pub fn default_config_paths() -> Vec<PathBuf> {
    [
        dirs::config_dir().map(|d| d.join("ragchat").join("config.toml")),
        dirs::home_dir().map(|d| d.join(".ragchat").join("config.toml")),
        Some(PathBuf::from("ragchat.toml")),
    ]
    .into_iter()
    .flatten()
    .collect()
}
