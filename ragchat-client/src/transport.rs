//! HTTP transport shared by every service
//!
//! One `reqwest::Client` is built from static configuration and shared
//! read-only. Every request and response is logged, and failures are mapped
//! into the three-way error taxonomy of [`RagchatError`].

use ragchat_core::{ApiConfig, ErrorContext, RagchatError, RagchatResult};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for the transport client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for the API, without the `/api` prefix
    pub base_url: String,
    /// Bearer token for authentication
    pub access_token: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Persist and send cookies
    pub with_credentials: bool,
    /// User agent string
    pub user_agent: String,
    /// Additional headers
    pub headers: HashMap<String, String>,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self::from(&ApiConfig::default())
    }
}

impl From<&ApiConfig> for ApiClientConfig {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.resolved_base_url().to_string(),
            access_token: config.access_token.clone(),
            timeout_seconds: config.timeout_seconds,
            with_credentials: config.with_credentials,
            user_agent: config.user_agent.clone(),
            headers: HashMap::new(),
        }
    }
}

impl ApiClientConfig {
    /// Configuration pointing at an explicit base URL with default settings
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set additional header
    pub fn with_header(mut self, key: String, value: String) -> Self {
        self.headers.insert(key, value);
        self
    }

    /// Set timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set bearer token
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }
}

/// Helper function to create HTTP client with common configuration
pub(crate) fn create_http_client(config: &ApiClientConfig) -> RagchatResult<reqwest::Client> {
    let mut headers = reqwest::header::HeaderMap::new();

    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_str(&config.user_agent)
            .map_err(|e| client_setup_error(format!("Invalid user agent: {}", e), e))?,
    );

    if let Some(token) = &config.access_token {
        let mut value = reqwest::header::HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| client_setup_error(format!("Invalid access token: {}", e), e))?;
        value.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, value);
    }

    for (key, value) in &config.headers {
        let header_name = reqwest::header::HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| client_setup_error(format!("Invalid header name '{}': {}", key, e), e))?;

        let header_value = reqwest::header::HeaderValue::from_str(value).map_err(|e| {
            client_setup_error(format!("Invalid header value for '{}': {}", key, e), e)
        })?;

        headers.insert(header_name, header_value);
    }

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .cookie_store(config.with_credentials)
        .default_headers(headers)
        .build()
        .map_err(|e| client_setup_error(format!("Failed to create HTTP client: {}", e), e))
}

fn client_setup_error<E>(message: String, source: E) -> RagchatError
where
    E: std::error::Error + Send + Sync + 'static,
{
    RagchatError::Config {
        message,
        source: Some(Box::new(source)),
        context: ErrorContext::new("http_client").with_operation("create_client"),
    }
}

/// Shared HTTP transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: ApiClientConfig,
}

impl HttpTransport {
    pub fn new(config: ApiClientConfig) -> RagchatResult<Self> {
        url::Url::parse(&config.base_url).map_err(|e| RagchatError::Config {
            message: format!("Invalid API base URL '{}': {}", config.base_url, e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("http_client")
                .with_operation("create_client")
                .with_suggestion("Set api.base_url or RAGCHAT_API_URL to an absolute URL"),
        })?;

        let client = create_http_client(&config)?;
        debug!(base_url = %config.base_url, "Created API transport");

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.url(path))
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::POST, path)
    }

    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.request(Method::DELETE, path)
    }

    /// Send a request and decode a JSON body
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        operation: &str,
    ) -> RagchatResult<T> {
        let response = self.execute(builder, operation).await?;
        let status = response.status().as_u16();

        response.json::<T>().await.map_err(|e| {
            let error = RagchatError::Internal {
                message: format!("Failed to decode response for {}: {}", operation, e),
                source: Some(Box::new(e)),
                context: ErrorContext::new("http_transport")
                    .with_operation(operation)
                    .with_metadata("status", &status.to_string()),
            };
            error.log();
            error
        })
    }

    /// Send a request, log both directions and reject non-success statuses
    pub async fn execute(
        &self,
        builder: RequestBuilder,
        operation: &str,
    ) -> RagchatResult<reqwest::Response> {
        let request = builder.build().map_err(|e| RagchatError::Internal {
            message: format!("Failed to build request for {}: {}", operation, e),
            source: Some(Box::new(e)),
            context: ErrorContext::new("http_transport").with_operation(operation),
        })?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(method = %method, url = %url, "API request");

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                let error = self.map_send_error(e, operation);
                error.log();
                return Err(error);
            }
        };

        debug!(status = response.status().as_u16(), url = %url, "API response");

        if !response.status().is_success() {
            let error = handle_response_error(response, operation).await;
            error.log();
            return Err(error);
        }

        Ok(response)
    }

    fn map_send_error(&self, error: reqwest::Error, operation: &str) -> RagchatError {
        if error.is_timeout() {
            return RagchatError::Timeout {
                operation: operation.to_string(),
                duration_ms: self.config.timeout_seconds * 1000,
                context: ErrorContext::new("http_transport")
                    .with_operation(operation)
                    .with_suggestion("The backend may be overloaded; try again"),
            };
        }

        RagchatError::Network {
            message: format!("Request to {} failed: {}", self.config.base_url, error),
            source: Some(Box::new(error)),
            context: ErrorContext::new("http_transport")
                .with_operation(operation)
                .with_suggestion("Check that the API server is running")
                .with_suggestion("Check network connectivity"),
        }
    }
}

/// FastAPI-style validation payload
#[derive(Debug, Deserialize)]
struct HttpValidationError {
    #[serde(default)]
    detail: Vec<ValidationIssue>,
}

#[derive(Debug, Deserialize)]
struct ValidationIssue {
    #[serde(default)]
    loc: Vec<serde_json::Value>,
    msg: String,
}

impl ValidationIssue {
    fn location(&self) -> String {
        self.loc
            .iter()
            .map(|part| match part {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(".")
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Map a non-success response to an error
pub(crate) async fn handle_response_error(
    response: reqwest::Response,
    operation: &str,
) -> RagchatError {
    let status = response.status();
    let url = response.url().clone();
    let body = response.text().await.unwrap_or_default();

    let context = ErrorContext::new("api_client")
        .with_operation(operation)
        .with_metadata("url", url.as_str());

    if status == reqwest::StatusCode::UNPROCESSABLE_ENTITY {
        if let Ok(validation) = serde_json::from_str::<HttpValidationError>(&body) {
            let details: Vec<String> = validation
                .detail
                .iter()
                .map(|issue| format!("{}: {}", issue.location(), issue.msg))
                .collect();
            let field = validation.detail.first().map(ValidationIssue::location);

            return RagchatError::Validation {
                message: format!("Request rejected with {} validation issue(s)", details.len()),
                field,
                details,
                context: context.with_suggestion("Check the request parameters"),
            };
        }
    }

    let detail = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .map(|b| b.detail);

    let message = match &detail {
        Some(serde_json::Value::String(s)) => s.clone(),
        _ if !body.is_empty() && detail.is_none() => body.clone(),
        _ => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    };

    if status.is_server_error() {
        warn!(status = status.as_u16(), url = %url, "Backend reported a server error");
    }

    RagchatError::Api {
        status: status.as_u16(),
        message,
        detail,
        context: context.with_suggestion(match status.as_u16() {
            401 => "Check your access token",
            403 => "Check your permissions",
            404 => "The resource does not exist on the server",
            _ => "Check network connectivity and API status",
        }),
    }
}
