//! Unified error handling system
//!
//! Every failure that crosses the backend boundary lands in one of three
//! buckets: transport (`Network`, `Timeout`), backend validation
//! (`Validation`) or backend application errors (`Api`). The remaining
//! variants cover local failures such as configuration and IO.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

pub type RagchatResult<T> = Result<T, RagchatError>;

/// Error context providing additional information for debugging and recovery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Unique error ID for tracking
    pub error_id: String,
    /// Timestamp when error occurred
    pub timestamp: DateTime<Utc>,
    /// Component where error originated
    pub component: String,
    /// Operation being performed when error occurred
    pub operation: Option<String>,
    /// Additional metadata
    pub metadata: std::collections::HashMap<String, String>,
    /// Recovery suggestions
    pub recovery_suggestions: Vec<String>,
}

impl ErrorContext {
    pub fn new(component: &str) -> Self {
        Self {
            error_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            component: component.to_string(),
            operation: None,
            metadata: std::collections::HashMap::new(),
            recovery_suggestions: Vec::new(),
        }
    }

    pub fn with_operation(mut self, operation: &str) -> Self {
        self.operation = Some(operation.to_string());
        self
    }

    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.recovery_suggestions.push(suggestion.to_string());
        self
    }
}

/// Broad classification used by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Timeout, connection refused, DNS failure
    Transport,
    /// Structured field-level rejection from the backend
    Validation,
    /// Any other non-success response from the backend
    Application,
    /// Failure that never reached the network
    Local,
}

/// Main error type for the RagChat client
#[derive(Error, Debug)]
pub enum RagchatError {
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("Operation timeout: {operation}")]
    Timeout {
        operation: String,
        duration_ms: u64,
        context: ErrorContext,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
        /// Per-field messages as reported by the backend (`loc: msg`)
        details: Vec<String>,
        context: ErrorContext,
    },

    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        /// Raw `detail` payload when the body carried one
        detail: Option<serde_json::Value>,
        context: ErrorContext,
    },

    #[error("Resource not found: {resource}")]
    NotFound {
        resource: String,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },
}

impl RagchatError {
    /// Get the error context
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            RagchatError::Network { context, .. } => Some(context),
            RagchatError::Timeout { context, .. } => Some(context),
            RagchatError::Validation { context, .. } => Some(context),
            RagchatError::Api { context, .. } => Some(context),
            RagchatError::NotFound { context, .. } => Some(context),
            RagchatError::Config { context, .. } => Some(context),
            RagchatError::Internal { context, .. } => Some(context),
            RagchatError::Io(_) | RagchatError::Serialization(_) => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RagchatError::Network { .. } | RagchatError::Timeout { .. } => ErrorKind::Transport,
            RagchatError::Validation { .. } => ErrorKind::Validation,
            RagchatError::Api { .. } | RagchatError::NotFound { .. } => ErrorKind::Application,
            _ => ErrorKind::Local,
        }
    }

    /// HTTP status reported by the backend, if the request got that far
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RagchatError::Api { status, .. } => Some(*status),
            RagchatError::Validation { .. } => Some(422),
            RagchatError::NotFound { .. } => Some(404),
            _ => None,
        }
    }

    /// Whether resubmitting the same request may succeed.
    ///
    /// Nothing retries automatically; this only drives the wording shown to the user.
    pub fn is_recoverable(&self) -> bool {
        match self {
            RagchatError::Network { .. } => true,
            RagchatError::Timeout { .. } => true,
            RagchatError::Api { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Single human-readable line suitable for display.
    ///
    /// Structured validation details are deliberately left out.
    pub fn user_message(&self) -> String {
        match self {
            RagchatError::Network { .. } => {
                "Could not reach the server. Check that the API is running and try again."
                    .to_string()
            }
            RagchatError::Timeout { .. } => {
                "The server took too long to respond. Please try again.".to_string()
            }
            RagchatError::Validation { .. } => {
                "The server rejected the request as invalid.".to_string()
            }
            RagchatError::Api { message, .. } => message.clone(),
            RagchatError::NotFound { resource, .. } => format!("Not found: {}", resource),
            RagchatError::Config { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            RagchatError::Internal { .. } => {
                error!(
                    error_id = ?self.context().map(|c| &c.error_id),
                    error = %self,
                    "Internal error occurred"
                );
            }
            RagchatError::Config { .. } | RagchatError::Validation { .. } => {
                error!(
                    error_id = ?self.context().map(|c| &c.error_id),
                    error = %self,
                    "Configuration or validation error"
                );
            }
            RagchatError::Network { .. } | RagchatError::Timeout { .. } => {
                warn!(
                    error_id = ?self.context().map(|c| &c.error_id),
                    error = %self,
                    "Network or timeout error (may be recoverable)"
                );
            }
            _ => {
                error!(
                    error_id = ?self.context().map(|c| &c.error_id),
                    error = %self,
                    "Error occurred"
                );
            }
        }
    }
}

/// Convenience macros for creating errors with context
#[macro_export]
macro_rules! network_error {
    ($msg:expr, $component:expr) => {
        $crate::RagchatError::Network {
            message: $msg.to_string(),
            source: None,
            context: $crate::ErrorContext::new($component),
        }
    };
    ($msg:expr, $component:expr, $source:expr) => {
        $crate::RagchatError::Network {
            message: $msg.to_string(),
            source: Some(Box::new($source)),
            context: $crate::ErrorContext::new($component),
        }
    };
}

#[macro_export]
macro_rules! config_error {
    ($msg:expr, $component:expr) => {
        $crate::RagchatError::Config {
            message: $msg.to_string(),
            source: None,
            context: $crate::ErrorContext::new($component)
                .with_suggestion("Check your configuration file")
                .with_suggestion("Run 'ragchat config --init' to create default config"),
        }
    };
}

#[macro_export]
macro_rules! validation_error {
    ($msg:expr, $field:expr, $component:expr) => {
        $crate::RagchatError::Validation {
            message: $msg.to_string(),
            field: Some($field.to_string()),
            details: Vec::new(),
            context: $crate::ErrorContext::new($component)
                .with_suggestion("Check the field value and format"),
        }
    };
}

#[macro_export]
macro_rules! not_found_error {
    ($resource:expr, $component:expr) => {
        $crate::RagchatError::NotFound {
            resource: $resource.to_string(),
            context: $crate::ErrorContext::new($component)
                .with_suggestion("Verify the resource name"),
        }
    };
}
