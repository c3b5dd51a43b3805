//! RagChat Applications - Front-end state built on the typed client
//!
//! This crate holds the state objects behind every view of the RagChat
//! client. Each object owns its form values and last outcome, talks to the
//! backend only through the service traits of `ragchat-client`, and can be
//! driven by any presentation layer.
//!
//! - Conversation sessions: what gets sent on each user turn
//! - Document upload with chunking bounds and collection targeting
//! - Chain configuration (system prompt and temperature)
//! - Collection discovery shared between upload and chat
//! - Connection probing against the health endpoint
//!
//! ## Architecture
//!
//! This module follows a clear separation between:
//! - **Bindings** (ragchat-client): One typed call per backend endpoint
//! - **Applications** (this module): Per-view state and policies
//! - **Presentation** (ragchat-cli): Rendering and input

pub mod chain;
pub mod collections;
pub mod connection;
pub mod session;
pub mod status;
pub mod upload;

pub use chain::{ChainConfigPanel, ChainStatus, CHAIN_FAILURE_MESSAGE, CHAIN_SUCCESS_MESSAGE};
pub use collections::{normalize_collection_name, CollectionCatalog};
pub use connection::{ConnectionProbe, ProbeState};
pub use session::{
    ConversationSession, SendOptions, SessionStats, TurnOutcome, FAILED_RESPONSE_MESSAGE,
};
pub use status::{InFlight, InFlightGuard, OutcomeRecord};
pub use upload::{UploadCoordinator, UploadForm, UploadStatus};

use ragchat_core::RagchatError;

/// Application-level error type
#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error("Core error: {0}")]
    Core(#[from] RagchatError),

    #[error("A response is still pending for this conversation")]
    SessionBusy,

    #[error("{operation} is already in progress")]
    InProgress { operation: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;

impl ApplicationError {
    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an in-progress error
    pub fn in_progress<S: Into<String>>(operation: S) -> Self {
        Self::InProgress {
            operation: operation.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// The underlying client error, if any
    pub fn core(&self) -> Option<&RagchatError> {
        match self {
            Self::Core(error) => Some(error),
            _ => None,
        }
    }

    /// Single human-readable line for the presentation layer
    pub fn user_message(&self) -> String {
        match self {
            Self::Core(error) => error.user_message(),
            Self::SessionBusy => "A response is still pending. Please wait.".to_string(),
            Self::InProgress { operation } => {
                format!("{} is already in progress. Please wait.", operation)
            }
            Self::Validation { message } | Self::Config { message } => message.clone(),
        }
    }
}
