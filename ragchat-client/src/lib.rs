//! RagChat Client - Typed bindings for the chat and RAG backend
//!
//! ```text
//! RagchatClient ─┬─ ChatService      POST /api/chat, GET /api/health
//!                ├─ DocumentService  /api/rag/...
//!                ├─ ChainService     POST /api/chains/configure
//!                └─ ModelService     GET /api/models/
//!                        │
//!                  HttpTransport (shared reqwest::Client)
//! ```

pub mod services;
pub mod transport;
pub mod types;

pub use services::*;
pub use transport::{ApiClientConfig, HttpTransport};
pub use types::*;

use ragchat_core::{ApiConfig, RagchatResult};
use std::sync::Arc;

/// Entry point bundling every service over one shared transport
#[derive(Debug, Clone)]
pub struct RagchatClient {
    transport: Arc<HttpTransport>,
}

impl RagchatClient {
    pub fn new(config: ApiClientConfig) -> RagchatResult<Self> {
        Ok(Self {
            transport: Arc::new(HttpTransport::new(config)?),
        })
    }

    pub fn from_api_config(config: &ApiConfig) -> RagchatResult<Self> {
        Self::new(ApiClientConfig::from(config))
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    pub fn chat(&self) -> ChatService {
        ChatService::new(Arc::clone(&self.transport))
    }

    pub fn documents(&self) -> DocumentService {
        DocumentService::new(Arc::clone(&self.transport))
    }

    pub fn chains(&self) -> ChainService {
        ChainService::new(Arc::clone(&self.transport))
    }

    pub fn models(&self) -> ModelService {
        ModelService::new(Arc::clone(&self.transport))
    }
}
