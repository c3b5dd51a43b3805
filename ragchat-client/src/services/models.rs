//! Model listing

use crate::transport::HttpTransport;
use crate::types::ModelInfo;
use async_trait::async_trait;
use ragchat_core::RagchatResult;
use std::sync::Arc;

#[async_trait]
pub trait ModelApi: Send + Sync {
    async fn list_models(&self) -> RagchatResult<Vec<ModelInfo>>;
}

#[derive(Debug, Clone)]
pub struct ModelService {
    transport: Arc<HttpTransport>,
}

impl ModelService {
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl ModelApi for ModelService {
    async fn list_models(&self) -> RagchatResult<Vec<ModelInfo>> {
        // The trailing slash is part of the route on the backend
        let builder = self.transport.get("/api/models/");
        self.transport.send_json(builder, "list_models").await
    }
}
