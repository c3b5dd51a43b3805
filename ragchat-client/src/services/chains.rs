//! Generation chain configuration

use crate::transport::HttpTransport;
use crate::types::{ChainConfiguration, ChainConfigurationResponse};
use async_trait::async_trait;
use ragchat_core::RagchatResult;
use std::sync::Arc;
use tracing::info;

#[async_trait]
pub trait ChainApi: Send + Sync {
    async fn configure(
        &self,
        configuration: ChainConfiguration,
    ) -> RagchatResult<ChainConfigurationResponse>;
}

#[derive(Debug, Clone)]
pub struct ChainService {
    transport: Arc<HttpTransport>,
}

impl ChainService {
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl ChainApi for ChainService {
    async fn configure(
        &self,
        configuration: ChainConfiguration,
    ) -> RagchatResult<ChainConfigurationResponse> {
        let builder = self
            .transport
            .post("/api/chains/configure")
            .json(&configuration);
        let response: ChainConfigurationResponse =
            self.transport.send_json(builder, "configure_chain").await?;

        info!(chain = %response.name, "Chain configuration updated");
        Ok(response)
    }
}
