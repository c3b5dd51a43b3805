//! Chat and health endpoints

use crate::transport::HttpTransport;
use crate::types::{ChatFlags, ChatRequest, ChatResponse, HealthReport};
use async_trait::async_trait;
use ragchat_core::{ChatConfig, Message, RagchatResult};
use std::sync::Arc;
use tracing::{debug, info};

/// Per-call generation settings and flags
#[derive(Debug, Clone, PartialEq)]
pub struct ChatOptions {
    pub temperature: f32,
    pub max_tokens: u32,
    pub model: Option<String>,
    pub skip_memory: bool,
    /// Ground the answer in this collection; `None` disables RAG
    pub rag_collection: Option<String>,
    pub rag_num_results: u32,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self::from(&ChatConfig::default())
    }
}

impl From<&ChatConfig> for ChatOptions {
    fn from(config: &ChatConfig) -> Self {
        Self {
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            model: None,
            skip_memory: config.skip_memory,
            rag_collection: config.default_collection.clone(),
            rag_num_results: config.rag_num_results,
        }
    }
}

impl ChatOptions {
    pub fn flags(&self) -> ChatFlags {
        ChatFlags::for_collection(self.rag_collection.clone(), self.skip_memory)
            .with_num_results(self.rag_num_results)
    }
}

#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Send the given messages and return the model's reply
    async fn chat(&self, messages: Vec<Message>, options: ChatOptions)
        -> RagchatResult<ChatResponse>;

    /// Query the backend health endpoint
    async fn health(&self) -> RagchatResult<HealthReport>;
}

/// Chat service backed by the HTTP transport
#[derive(Debug, Clone)]
pub struct ChatService {
    transport: Arc<HttpTransport>,
}

impl ChatService {
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl ChatApi for ChatService {
    async fn chat(
        &self,
        messages: Vec<Message>,
        options: ChatOptions,
    ) -> RagchatResult<ChatResponse> {
        let flags = options.flags();
        debug!(
            messages = messages.len(),
            use_rag = flags.use_rag,
            skip_memory = flags.skip_memory,
            "Sending chat request"
        );

        let request = ChatRequest {
            messages,
            model: options.model,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        let builder = self.transport.post("/api/chat").query(&flags).json(&request);
        let response: ChatResponse = self.transport.send_json(builder, "chat").await?;

        info!(model = %response.model, "Received chat response");
        Ok(response)
    }

    async fn health(&self) -> RagchatResult<HealthReport> {
        let builder = self.transport.get("/api/health");
        self.transport.send_json(builder, "health_check").await
    }
}
