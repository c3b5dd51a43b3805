//! Hand-written service mocks shared by the application tests

#![allow(dead_code)]

use async_trait::async_trait;
use ragchat_client::{
    ChainApi, ChainConfiguration, ChainConfigurationResponse, ChatApi, ChatOptions, ChatResponse,
    DocumentApi, DocumentChunk, DocumentUploadRequest, FileUploadRequest, HealthReport,
    RagQueryRequest, RagQueryResponse, UploadReport,
};
use ragchat_core::{ErrorContext, Message, RagchatError, RagchatResult};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub fn api_error(status: u16, detail: Option<serde_json::Value>) -> RagchatError {
    let message = match &detail {
        Some(serde_json::Value::String(s)) => s.clone(),
        _ => "Internal Server Error".to_string(),
    };
    RagchatError::Api {
        status,
        message,
        detail,
        context: ErrorContext::new("mock"),
    }
}

pub fn network_error() -> RagchatError {
    RagchatError::Network {
        message: "connection refused".to_string(),
        source: None,
        context: ErrorContext::new("mock"),
    }
}

/// Scripted reply of the mock chat service
#[derive(Debug, Clone)]
pub enum Reply {
    Text(&'static str),
    ServerError,
}

/// Chat service that records every call
#[derive(Default)]
pub struct MockChat {
    pub calls: Mutex<Vec<(Vec<Message>, ChatOptions)>>,
    script: Mutex<VecDeque<Reply>>,
    /// When set, each chat call waits for a notification before answering
    gate: Option<Arc<Notify>>,
    health: Mutex<Option<RagchatResult<HealthReport>>>,
}

impl MockChat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scripted(replies: Vec<Reply>) -> Self {
        Self {
            script: Mutex::new(replies.into()),
            ..Self::default()
        }
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn with_health(health: RagchatResult<HealthReport>) -> Self {
        Self {
            health: Mutex::new(Some(health)),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn transmitted(&self, index: usize) -> Vec<Message> {
        self.calls.lock().unwrap()[index].0.clone()
    }

    pub fn options(&self, index: usize) -> ChatOptions {
        self.calls.lock().unwrap()[index].1.clone()
    }
}

#[async_trait]
impl ChatApi for MockChat {
    async fn chat(
        &self,
        messages: Vec<Message>,
        options: ChatOptions,
    ) -> RagchatResult<ChatResponse> {
        self.calls.lock().unwrap().push((messages, options));

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let reply = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Reply::Text("Hi!"));

        match reply {
            Reply::Text(text) => Ok(ChatResponse {
                response: text.to_string(),
                model: "mock-model".to_string(),
                usage: None,
            }),
            Reply::ServerError => Err(api_error(500, None)),
        }
    }

    async fn health(&self) -> RagchatResult<HealthReport> {
        match self.health.lock().unwrap().take() {
            Some(result) => result,
            None => Err(network_error()),
        }
    }
}

pub fn healthy_report() -> HealthReport {
    HealthReport {
        status: "healthy".to_string(),
        version: Some("1.0.0".to_string()),
        timestamp: Some(1.0),
        uptime: Some(10.0),
        environment: Some("development".to_string()),
        system_info: HashMap::new(),
        services: HashMap::from([("model_service".to_string(), "OK".to_string())]),
    }
}

/// Document service backed by an in-memory collection list
#[derive(Default)]
pub struct MockDocuments {
    pub collections: Mutex<Vec<String>>,
    pub file_uploads: Mutex<Vec<FileUploadRequest>>,
    pub text_uploads: Mutex<Vec<DocumentUploadRequest>>,
    pub fail_listing: AtomicBool,
    pub fail_uploads: AtomicBool,
}

impl MockDocuments {
    pub fn with_collections(names: &[&str]) -> Self {
        Self {
            collections: Mutex::new(names.iter().map(|name| name.to_string()).collect()),
            ..Self::default()
        }
    }

    pub fn set_fail_listing(&self, fail: bool) {
        self.fail_listing.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_uploads(&self, fail: bool) {
        self.fail_uploads.store(fail, Ordering::SeqCst);
    }

    fn store(&self, collection: &str) -> UploadReport {
        let mut collections = self.collections.lock().unwrap();
        if !collections.iter().any(|known| known == collection) {
            collections.push(collection.to_string());
        }
        UploadReport {
            collection_name: collection.to_string(),
            document_count: 2,
            document_ids: vec!["chunk-1".to_string(), "chunk-2".to_string()],
        }
    }
}

#[async_trait]
impl DocumentApi for MockDocuments {
    async fn upload_text(&self, request: DocumentUploadRequest) -> RagchatResult<UploadReport> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(api_error(500, Some(serde_json::json!("Embedding failed"))));
        }
        let report = self.store(&request.collection_name);
        self.text_uploads.lock().unwrap().push(request);
        Ok(report)
    }

    async fn upload_file(&self, request: FileUploadRequest) -> RagchatResult<UploadReport> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(api_error(500, Some(serde_json::json!("Embedding failed"))));
        }
        let report = self.store(&request.collection_name);
        self.file_uploads.lock().unwrap().push(request);
        Ok(report)
    }

    async fn list_collections(&self) -> RagchatResult<Vec<String>> {
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(network_error());
        }
        // unsorted on purpose; sorting is the caller's job
        Ok(self.collections.lock().unwrap().iter().rev().cloned().collect())
    }

    async fn delete_collection(&self, name: &str) -> RagchatResult<()> {
        let mut collections = self.collections.lock().unwrap();
        let before = collections.len();
        collections.retain(|known| known != name);
        if collections.len() == before {
            return Err(RagchatError::NotFound {
                resource: format!("collection '{}'", name),
                context: ErrorContext::new("mock"),
            });
        }
        Ok(())
    }

    async fn query(&self, request: RagQueryRequest) -> RagchatResult<RagQueryResponse> {
        Ok(RagQueryResponse {
            answer: format!("answer to {}", request.query),
            sources: Vec::new(),
            model: "mock-model".to_string(),
            embedding_model: None,
            usage: HashMap::new(),
        })
    }

    async fn retrieve(
        &self,
        _collection: &str,
        _query: &str,
        _top_k: u32,
    ) -> RagchatResult<Vec<DocumentChunk>> {
        Ok(Vec::new())
    }

    async fn list_documents(&self) -> RagchatResult<Vec<DocumentChunk>> {
        Ok(Vec::new())
    }

    async fn get_document(&self, document_id: &str) -> RagchatResult<DocumentChunk> {
        Err(RagchatError::NotFound {
            resource: document_id.to_string(),
            context: ErrorContext::new("mock"),
        })
    }

    async fn delete_document(&self, _document_id: &str) -> RagchatResult<()> {
        Ok(())
    }
}

/// Chain service that records every configuration
#[derive(Default)]
pub struct MockChains {
    pub received: Mutex<Vec<ChainConfiguration>>,
    /// Error `detail` to fail with; `Some(None)` fails without a detail
    pub failure: Mutex<Option<Option<serde_json::Value>>>,
}

impl MockChains {
    pub fn failing(detail: Option<serde_json::Value>) -> Self {
        Self {
            failure: Mutex::new(Some(detail)),
            ..Self::default()
        }
    }
}

#[async_trait]
impl ChainApi for MockChains {
    async fn configure(
        &self,
        configuration: ChainConfiguration,
    ) -> RagchatResult<ChainConfigurationResponse> {
        self.received.lock().unwrap().push(configuration.clone());

        if let Some(detail) = self.failure.lock().unwrap().clone() {
            return Err(api_error(400, detail));
        }

        Ok(ChainConfigurationResponse {
            name: configuration.name,
            system_message: Some(configuration.system_message),
            parameters: HashMap::from([(
                "temperature".to_string(),
                serde_json::json!(configuration.parameters.temperature),
            )]),
        })
    }
}
