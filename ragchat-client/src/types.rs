//! Request and response shapes of the backend API

use ragchat_core::Message;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Body of `POST /api/chat`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Query flags of `POST /api/chat`
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ChatFlags {
    pub skip_memory: bool,
    pub use_rag: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rag_collection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rag_num_results: Option<u32>,
}

impl ChatFlags {
    /// Derive the RAG flags from an optional collection
    pub fn for_collection(rag_collection: Option<String>, skip_memory: bool) -> Self {
        Self {
            skip_memory,
            use_rag: rag_collection.is_some(),
            rag_collection,
            rag_num_results: None,
        }
    }

    pub fn with_num_results(mut self, num_results: u32) -> Self {
        if self.use_rag {
            self.rag_num_results = Some(num_results);
        }
        self
    }
}

/// Response of `POST /api/chat`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    pub response: String,
    pub model: String,
    #[serde(default)]
    pub usage: Option<HashMap<String, serde_json::Value>>,
}

/// Response of `GET /api/health`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthReport {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub timestamp: Option<f64>,
    #[serde(default)]
    pub uptime: Option<f64>,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub system_info: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub services: HashMap<String, String>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }

    /// Services whose status is not "OK", sorted by name
    pub fn unhealthy_services(&self) -> Vec<(&str, &str)> {
        let mut services: Vec<(&str, &str)> = self
            .services
            .iter()
            .filter(|(_, status)| !status.eq_ignore_ascii_case("ok"))
            .map(|(name, status)| (name.as_str(), status.as_str()))
            .collect();
        services.sort();
        services
    }
}

/// Optional metadata attached to an uploaded document
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DocumentMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Body of `POST /api/rag/documents/upload`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentUploadRequest {
    pub document_name: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DocumentMetadata>,
    pub collection_name: String,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

/// Multipart fields of `POST /api/rag/documents/upload-file`
#[derive(Debug, Clone, PartialEq)]
pub struct FileUploadRequest {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub collection_name: String,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

/// The upload endpoints answer with either chunk ids or a summary
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum UploadReceipt {
    ChunkIds(Vec<String>),
    Summary {
        collection_name: String,
        document_count: usize,
    },
}

/// Normalized result of an upload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadReport {
    pub collection_name: String,
    pub document_count: usize,
    #[serde(default)]
    pub document_ids: Vec<String>,
}

impl UploadReport {
    pub fn from_receipt(receipt: UploadReceipt, requested_collection: &str) -> Self {
        match receipt {
            UploadReceipt::ChunkIds(ids) => Self {
                collection_name: requested_collection.to_string(),
                document_count: ids.len(),
                document_ids: ids,
            },
            UploadReceipt::Summary {
                collection_name,
                document_count,
            } => Self {
                collection_name,
                document_count,
                document_ids: Vec::new(),
            },
        }
    }
}

/// Body of `POST /api/chains/configure`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChainConfiguration {
    pub system_message: String,
    pub parameters: ChainParameters,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChainParameters {
    pub temperature: f32,
}

/// Response of `POST /api/chains/configure`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChainConfigurationResponse {
    pub name: String,
    #[serde(default)]
    pub system_message: Option<String>,
    #[serde(default)]
    pub parameters: HashMap<String, serde_json::Value>,
}

/// Entry of `GET /api/models/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    /// Bytes, or a free-form string when the backend does not know
    #[serde(default)]
    pub size: serde_json::Value,
    #[serde(default)]
    pub modified_at: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `POST /api/rag/query`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagQueryRequest {
    pub query: String,
    pub collection_name: String,
    pub num_results: u32,
}

/// A stored chunk of a document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentChunk {
    pub content: String,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub chunk_id: Option<String>,
}

/// Response of `POST /api/rag/query`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RagQueryResponse {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<DocumentChunk>,
    pub model: String,
    #[serde(default)]
    pub embedding_model: Option<String>,
    #[serde(default)]
    pub usage: HashMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_flags_without_collection() {
        let flags = ChatFlags::for_collection(None, true).with_num_results(3);
        let encoded = serde_json::to_value(&flags).unwrap();
        assert_eq!(
            encoded,
            serde_json::json!({"skip_memory": true, "use_rag": false})
        );
    }

    #[test]
    fn test_chat_flags_with_collection() {
        let flags = ChatFlags::for_collection(Some("papers".to_string()), false).with_num_results(5);
        assert!(flags.use_rag);
        assert_eq!(flags.rag_collection.as_deref(), Some("papers"));
        assert_eq!(flags.rag_num_results, Some(5));
    }

    #[test]
    fn test_upload_receipt_shapes() {
        let ids: UploadReceipt = serde_json::from_str(r#"["a","b","c"]"#).unwrap();
        let report = UploadReport::from_receipt(ids, "default");
        assert_eq!(report.collection_name, "default");
        assert_eq!(report.document_count, 3);

        let summary: UploadReceipt =
            serde_json::from_str(r#"{"collection_name":"papers","document_count":7}"#).unwrap();
        let report = UploadReport::from_receipt(summary, "ignored");
        assert_eq!(report.collection_name, "papers");
        assert_eq!(report.document_count, 7);
        assert!(report.document_ids.is_empty());
    }

    #[test]
    fn test_health_report_unhealthy_services() {
        let report: HealthReport = serde_json::from_value(serde_json::json!({
            "status": "degraded",
            "version": "0.1.0",
            "timestamp": 1.0,
            "uptime": 2.0,
            "environment": "development",
            "system_info": {},
            "services": {"model_service": "ERROR: down", "vector_store": "OK"}
        }))
        .unwrap();

        assert!(!report.is_healthy());
        assert_eq!(report.unhealthy_services(), vec![("model_service", "ERROR: down")]);
    }

    #[test]
    fn test_chat_response_without_usage() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"response":"Hi!","model":"ollama:llama2"}"#).unwrap();
        assert_eq!(response.response, "Hi!");
        assert!(response.usage.is_none());
    }
}
