//! Document upload, retrieval and collection management

use crate::transport::HttpTransport;
use crate::types::{
    DocumentChunk, DocumentUploadRequest, FileUploadRequest, RagQueryRequest, RagQueryResponse,
    UploadReceipt, UploadReport,
};
use async_trait::async_trait;
use ragchat_core::{not_found_error, ErrorContext, RagchatError, RagchatResult};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

#[async_trait]
pub trait DocumentApi: Send + Sync {
    /// Upload raw text as a document
    async fn upload_text(&self, request: DocumentUploadRequest) -> RagchatResult<UploadReport>;

    /// Upload a file as a multipart form
    async fn upload_file(&self, request: FileUploadRequest) -> RagchatResult<UploadReport>;

    /// Known collections, sorted by name
    async fn list_collections(&self) -> RagchatResult<Vec<String>>;

    async fn delete_collection(&self, name: &str) -> RagchatResult<()>;

    /// Ask a question answered only from a collection
    async fn query(&self, request: RagQueryRequest) -> RagchatResult<RagQueryResponse>;

    /// Chunks of a collection most similar to `query`
    async fn retrieve(
        &self,
        collection: &str,
        query: &str,
        top_k: u32,
    ) -> RagchatResult<Vec<DocumentChunk>>;

    async fn list_documents(&self) -> RagchatResult<Vec<DocumentChunk>>;

    async fn get_document(&self, document_id: &str) -> RagchatResult<DocumentChunk>;

    async fn delete_document(&self, document_id: &str) -> RagchatResult<()>;
}

/// Document service backed by the HTTP transport
#[derive(Debug, Clone)]
pub struct DocumentService {
    transport: Arc<HttpTransport>,
}

impl DocumentService {
    pub fn new(transport: Arc<HttpTransport>) -> Self {
        Self { transport }
    }
}

impl FileUploadRequest {
    /// Read a file from disk into an upload request
    pub async fn from_path(
        path: &Path,
        collection_name: impl Into<String>,
        chunk_size: usize,
        chunk_overlap: usize,
    ) -> RagchatResult<Self> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| RagchatError::Validation {
                message: format!("'{}' is not a file", path.display()),
                field: Some("file".to_string()),
                details: Vec::new(),
                context: ErrorContext::new("document_service").with_operation("read_upload"),
            })?;

        let bytes = tokio::fs::read(path).await?;

        Ok(Self {
            file_name,
            bytes,
            collection_name: collection_name.into(),
            chunk_size,
            chunk_overlap,
        })
    }
}

fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

#[async_trait]
impl DocumentApi for DocumentService {
    async fn upload_text(&self, request: DocumentUploadRequest) -> RagchatResult<UploadReport> {
        let collection = request.collection_name.clone();
        let builder = self
            .transport
            .post("/api/rag/documents/upload")
            .json(&request);
        let receipt: UploadReceipt = self.transport.send_json(builder, "upload_document").await?;

        let report = UploadReport::from_receipt(receipt, &collection);
        info!(
            collection = %report.collection_name,
            chunks = report.document_count,
            "Uploaded document {}", request.document_name
        );
        Ok(report)
    }

    async fn upload_file(&self, request: FileUploadRequest) -> RagchatResult<UploadReport> {
        let FileUploadRequest {
            file_name,
            bytes,
            collection_name,
            chunk_size,
            chunk_overlap,
        } = request;

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.clone());
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("collection_name", collection_name.clone())
            .text("chunk_size", chunk_size.to_string())
            .text("chunk_overlap", chunk_overlap.to_string());

        let builder = self
            .transport
            .post("/api/rag/documents/upload-file")
            .multipart(form);
        let receipt: UploadReceipt = self.transport.send_json(builder, "upload_file").await?;

        let report = UploadReport::from_receipt(receipt, &collection_name);
        info!(
            collection = %report.collection_name,
            chunks = report.document_count,
            "Uploaded file {}", file_name
        );
        Ok(report)
    }

    async fn list_collections(&self) -> RagchatResult<Vec<String>> {
        let builder = self.transport.get("/api/rag/collections");
        let mut collections: Vec<String> =
            self.transport.send_json(builder, "list_collections").await?;
        collections.sort();
        collections.dedup();
        Ok(collections)
    }

    async fn delete_collection(&self, name: &str) -> RagchatResult<()> {
        let path = format!("/api/rag/collections/{}", encode_segment(name));
        let deleted: bool = self
            .transport
            .send_json(self.transport.delete(&path), "delete_collection")
            .await?;

        if !deleted {
            return Err(not_found_error!(
                format!("collection '{}'", name),
                "document_service"
            ));
        }

        info!(collection = %name, "Deleted collection");
        Ok(())
    }

    async fn query(&self, request: RagQueryRequest) -> RagchatResult<RagQueryResponse> {
        let builder = self.transport.post("/api/rag/query").json(&request);
        self.transport.send_json(builder, "rag_query").await
    }

    async fn retrieve(
        &self,
        collection: &str,
        query: &str,
        top_k: u32,
    ) -> RagchatResult<Vec<DocumentChunk>> {
        let path = format!(
            "/api/rag/collections/{}/documents",
            encode_segment(collection)
        );
        let top_k = top_k.to_string();
        let builder = self
            .transport
            .get(&path)
            .query(&[("query", query), ("top_k", top_k.as_str())]);
        self.transport.send_json(builder, "retrieve_documents").await
    }

    async fn list_documents(&self) -> RagchatResult<Vec<DocumentChunk>> {
        let builder = self.transport.get("/api/rag/documents");
        self.transport.send_json(builder, "list_documents").await
    }

    async fn get_document(&self, document_id: &str) -> RagchatResult<DocumentChunk> {
        let path = format!("/api/rag/documents/{}", encode_segment(document_id));
        self.transport
            .send_json(self.transport.get(&path), "get_document")
            .await
    }

    async fn delete_document(&self, document_id: &str) -> RagchatResult<()> {
        let path = format!("/api/rag/documents/{}", encode_segment(document_id));
        let deleted: bool = self
            .transport
            .send_json(self.transport.delete(&path), "delete_document")
            .await?;

        if !deleted {
            return Err(not_found_error!(
                format!("document '{}'", document_id),
                "document_service"
            ));
        }
        Ok(())
    }
}
