//! Document upload coordinator
//!
//! Holds the upload form, enforces the chunking bounds and performs the
//! upload. Only a successful upload mutates the form; a failure is recorded
//! in the status slot so the same file can be retried as-is.

use crate::collections::{normalize_collection_name, CollectionCatalog};
use crate::status::{InFlight, OutcomeRecord};
use crate::{ApplicationError, ApplicationResult};
use ragchat_client::{
    DocumentApi, DocumentMetadata, DocumentUploadRequest, FileUploadRequest, UploadReport,
};
use ragchat_core::{UploadConfig, CHUNK_OVERLAP_MARGIN, MAX_CHUNK_SIZE, MIN_CHUNK_SIZE};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{info, warn};

pub type UploadStatus = OutcomeRecord<UploadReport>;

/// Current values of the upload form.
///
/// `chunk_overlap` stays within `0..=chunk_size - 50`, so it is always
/// smaller than `chunk_size`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadForm {
    file: Option<PathBuf>,
    selected_collection: String,
    new_collection_name: String,
    is_creating_new: bool,
    chunk_size: usize,
    chunk_overlap: usize,
}

impl Default for UploadForm {
    fn default() -> Self {
        Self::from_config(&UploadConfig::default())
    }
}

impl UploadForm {
    pub fn from_config(config: &UploadConfig) -> Self {
        let mut form = Self {
            file: None,
            selected_collection: config.collection.clone(),
            new_collection_name: String::new(),
            is_creating_new: false,
            chunk_size: MIN_CHUNK_SIZE,
            chunk_overlap: 0,
        };
        form.set_chunk_size(config.chunk_size);
        form.set_chunk_overlap(config.chunk_overlap);
        form
    }

    pub fn file(&self) -> Option<&PathBuf> {
        self.file.as_ref()
    }

    pub fn selected_collection(&self) -> &str {
        &self.selected_collection
    }

    pub fn new_collection_name(&self) -> &str {
        &self.new_collection_name
    }

    pub fn is_creating_new(&self) -> bool {
        self.is_creating_new
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Largest overlap allowed for the current chunk size
    pub fn max_overlap(&self) -> usize {
        self.chunk_size.saturating_sub(CHUNK_OVERLAP_MARGIN)
    }

    pub fn set_file(&mut self, file: Option<PathBuf>) {
        self.file = file;
    }

    /// Clamp into the allowed range and re-clamp the overlap; returns the applied size
    pub fn set_chunk_size(&mut self, chunk_size: usize) -> usize {
        self.chunk_size = chunk_size.clamp(MIN_CHUNK_SIZE, MAX_CHUNK_SIZE);
        self.chunk_overlap = self.chunk_overlap.min(self.max_overlap());
        self.chunk_size
    }

    /// Cap at `chunk_size - 50`; returns the applied overlap
    pub fn set_chunk_overlap(&mut self, chunk_overlap: usize) -> usize {
        self.chunk_overlap = chunk_overlap.min(self.max_overlap());
        self.chunk_overlap
    }

    pub fn select_collection(&mut self, name: impl Into<String>) {
        self.selected_collection = name.into();
        self.is_creating_new = false;
    }

    pub fn start_new_collection(&mut self) {
        self.is_creating_new = true;
    }

    pub fn set_new_collection_name(&mut self, name: impl Into<String>) {
        self.new_collection_name = name.into();
    }

    pub fn cancel_new_collection(&mut self) {
        self.is_creating_new = false;
        self.new_collection_name.clear();
    }

    /// Collection the next upload goes to
    pub fn target_collection(&self) -> ApplicationResult<String> {
        if self.is_creating_new {
            normalize_collection_name(&self.new_collection_name)
        } else {
            normalize_collection_name(&self.selected_collection)
        }
    }
}

/// Upload form state plus the upload operation
pub struct UploadCoordinator {
    documents: Arc<dyn DocumentApi>,
    catalog: CollectionCatalog,
    form: Mutex<UploadForm>,
    status: Mutex<Option<UploadStatus>>,
    uploading: InFlight,
}

impl UploadCoordinator {
    pub fn new(
        documents: Arc<dyn DocumentApi>,
        catalog: CollectionCatalog,
        config: &UploadConfig,
    ) -> Self {
        Self {
            documents,
            catalog,
            form: Mutex::new(UploadForm::from_config(config)),
            status: Mutex::new(None),
            uploading: InFlight::new(),
        }
    }

    fn form_mut(&self) -> MutexGuard<'_, UploadForm> {
        self.form
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, status: UploadStatus) {
        *self
            .status
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(status);
    }

    /// Snapshot of the form
    pub fn form(&self) -> UploadForm {
        self.form_mut().clone()
    }

    /// Apply an edit to the form; bounds are enforced by the form's setters
    pub fn update<R>(&self, edit: impl FnOnce(&mut UploadForm) -> R) -> R {
        edit(&mut *self.form_mut())
    }

    /// Outcome of the last upload
    pub fn status(&self) -> Option<UploadStatus> {
        self.status
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading.is_active()
    }

    pub fn catalog(&self) -> &CollectionCatalog {
        &self.catalog
    }

    /// Upload the selected file with the current form values
    pub async fn submit(&self) -> ApplicationResult<UploadReport> {
        let _uploading = self
            .uploading
            .try_begin()
            .ok_or_else(|| ApplicationError::in_progress("Upload"))?;
        let form = self.form();

        let result = self.upload_file(&form).await;
        self.finish(&form, result).await
    }

    /// Upload raw text as a document using the current collection and chunking values
    pub async fn submit_text(
        &self,
        document_name: &str,
        content: &str,
        metadata: Option<DocumentMetadata>,
    ) -> ApplicationResult<UploadReport> {
        let _uploading = self
            .uploading
            .try_begin()
            .ok_or_else(|| ApplicationError::in_progress("Upload"))?;
        let form = self.form();

        let result = self
            .upload_text(&form, document_name, content, metadata)
            .await;
        self.finish(&form, result).await
    }

    async fn upload_file(&self, form: &UploadForm) -> ApplicationResult<UploadReport> {
        let path = form
            .file()
            .ok_or_else(|| ApplicationError::validation("Please select a file to upload"))?;
        let collection = form.target_collection()?;

        let request =
            FileUploadRequest::from_path(path, collection, form.chunk_size, form.chunk_overlap)
                .await?;
        Ok(self.documents.upload_file(request).await?)
    }

    async fn upload_text(
        &self,
        form: &UploadForm,
        document_name: &str,
        content: &str,
        metadata: Option<DocumentMetadata>,
    ) -> ApplicationResult<UploadReport> {
        let document_name = document_name.trim();
        if document_name.is_empty() {
            return Err(ApplicationError::validation("Document name cannot be empty"));
        }
        if content.trim().is_empty() {
            return Err(ApplicationError::validation("Document content cannot be empty"));
        }

        let request = DocumentUploadRequest {
            document_name: document_name.to_string(),
            content: content.to_string(),
            metadata,
            collection_name: form.target_collection()?,
            chunk_size: form.chunk_size,
            chunk_overlap: form.chunk_overlap,
        };
        Ok(self.documents.upload_text(request).await?)
    }

    async fn finish(
        &self,
        submitted: &UploadForm,
        result: ApplicationResult<UploadReport>,
    ) -> ApplicationResult<UploadReport> {
        let report = match result {
            Ok(report) => report,
            Err(error) => {
                warn!(error = %error, "Upload failed");
                self.record(UploadStatus::failure(error.user_message()));
                return Err(error);
            }
        };

        info!(
            collection = %report.collection_name,
            chunks = report.document_count,
            "Upload completed"
        );
        self.record(UploadStatus::success(
            format!(
                "Uploaded {} chunk(s) to collection '{}'",
                report.document_count, report.collection_name
            ),
            report.clone(),
        ));
        self.form_mut().file = None;

        if submitted.is_creating_new {
            self.catalog.refresh().await;

            let mut form = self.form_mut();
            form.selected_collection = report.collection_name.clone();
            form.new_collection_name.clear();
            form.is_creating_new = false;
        }

        Ok(report)
    }
}

impl std::fmt::Debug for UploadCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadCoordinator")
            .field("form", &self.form())
            .field("is_uploading", &self.is_uploading())
            .finish()
    }
}
