//! Upload coordinator and collection discovery

mod common;

use common::MockDocuments;
use ragchat_applications::{ApplicationError, CollectionCatalog, UploadCoordinator};
use ragchat_core::UploadConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

fn sample_file(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("paper.txt");
    std::fs::write(&path, "Retrieval-augmented generation grounds answers in documents.").unwrap();
    path
}

fn coordinator(documents: Arc<MockDocuments>) -> UploadCoordinator {
    let catalog = CollectionCatalog::new(documents.clone());
    UploadCoordinator::new(documents, catalog, &UploadConfig::default())
}

#[tokio::test]
async fn test_upload_to_new_collection_selects_it() {
    let dir = tempfile::tempdir().unwrap();
    let documents = Arc::new(MockDocuments::with_collections(&["default"]));
    let uploads = coordinator(documents.clone());
    uploads.catalog().refresh().await;

    uploads.update(|form| {
        form.set_file(Some(sample_file(&dir)));
        form.start_new_collection();
        form.set_new_collection_name("research_papers");
    });

    let report = uploads.submit().await.unwrap();
    assert_eq!(report.collection_name, "research_papers");
    assert_eq!(report.document_count, 2);

    let catalog_names = uploads.catalog().names();
    assert_eq!(catalog_names, vec!["default", "research_papers"]);

    let form = uploads.form();
    assert_eq!(form.selected_collection(), "research_papers");
    assert!(form.new_collection_name().is_empty());
    assert!(!form.is_creating_new());
    assert!(form.file().is_none());

    let status = uploads.status().unwrap();
    assert!(!status.is_error);
    assert_eq!(status.payload, Some(report));
}

#[tokio::test]
async fn test_upload_sends_form_values() {
    let dir = tempfile::tempdir().unwrap();
    let documents = Arc::new(MockDocuments::with_collections(&["default"]));
    let uploads = coordinator(documents.clone());

    uploads.update(|form| {
        form.set_file(Some(sample_file(&dir)));
        form.set_chunk_size(500);
        form.set_chunk_overlap(1_000);
    });
    uploads.submit().await.unwrap();

    let sent = documents.file_uploads.lock().unwrap()[0].clone();
    assert_eq!(sent.file_name, "paper.txt");
    assert_eq!(sent.collection_name, "default");
    assert_eq!(sent.chunk_size, 500);
    assert_eq!(sent.chunk_overlap, 450);
    assert!(sent.chunk_overlap < sent.chunk_size);

    // existing collection: selection is kept and no refresh happens
    assert_eq!(uploads.form().selected_collection(), "default");
    assert!(!uploads.catalog().is_loaded());
}

#[tokio::test]
async fn test_failed_upload_leaves_form_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let documents = Arc::new(MockDocuments::with_collections(&["default"]));
    documents.set_fail_uploads(true);
    let uploads = coordinator(documents.clone());

    uploads.update(|form| {
        form.set_file(Some(sample_file(&dir)));
        form.start_new_collection();
        form.set_new_collection_name("fresh");
    });
    let before = uploads.form();

    let error = uploads.submit().await.unwrap_err();
    assert!(matches!(error, ApplicationError::Core(_)));
    assert_eq!(uploads.form(), before);
    assert!(!uploads.is_uploading());

    let status = uploads.status().unwrap();
    assert!(status.is_error);
    assert_eq!(status.message, "Embedding failed");

    // retry with the same file once the backend recovers
    documents.set_fail_uploads(false);
    let report = uploads.submit().await.unwrap();
    assert_eq!(report.collection_name, "fresh");
}

#[tokio::test]
async fn test_upload_requires_a_file() {
    let documents = Arc::new(MockDocuments::default());
    let uploads = coordinator(documents.clone());

    let result = uploads.submit().await;
    assert!(matches!(result, Err(ApplicationError::Validation { .. })));
    assert!(documents.file_uploads.lock().unwrap().is_empty());
    assert!(uploads.status().unwrap().is_error);
}

#[tokio::test]
async fn test_missing_file_is_reported() {
    let documents = Arc::new(MockDocuments::default());
    let uploads = coordinator(documents.clone());
    uploads.update(|form| form.set_file(Some(PathBuf::from("/no/such/file.pdf"))));

    assert!(uploads.submit().await.is_err());
    assert!(uploads.form().file().is_some());
}

#[tokio::test]
async fn test_text_upload() {
    let documents = Arc::new(MockDocuments::with_collections(&["default"]));
    let uploads = coordinator(documents.clone());

    let report = uploads
        .submit_text("notes", "Some notes worth indexing", None)
        .await
        .unwrap();
    assert_eq!(report.collection_name, "default");

    let sent = documents.text_uploads.lock().unwrap()[0].clone();
    assert_eq!(sent.document_name, "notes");
    assert_eq!(sent.chunk_size, 1000);
    assert_eq!(sent.chunk_overlap, 200);

    let blank = uploads.submit_text("notes", "  ", None).await;
    assert!(matches!(blank, Err(ApplicationError::Validation { .. })));
}

#[tokio::test]
async fn test_catalog_refresh_is_sorted_and_shared() {
    let documents = Arc::new(MockDocuments::with_collections(&["zeta", "alpha", "mid"]));
    let catalog = CollectionCatalog::new(documents);
    let composer_view = catalog.clone();

    let names = catalog.refresh().await;
    assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    assert_eq!(composer_view.names(), names);
    assert!(composer_view.contains("mid"));
    assert!(catalog.error().is_none());
}

#[tokio::test]
async fn test_catalog_failure_degrades_to_empty() {
    let documents = Arc::new(MockDocuments::with_collections(&["default"]));
    let catalog = CollectionCatalog::new(documents.clone());
    catalog.refresh().await;
    assert_eq!(catalog.names(), vec!["default"]);

    documents.set_fail_listing(true);
    let names = catalog.refresh().await;

    assert!(names.is_empty());
    assert!(catalog.names().is_empty());
    assert!(catalog.error().is_some());
    assert!(catalog.is_loaded());
}

#[tokio::test]
async fn test_catalog_delete() {
    let documents = Arc::new(MockDocuments::with_collections(&["default", "old"]));
    let catalog = CollectionCatalog::new(documents);
    catalog.refresh().await;

    catalog.delete("old").await.unwrap();
    assert_eq!(catalog.names(), vec!["default"]);

    let missing = catalog.delete("old").await;
    assert!(matches!(missing, Err(ApplicationError::Core(_))));
    assert!(matches!(
        catalog.delete("  ").await,
        Err(ApplicationError::Validation { .. })
    ));
}
