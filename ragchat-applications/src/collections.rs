//! Collection discovery shared by the upload form and the chat composer

use crate::{ApplicationError, ApplicationResult};
use ragchat_client::DocumentApi;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{info, warn};

/// Trim a collection name and reject blank ones
pub fn normalize_collection_name(name: &str) -> ApplicationResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApplicationError::validation(
            "Collection name cannot be empty",
        ));
    }
    Ok(name.to_string())
}

#[derive(Debug, Default)]
struct CatalogState {
    names: Vec<String>,
    error: Option<String>,
    loaded: bool,
}

/// Shared handle to the known collections.
///
/// Clones share the same list, so a refresh triggered by an upload is seen
/// by the chat composer.
#[derive(Clone)]
pub struct CollectionCatalog {
    documents: Arc<dyn DocumentApi>,
    state: Arc<Mutex<CatalogState>>,
}

impl CollectionCatalog {
    pub fn new(documents: Arc<dyn DocumentApi>) -> Self {
        Self {
            documents,
            state: Arc::new(Mutex::new(CatalogState::default())),
        }
    }

    fn state(&self) -> MutexGuard<'_, CatalogState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Fetch the collection list.
    ///
    /// A failure leaves an empty list and a surfaced error; it never fails
    /// the caller.
    pub async fn refresh(&self) -> Vec<String> {
        let result = self.documents.list_collections().await;

        let mut state = self.state();
        state.loaded = true;
        match result {
            Ok(mut names) => {
                names.sort();
                names.dedup();
                info!(count = names.len(), "Fetched collections");
                state.names = names;
                state.error = None;
            }
            Err(error) => {
                warn!(error = %error, "Failed to fetch collections");
                state.names.clear();
                state.error = Some(format!(
                    "Failed to load collections: {}",
                    error.user_message()
                ));
            }
        }
        state.names.clone()
    }

    /// Remove a collection on the backend and from the shared list
    pub async fn delete(&self, name: &str) -> ApplicationResult<()> {
        let name = normalize_collection_name(name)?;
        self.documents.delete_collection(&name).await?;

        self.state().names.retain(|known| known != &name);
        info!(collection = %name, "Removed collection");
        Ok(())
    }

    pub fn names(&self) -> Vec<String> {
        self.state().names.clone()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.state().names.iter().any(|known| known == name)
    }

    /// Error of the last refresh, if it failed
    pub fn error(&self) -> Option<String> {
        self.state().error.clone()
    }

    /// Whether a refresh has completed at least once
    pub fn is_loaded(&self) -> bool {
        self.state().loaded
    }
}

impl std::fmt::Debug for CollectionCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("CollectionCatalog")
            .field("names", &state.names)
            .field("error", &state.error)
            .finish()
    }
}
