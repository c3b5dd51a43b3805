//! Domain services, one per backend capability
//!
//! Each service wraps the shared transport and exposes typed operations. The
//! traits are the seams the application layer is written against, so the
//! session manager and forms can be driven by in-memory fakes in tests.

pub mod chains;
pub mod chat;
pub mod documents;
pub mod models;

pub use chains::{ChainApi, ChainService};
pub use chat::{ChatApi, ChatOptions, ChatService};
pub use documents::{DocumentApi, DocumentService};
pub use models::{ModelApi, ModelService};
