//! Session Management Module
//!
//! Owns the transcript of one conversation and decides what is transmitted
//! on each user turn.

pub mod manager;
pub mod types;

pub use manager::ConversationSession;
pub use types::*;
