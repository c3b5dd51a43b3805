//! Session Types and Structures

use serde::{Deserialize, Serialize};

/// Shown in place of a reply when the chat call fails
pub const FAILED_RESPONSE_MESSAGE: &str = "Failed to get a response. Please try again.";

/// Options computed fresh for every submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendOptions {
    /// Transmit only the new user message
    pub skip_memory: bool,
    /// Ground the reply in this collection
    pub rag_collection: Option<String>,
}

impl SendOptions {
    pub fn new(skip_memory: bool, rag_collection: Option<String>) -> Self {
        Self {
            skip_memory,
            rag_collection,
        }
        .normalized()
    }

    /// Blank collection names mean "no collection"
    pub fn normalized(mut self) -> Self {
        self.rag_collection = self
            .rag_collection
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty());
        self
    }
}

/// How a submission ended
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// The reply was appended to the transcript
    Answered { reply: String, model: String },
    /// The transcript moved on while the request was in flight; the reply was dropped
    Stale,
}

/// Statistics for a conversation session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_messages: usize,
    pub user_messages: usize,
    pub assistant_messages: usize,
    pub total_characters: usize,
    /// Seconds between the first and the latest message
    pub session_duration_secs: Option<i64>,
}

impl SessionStats {
    pub fn summary(&self) -> String {
        format!(
            "Messages: {} (user: {}, assistant: {}), Characters: {}, Duration: {}",
            self.total_messages,
            self.user_messages,
            self.assistant_messages,
            self.total_characters,
            self.session_duration_secs
                .map(|secs| format!("{}m", secs / 60))
                .unwrap_or_else(|| "unknown".to_string())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_collection_is_dropped() {
        assert_eq!(SendOptions::new(false, Some("   ".to_string())).rag_collection, None);
        assert_eq!(
            SendOptions::new(true, Some(" papers ".to_string())).rag_collection,
            Some("papers".to_string())
        );
    }

    #[test]
    fn test_stats_summary() {
        let stats = SessionStats {
            total_messages: 2,
            user_messages: 1,
            assistant_messages: 1,
            total_characters: 8,
            session_duration_secs: None,
        };
        assert_eq!(
            stats.summary(),
            "Messages: 2 (user: 1, assistant: 1), Characters: 8, Duration: unknown"
        );
    }
}
