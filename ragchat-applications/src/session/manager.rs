//! Conversation session - the transcript and the per-turn send policy
//!
//! The visible transcript only ever grows by appending. What is transmitted
//! on a turn is derived from it: the whole transcript, or only the new user
//! message when memory is skipped. A failed turn keeps the optimistic user
//! message and records a display error instead of rolling back.

use super::{SendOptions, SessionStats, TurnOutcome, FAILED_RESPONSE_MESSAGE};
use crate::status::InFlight;
use crate::{ApplicationError, ApplicationResult};
use chrono::{DateTime, Utc};
use ragchat_client::{ChatApi, ChatOptions};
use ragchat_core::{ChatConfig, Message, Role};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
struct Transcript {
    messages: Vec<Message>,
    error: Option<String>,
    /// Last issued submission
    sequence: u64,
    /// Bumped whenever the transcript is cleared
    generation: u64,
    last_reply_model: Option<String>,
    first_message_at: Option<DateTime<Utc>>,
    last_message_at: Option<DateTime<Utc>>,
}

impl Transcript {
    fn push(&mut self, message: Message) {
        let now = Utc::now();
        self.first_message_at.get_or_insert(now);
        self.last_message_at = Some(now);
        self.messages.push(message);
    }
}

/// One conversation with the backend
pub struct ConversationSession {
    chat: Arc<dyn ChatApi>,
    /// Generation settings applied to every turn
    defaults: ChatOptions,
    transcript: Mutex<Transcript>,
    loading: InFlight,
}

impl ConversationSession {
    pub fn new(chat: Arc<dyn ChatApi>, config: &ChatConfig) -> Self {
        Self::with_options(chat, ChatOptions::from(config))
    }

    pub fn with_options(chat: Arc<dyn ChatApi>, defaults: ChatOptions) -> Self {
        Self {
            chat,
            defaults,
            transcript: Mutex::new(Transcript::default()),
            loading: InFlight::new(),
        }
    }

    // Critical sections never span an await, so a poisoned lock still holds
    // a consistent transcript.
    fn transcript(&self) -> MutexGuard<'_, Transcript> {
        self.transcript
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Send one user turn and apply the reply.
    ///
    /// The user message is appended before the request is made. A submission
    /// made while another one is pending is rejected with
    /// [`ApplicationError::SessionBusy`] and leaves the transcript untouched.
    pub async fn submit(
        &self,
        content: &str,
        options: SendOptions,
    ) -> ApplicationResult<TurnOutcome> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ApplicationError::validation("Message cannot be empty"));
        }

        let _loading = self
            .loading
            .try_begin()
            .ok_or(ApplicationError::SessionBusy)?;
        let options = options.normalized();

        let (sequence, generation, transmitted) = {
            let mut transcript = self.transcript();
            let user_message = Message::user(content);
            transcript.push(user_message.clone());
            transcript.error = None;
            transcript.sequence += 1;

            let transmitted = if options.skip_memory {
                vec![user_message]
            } else {
                transcript.messages.clone()
            };
            (transcript.sequence, transcript.generation, transmitted)
        };

        debug!(
            sequence,
            transmitted = transmitted.len(),
            skip_memory = options.skip_memory,
            rag_collection = ?options.rag_collection,
            "Submitting chat turn"
        );

        let chat_options = ChatOptions {
            skip_memory: options.skip_memory,
            rag_collection: options.rag_collection,
            ..self.defaults.clone()
        };
        let result = self.chat.chat(transmitted, chat_options).await;

        let mut transcript = self.transcript();
        if transcript.sequence != sequence || transcript.generation != generation {
            debug!(sequence, "Discarding reply for a superseded transcript");
            return Ok(TurnOutcome::Stale);
        }

        match result {
            Ok(response) => {
                transcript.push(Message::assistant(response.response.as_str()));
                transcript.last_reply_model = Some(response.model.clone());
                info!(
                    sequence,
                    model = %response.model,
                    messages = transcript.messages.len(),
                    "Chat turn answered"
                );
                Ok(TurnOutcome::Answered {
                    reply: response.response,
                    model: response.model,
                })
            }
            Err(error) => {
                warn!(sequence, error = %error, "Chat turn failed");
                transcript.error = Some(FAILED_RESPONSE_MESSAGE.to_string());
                Err(ApplicationError::Core(error))
            }
        }
    }

    /// Snapshot of the visible transcript
    pub fn messages(&self) -> Vec<Message> {
        self.transcript().messages.clone()
    }

    pub fn len(&self) -> usize {
        self.transcript().messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcript().messages.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_active()
    }

    /// Display error of the last failed turn
    pub fn error(&self) -> Option<String> {
        self.transcript().error.clone()
    }

    /// Model that produced the last applied reply
    pub fn last_reply_model(&self) -> Option<String> {
        self.transcript().last_reply_model.clone()
    }

    /// Start a new conversation.
    ///
    /// A reply still in flight is discarded when it arrives.
    pub fn clear(&self) {
        let mut transcript = self.transcript();
        let generation = transcript.generation + 1;
        let sequence = transcript.sequence;
        *transcript = Transcript {
            generation,
            sequence,
            ..Transcript::default()
        };
        info!(generation, "Cleared conversation");
    }

    pub fn stats(&self) -> SessionStats {
        let transcript = self.transcript();
        let count = |role: Role| {
            transcript
                .messages
                .iter()
                .filter(|message| message.role() == role)
                .count()
        };

        SessionStats {
            total_messages: transcript.messages.len(),
            user_messages: count(Role::User),
            assistant_messages: count(Role::Assistant),
            total_characters: transcript
                .messages
                .iter()
                .map(|message| message.content().chars().count())
                .sum(),
            session_duration_secs: transcript
                .first_message_at
                .zip(transcript.last_message_at)
                .map(|(first, last)| (last - first).num_seconds()),
        }
    }
}

impl std::fmt::Debug for ConversationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationSession")
            .field("defaults", &self.defaults)
            .field("messages", &self.len())
            .field("is_loading", &self.is_loading())
            .finish()
    }
}
