//! Connection probe against the backend health endpoint

use crate::status::InFlight;
use ragchat_client::{ChatApi, HealthReport};
use ragchat_core::RagchatError;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum ProbeState {
    Idle,
    Checking,
    Connected(HealthReport),
    Failed {
        message: String,
        /// Health report carried by a 503 response
        degraded: Option<HealthReport>,
    },
}

impl ProbeState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ProbeState::Connected(_))
    }
}

pub struct ConnectionProbe {
    chat: Arc<dyn ChatApi>,
    state: Mutex<ProbeState>,
    checking: InFlight,
}

impl ConnectionProbe {
    pub fn new(chat: Arc<dyn ChatApi>) -> Self {
        Self {
            chat,
            state: Mutex::new(ProbeState::Idle),
            checking: InFlight::new(),
        }
    }

    fn state_mut(&self) -> MutexGuard<'_, ProbeState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn state(&self) -> ProbeState {
        self.state_mut().clone()
    }

    /// Run one health check; a check already in progress is not repeated
    pub async fn check(&self) -> ProbeState {
        let Some(_checking) = self.checking.try_begin() else {
            return ProbeState::Checking;
        };
        *self.state_mut() = ProbeState::Checking;

        let state = match self.chat.health().await {
            Ok(report) => {
                info!(status = %report.status, version = ?report.version, "Backend reachable");
                ProbeState::Connected(report)
            }
            Err(error) => {
                warn!(error = %error, "Health check failed");
                failed_state(&error)
            }
        };

        *self.state_mut() = state.clone();
        state
    }
}

fn failed_state(error: &RagchatError) -> ProbeState {
    if let RagchatError::Api {
        status: 503,
        detail: Some(detail),
        ..
    } = error
    {
        if let Ok(report) = serde_json::from_value::<HealthReport>(detail.clone()) {
            let message = match report.unhealthy_services().as_slice() {
                [] => format!("Backend is {}", report.status),
                services => format!(
                    "Backend is {}: {}",
                    report.status,
                    services
                        .iter()
                        .map(|(name, status)| format!("{} ({})", name, status))
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            };
            return ProbeState::Failed {
                message,
                degraded: Some(report),
            };
        }
    }

    ProbeState::Failed {
        message: error.user_message(),
        degraded: None,
    }
}

impl std::fmt::Debug for ConnectionProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionProbe")
            .field("state", &self.state())
            .finish()
    }
}
