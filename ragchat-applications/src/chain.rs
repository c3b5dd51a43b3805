//! Chain configuration panel
//!
//! Submits a system prompt and temperature for the backend's customizable
//! chain. Nothing is cached between submissions.

use crate::status::{InFlight, OutcomeRecord};
use crate::{ApplicationError, ApplicationResult};
use ragchat_client::{ChainApi, ChainConfiguration, ChainConfigurationResponse, ChainParameters};
use ragchat_core::{ChainConfig, RagchatError};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{info, warn};

pub const CHAIN_SUCCESS_MESSAGE: &str = "Chain configuration updated successfully!";
pub const CHAIN_FAILURE_MESSAGE: &str = "Failed to configure chain";

pub type ChainStatus = OutcomeRecord<ChainConfigurationResponse>;

#[derive(Debug, Clone)]
struct ChainForm {
    system_message: String,
    temperature: f32,
}

/// Snap a temperature into `0.0..=1.0` on a 0.1 grid
fn snap_temperature(temperature: f32) -> f32 {
    (temperature.clamp(0.0, 1.0) * 10.0).round() / 10.0
}

pub struct ChainConfigPanel {
    chains: Arc<dyn ChainApi>,
    chain_name: String,
    form: Mutex<ChainForm>,
    status: Mutex<Option<ChainStatus>>,
    submitting: InFlight,
}

impl ChainConfigPanel {
    pub fn new(chains: Arc<dyn ChainApi>, config: &ChainConfig) -> Self {
        let temperature = if config.temperature.is_finite() {
            snap_temperature(config.temperature)
        } else {
            ChainConfig::default().temperature
        };

        Self {
            chains,
            chain_name: config.name.clone(),
            form: Mutex::new(ChainForm {
                system_message: String::new(),
                temperature,
            }),
            status: Mutex::new(None),
            submitting: InFlight::new(),
        }
    }

    fn form(&self) -> MutexGuard<'_, ChainForm> {
        self.form
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, status: ChainStatus) {
        *self
            .status
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(status);
    }

    pub fn chain_name(&self) -> &str {
        &self.chain_name
    }

    pub fn system_message(&self) -> String {
        self.form().system_message.clone()
    }

    pub fn set_system_message(&self, message: impl Into<String>) {
        self.form().system_message = message.into();
    }

    pub fn temperature(&self) -> f32 {
        self.form().temperature
    }

    /// Set the temperature, snapped to the panel's grid; non-finite input is ignored.
    /// Returns the applied value.
    pub fn set_temperature(&self, temperature: f32) -> f32 {
        let mut form = self.form();
        if temperature.is_finite() {
            form.temperature = snap_temperature(temperature);
        }
        form.temperature
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.is_active()
    }

    /// Submission is disabled for a blank message or while a request is pending
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && !self.form().system_message.trim().is_empty()
    }

    pub fn status(&self) -> Option<ChainStatus> {
        self.status
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub async fn submit(&self) -> ApplicationResult<ChainConfigurationResponse> {
        let configuration = {
            let form = self.form();
            if form.system_message.trim().is_empty() {
                return Err(ApplicationError::validation(
                    "System message cannot be empty",
                ));
            }
            ChainConfiguration {
                system_message: form.system_message.clone(),
                parameters: ChainParameters {
                    temperature: form.temperature,
                },
                name: self.chain_name.clone(),
            }
        };

        let _submitting = self
            .submitting
            .try_begin()
            .ok_or_else(|| ApplicationError::in_progress("Chain configuration"))?;

        match self.chains.configure(configuration).await {
            Ok(response) => {
                info!(chain = %response.name, "Chain configured");
                self.record(ChainStatus::success(CHAIN_SUCCESS_MESSAGE, response.clone()));
                Ok(response)
            }
            Err(error) => {
                warn!(chain = %self.chain_name, error = %error, "Chain configuration failed");
                self.record(ChainStatus::failure(failure_message(&error)));
                Err(error.into())
            }
        }
    }
}

/// The backend's `detail` string when it sent one
fn failure_message(error: &RagchatError) -> String {
    match error {
        RagchatError::Api {
            detail: Some(serde_json::Value::String(detail)),
            ..
        } if !detail.is_empty() => detail.clone(),
        _ => CHAIN_FAILURE_MESSAGE.to_string(),
    }
}

impl std::fmt::Debug for ChainConfigPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainConfigPanel")
            .field("chain_name", &self.chain_name)
            .field("form", &*self.form())
            .finish()
    }
}
