//! Single-slot outcome records and in-flight tracking
//!
//! Every form keeps only the outcome of its most recent operation, which is
//! overwritten by the next one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Outcome of the last operation of a form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutcomeRecord<T> {
    pub is_error: bool,
    pub message: String,
    /// Result payload of a successful operation
    pub payload: Option<T>,
    pub recorded_at: DateTime<Utc>,
}

impl<T> OutcomeRecord<T> {
    pub fn success<S: Into<String>>(message: S, payload: T) -> Self {
        Self {
            is_error: false,
            message: message.into(),
            payload: Some(payload),
            recorded_at: Utc::now(),
        }
    }

    pub fn failure<S: Into<String>>(message: S) -> Self {
        Self {
            is_error: true,
            message: message.into(),
            payload: None,
            recorded_at: Utc::now(),
        }
    }
}

/// Flag marking an operation as in flight.
///
/// At most one guard exists at a time; dropping it clears the flag on every
/// exit path, including cancellation of the owning future.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    active: Arc<AtomicBool>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the flag, or `None` when an operation is already running
    pub fn try_begin(&self) -> Option<InFlightGuard> {
        self.active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard {
                active: Arc::clone(&self.active),
            })
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }
}

#[derive(Debug)]
pub struct InFlightGuard {
    active: Arc<AtomicBool>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.active.store(false, Ordering::Release);
    }
}
