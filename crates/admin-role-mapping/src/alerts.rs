//! User-facing notifications
//!
//! A save reports its outcome through an [`AlertSink`]. [`AlertLog`] keeps
//! the most recent alerts and broadcasts each one to subscribers, which is
//! what the console and the tests listen on.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::broadcast;

/// Message of the alert emitted after a successful save.
pub const ROLE_MAPPING_UPDATED: &str = "Role mapping updated";

/// Message of the alert emitted after a failed save.
pub const ROLE_MAPPING_UPDATE_FAILED: &str = "Could not update role mapping";

/// Alert severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertVariant {
    Success,
    Danger,
    Warning,
    Info,
}

/// One notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Severity
    pub variant: AlertVariant,
    /// Headline
    pub message: String,
    /// Underlying error text for failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Alert {
    /// A success alert.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            variant: AlertVariant::Success,
            message: message.into(),
            detail: None,
        }
    }

    /// A danger alert carrying the error that caused it.
    pub fn error(message: impl Into<String>, error: &dyn std::error::Error) -> Self {
        Self {
            variant: AlertVariant::Danger,
            message: message.into(),
            detail: Some(error.to_string()),
        }
    }

    /// Whether this is a success alert.
    pub fn is_success(&self) -> bool {
        self.variant == AlertVariant::Success
    }
}

/// Receiver of alerts.
pub trait AlertSink: Send + Sync {
    /// Show an alert.
    fn add_alert(&self, alert: Alert);
}

/// In-memory alert sink with history and broadcast.
///
/// History keeps the most recent `capacity` alerts; older ones are dropped.
pub struct AlertLog {
    history: Mutex<VecDeque<Alert>>,
    capacity: usize,
    sender: broadcast::Sender<Alert>,
}

impl std::fmt::Debug for AlertLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertLog")
            .field("alerts", &self.alerts().len())
            .field("subscribers", &self.sender.receiver_count())
            .finish()
    }
}

impl AlertLog {
    /// Create a new alert log.
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    /// Create with custom history and broadcast capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            history: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            sender,
        }
    }

    /// Receive alerts added from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Alert> {
        self.sender.subscribe()
    }

    /// All alerts so far, oldest first.
    pub fn alerts(&self) -> Vec<Alert> {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .cloned()
            .collect()
    }

    /// Most recent alert.
    pub fn last(&self) -> Option<Alert> {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .back()
            .cloned()
    }

    /// Forget all alerts.
    pub fn clear(&self) {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl Default for AlertLog {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertSink for AlertLog {
    fn add_alert(&self, alert: Alert) {
        {
            let mut history = self
                .history
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            if history.len() == self.capacity {
                history.pop_front();
            }
            history.push_back(alert.clone());
        }
        // No subscribers is fine.
        let _ = self.sender.send(alert);
    }
}
