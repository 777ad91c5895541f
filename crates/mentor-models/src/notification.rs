//! User-facing notification types.
//!
//! Notifications are the fire-and-forget side channel the engines emit on
//! validation rejections, fallback substitutions, chat code updates, and
//! terminal failures. Rendering them is the UI collaborator's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// An operation completed as intended.
    Success,
    /// An operation failed terminally.
    Error,
    /// Neutral information.
    Info,
    /// Something was rejected or degraded but handled.
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// A single notification event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique identifier.
    pub id: Uuid,

    /// Human-readable message.
    pub message: String,

    /// Severity class.
    pub severity: Severity,

    /// Timestamp when the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Create a new notification with a fresh id and the current timestamp.
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            severity,
            created_at: Utc::now(),
        }
    }
}
