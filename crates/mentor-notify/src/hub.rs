//! NotificationHub - thread-safe pub/sub for user-facing notifications.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::RwLock;

use tracing::trace;

use mentor_models::{Notification, Severity};

/// Thread-safe notification broadcaster.
///
/// Each subscriber gets its own `mpsc` receiver; the hub keeps the senders
/// and drops any whose receiver has disconnected. Emission is best effort
/// by contract: no delivery guarantee, no persistence, no error surface.
#[derive(Default)]
pub struct NotificationHub {
    subscribers: RwLock<Vec<Sender<Notification>>>,
}

impl NotificationHub {
    /// Create a hub with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to notifications.
    ///
    /// Returns a receiver that sees every notification emitted after this
    /// call. Dropping the receiver unsubscribes implicitly.
    pub fn subscribe(&self) -> Receiver<Notification> {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut subs) = self.subscribers.write() {
            subs.push(tx);
        }
        rx
    }

    /// Emit a notification to all subscribers.
    ///
    /// Disconnected subscribers are removed as a side effect.
    pub fn emit(&self, message: impl Into<String>, severity: Severity) {
        let notification = Notification::new(message, severity);
        trace!(severity = %notification.severity, message = %notification.message, "Emitting notification");

        if let Ok(mut subs) = self.subscribers.write() {
            subs.retain(|tx| tx.send(notification.clone()).is_ok());
        }
    }

    /// Emit a success notification.
    pub fn success(&self, message: impl Into<String>) {
        self.emit(message, Severity::Success);
    }

    /// Emit an error notification.
    pub fn error(&self, message: impl Into<String>) {
        self.emit(message, Severity::Error);
    }

    /// Emit an info notification.
    pub fn info(&self, message: impl Into<String>) {
        self.emit(message, Severity::Info);
    }

    /// Emit a warning notification.
    pub fn warning(&self, message: impl Into<String>) {
        self.emit(message, Severity::Warning);
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().map(|s| s.len()).unwrap_or(0)
    }
}
