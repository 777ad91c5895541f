//! Fire-and-forget notification side channel.
//!
//! The engines emit [`mentor_models::Notification`] values here; UI
//! collaborators subscribe and render them. Nothing is persisted and a
//! notification nobody listens to is silently dropped.
//!
//! # Example
//!
//! ```
//! use mentor_notify::NotificationHub;
//! use mentor_models::Severity;
//!
//! let hub = NotificationHub::new();
//! let receiver = hub.subscribe();
//!
//! hub.success("Code optimized and replaced");
//!
//! let notification = receiver.recv().unwrap();
//! assert_eq!(notification.severity, Severity::Success);
//! ```

pub mod hub;

pub use hub::NotificationHub;
