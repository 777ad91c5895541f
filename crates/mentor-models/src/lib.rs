//! Core data models for CodeMentor.
//!
//! This crate provides the fundamental data types shared across the
//! CodeMentor system: analysis results, chat sessions, and notifications.

pub mod analysis;
pub mod chat;
pub mod notification;

// Re-export main types
pub use analysis::{AnalysisResult, AnalysisSource};
pub use chat::{ChatMessage, ChatRole, ChatSession, LanguageScope};
pub use notification::{Notification, Severity};
