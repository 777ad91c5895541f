//! Error types for engine operations.
//!
//! Only validation failures and supersession reach callers; gateway and
//! parse failures are recovered internally and never appear here.

use thiserror::Error;

/// Errors an engine call can surface to its caller.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// Empty code submitted for analysis; rejected before any network call.
    #[error("no code was provided to analyze")]
    EmptyCode,

    /// Empty chat message; rejected before any network call.
    #[error("empty chat message")]
    EmptyMessage,

    /// A newer request was issued while this one was in flight; its result
    /// was discarded without touching shared state.
    #[error("superseded by a newer request")]
    Superseded,
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
