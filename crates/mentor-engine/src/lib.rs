//! Orchestration engines for CodeMentor.
//!
//! [`AnalysisEngine`] drives the analyze/generate/fix/enhance operations;
//! [`ChatEngine`] drives conversational turns. Both are explicitly
//! constructed with their collaborators — gateway, history, notification
//! hub — so tests can instantiate isolated instances with mock gateways.
//!
//! Recovery policy is uniform across every operation: a gateway failure is
//! never surfaced raw. Analysis substitutes the deterministic fallback,
//! chat appends a canned apology turn, and the single-shot operations
//! return a clearly marked placeholder.

pub mod analysis;
pub mod chat;
pub mod error;
mod token;

pub use analysis::AnalysisEngine;
pub use chat::ChatEngine;
pub use error::{EngineError, Result};
