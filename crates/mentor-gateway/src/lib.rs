//! Completion gateway boundary for CodeMentor.
//!
//! The engines consume the hosted text-completion endpoint through one call
//! contract: a prompt string in, generated text out, or a failure. This
//! crate provides the [`CompletionGateway`] trait, the
//! [`HuggingFaceClient`] implementation for the hosted inference API, and
//! the configuration/error types around them. Retry and auth policy beyond
//! bearer-token injection belong to the endpoint's owner, not here.

pub mod client;
pub mod config;
pub mod error;

pub use client::{CompletionGateway, HuggingFaceClient};
pub use config::{GatewayConfig, GenerationParams, API_KEY_ENV, DEFAULT_ENDPOINT};
pub use error::{GatewayError, Result};
