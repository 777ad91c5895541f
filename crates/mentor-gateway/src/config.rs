//! Gateway configuration and generation parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, Result};

/// Environment variable holding the inference API key.
pub const API_KEY_ENV: &str = "HUGGING_FACE_API_KEY";

/// Default hosted model endpoint.
pub const DEFAULT_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/mistralai/Mistral-7B-Instruct-v0.2";

/// Uniform per-call timeout. Every gateway call carries it; an elapsed
/// timeout is a gateway failure like any other.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the hosted inference client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Full URL of the model endpoint.
    pub endpoint: String,

    /// Bearer token for the endpoint.
    pub api_key: String,

    /// Per-call timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl GatewayConfig {
    /// Create a configuration for the default endpoint with the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create a configuration from the `HUGGING_FACE_API_KEY` variable.
    pub fn from_env() -> Result<Self> {
        let api_key =
            std::env::var(API_KEY_ENV).map_err(|_| GatewayError::ApiKeyMissing(API_KEY_ENV))?;
        Ok(Self::new(api_key))
    }

    /// Override the endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// The per-call timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Sampling parameters for a generation request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Maximum number of new tokens to generate.
    pub max_new_tokens: u32,

    /// Sampling temperature.
    pub temperature: f32,

    /// Nucleus-sampling threshold.
    pub top_p: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self::chat()
    }
}

impl GenerationParams {
    /// Parameters for conversational turns.
    pub fn chat() -> Self {
        Self {
            max_new_tokens: 500,
            temperature: 0.7,
            top_p: 0.95,
        }
    }

    /// Parameters for longer single-shot outputs (generate/fix/enhance).
    pub fn generation() -> Self {
        Self {
            max_new_tokens: 1000,
            temperature: 0.7,
            top_p: 0.95,
        }
    }
}
