//! The completion gateway trait and the hosted inference client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::{GatewayConfig, GenerationParams};
use crate::error::{GatewayError, Result};

/// The single call contract the engines consume.
///
/// Implementations send one free-form prompt and return the generated text.
/// All failure modes — connect errors, timeouts, non-success statuses,
/// empty or undecodable payloads — surface as [`GatewayError`]; callers
/// treat any `Err` as one gateway-failure outcome.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Generate a completion for the prompt.
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String>;

    /// Check that the endpoint is reachable and the credentials are valid.
    async fn health_check(&self) -> Result<()>;
}

/// Client for the hosted text-generation inference API.
#[derive(Clone)]
pub struct HuggingFaceClient {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl HuggingFaceClient {
    /// Create a client from the given configuration.
    ///
    /// The per-call timeout lives on the underlying HTTP client, so every
    /// request carries it uniformly.
    pub fn new(config: GatewayConfig) -> Self {
        // Same failure mode as reqwest::Client::new(): construction only
        // fails when the TLS backend cannot initialize.
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .expect("failed to build HTTP client");
        Self { client, config }
    }

    /// Create a client configured from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(GatewayConfig::from_env()?))
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

#[async_trait]
impl CompletionGateway for HuggingFaceClient {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        let request = GenerateRequest {
            inputs: prompt,
            parameters: Parameters {
                max_new_tokens: params.max_new_tokens,
                temperature: params.temperature,
                top_p: params.top_p,
            },
        };

        trace!(prompt_len = prompt.len(), "Sending generation request");

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let completions: Vec<GeneratedText> = response
            .json()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))?;

        let text = completions
            .into_iter()
            .next()
            .map(|c| c.generated_text)
            .filter(|t| !t.trim().is_empty())
            .ok_or(GatewayError::EmptyResponse)?;

        debug!(response_len = text.len(), "Generation response received");

        Ok(text)
    }

    async fn health_check(&self) -> Result<()> {
        let response = self
            .client
            .get(&self.config.endpoint)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .send()
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

/// Generation request body.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    /// The prompt string.
    inputs: &'a str,

    /// Sampling parameters.
    parameters: Parameters,
}

/// Wire form of the sampling parameters.
#[derive(Debug, Serialize)]
struct Parameters {
    max_new_tokens: u32,
    temperature: f32,
    top_p: f32,
}

/// One completion in the response array.
#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}
