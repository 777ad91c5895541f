//! Error types for gateway operations.
//!
//! Every transport failure mode collapses into one of these variants; the
//! engines treat any `Err` as a single gateway-failure outcome and recover.

use thiserror::Error;

/// Errors that can occur when calling the completion endpoint.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// API key not configured.
    #[error("API key is not configured (set {0})")]
    ApiKeyMissing(&'static str),

    /// The HTTP request could not be sent or timed out.
    #[error("request failed: {0}")]
    Request(String),

    /// The endpoint answered with a non-success status.
    #[error("endpoint returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// The response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The endpoint answered with an empty completion.
    #[error("empty completion in response")]
    EmptyResponse,
}

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GatewayError::ApiKeyMissing("HUGGING_FACE_API_KEY");
        assert_eq!(
            err.to_string(),
            "API key is not configured (set HUGGING_FACE_API_KEY)"
        );

        let err = GatewayError::Status {
            status: 503,
            body: "loading".into(),
        };
        assert_eq!(err.to_string(), "endpoint returned status 503: loading");

        assert_eq!(
            GatewayError::EmptyResponse.to_string(),
            "empty completion in response"
        );
    }
}
