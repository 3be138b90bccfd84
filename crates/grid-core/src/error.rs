//! Error types for source operations.

use thiserror::Error;

/// Errors that can occur when calling an upstream data source.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// The caller passed something the source cannot accept.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The request never produced a successful HTTP response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The source is missing required configuration (e.g. an API key).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The upstream rejected our credential.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The upstream answered, but with something we could not use.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// The upstream answered with an empty payload.
    #[error("empty response from {0}")]
    EmptyPayload(String),
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Upstream(format!("malformed JSON: {}", err))
    }
}
