//! Errors from language-model calls

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LLMError>;

#[derive(Error, Debug)]
pub enum LLMError {
    /// Provider answered with a status that has no dedicated variant
    #[error("Model request failed with HTTP {status}: {body}")]
    RequestFailed { status: u16, body: String },

    #[error("Model API key rejected")]
    AuthenticationFailed,

    #[error("Model rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Provider is temporarily overloaded (HTTP 529)
    #[error("Model provider overloaded")]
    Overloaded,

    #[error("Invalid model request: {0}")]
    InvalidRequest(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Answer had no usable text
    #[error("Unexpected model response: {0}")]
    UnexpectedResponse(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}
