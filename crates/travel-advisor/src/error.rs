//! Error types for the travel advisor

use thiserror::Error;
use travel_llm::LLMError;

/// Travel advisor specific errors
#[derive(Debug, Error)]
pub enum AdvisorError {
    /// Remote service answered with an unexpected HTTP status
    #[error("{service} returned HTTP {status}: {body}")]
    Http {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// Remote service rejected the API key
    #[error("Invalid or inactive API key for {service}")]
    Unauthorized { service: &'static str },

    /// Remote service quota exhausted
    #[error("Rate limit exceeded for {service}")]
    RateLimited { service: &'static str },

    /// Request exceeded the client timeout
    #[error("Request to {service} timed out")]
    Timeout { service: &'static str },

    /// Remote service returned an error payload
    #[error("API error: {0}")]
    ApiError(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Malformed service URL
    #[error("URL error: {0}")]
    UrlError(#[from] url::ParseError),

    /// Language model call failed
    #[error("LLM error: {0}")]
    LlmError(#[from] LLMError),

    /// Prompt template failed to render
    #[error("Template error: {0}")]
    TemplateError(#[from] minijinja::Error),

    /// Model output could not be interpreted
    #[error("Could not parse model output: {0}")]
    ParseError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Caller supplied unusable input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

/// Result type alias for advisor operations
pub type Result<T> = std::result::Result<T, AdvisorError>;

impl From<AdvisorError> for travel_core::Error {
    fn from(err: AdvisorError) -> Self {
        match err {
            AdvisorError::InvalidInput(msg) => travel_core::Error::InvalidParameters(msg),
            other => travel_core::Error::ExecutionFailed(other.to_string()),
        }
    }
}

impl From<travel_core::Error> for AdvisorError {
    fn from(err: travel_core::Error) -> Self {
        AdvisorError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AdvisorError::Http {
            service: "NewsAPI",
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "NewsAPI returned HTTP 500: boom");

        let err = AdvisorError::Timeout {
            service: "OpenWeatherMap",
        };
        assert_eq!(err.to_string(), "Request to OpenWeatherMap timed out");
    }

    #[test]
    fn test_error_conversion() {
        let core: travel_core::Error = AdvisorError::InvalidInput("bad date".to_string()).into();
        assert!(matches!(core, travel_core::Error::InvalidParameters(msg) if msg == "bad date"));

        let core: travel_core::Error = AdvisorError::ApiError("down".to_string()).into();
        match core {
            travel_core::Error::ExecutionFailed(msg) => assert!(msg.contains("API error")),
            _ => panic!("Expected ExecutionFailed variant"),
        }
    }
}
