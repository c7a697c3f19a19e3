//! Error types for travel-core

use thiserror::Error;

/// Result type alias for travel-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for tool operations
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error message
    #[error("{0}")]
    Generic(String),

    /// Parameters did not match the tool's input schema
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// No tool registered under the requested name
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Tool execution failed
    #[error("Tool execution failed: {0}")]
    ExecutionFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::ToolNotFound("weather_forecast".to_string());
        assert_eq!(err.to_string(), "Tool not found: weather_forecast");

        let err = Error::InvalidParameters("missing field `country`".to_string());
        assert_eq!(err.to_string(), "Invalid parameters: missing field `country`");
    }
}
