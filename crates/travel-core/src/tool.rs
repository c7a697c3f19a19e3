//! Tool trait definition

use crate::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Trait for tools exposed to the travel assistant
///
/// Every travel tool answers with a JSON value, usually a string report. Tool
/// implementations embed upstream failures (missing API keys, network errors,
/// unrecognized input) in that report; an `Err` is reserved for problems in
/// the tool plumbing itself.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with given parameters
    ///
    /// # Arguments
    ///
    /// * `params` - Tool input as JSON value (should match input_schema)
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Get the tool's name
    ///
    /// Must be unique within a ToolRegistry
    fn name(&self) -> &str;

    /// Get the tool's description
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    ///
    /// let schema = json!({
    ///     "type": "object",
    ///     "properties": {
    ///         "location": { "type": "string" },
    ///         "date": { "type": "string", "format": "date" }
    ///     },
    ///     "required": ["location"]
    /// });
    /// assert_eq!(schema["required"][0], "location");
    /// ```
    fn input_schema(&self) -> Value;
}

/// Deserialize tool parameters, mapping serde failures to [`crate::Error::InvalidParameters`]
pub fn parse_params<T: serde::de::DeserializeOwned>(params: Value) -> Result<T> {
    serde_json::from_value(params).map_err(|e| crate::Error::InvalidParameters(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Params {
        country: String,
        #[serde(default)]
        info_type: Option<String>,
    }

    #[test]
    fn test_parse_params() {
        let params: Params = parse_params(json!({ "country": "France" })).unwrap();
        assert_eq!(params.country, "France");
        assert!(params.info_type.is_none());
    }

    #[test]
    fn test_parse_params_invalid() {
        let result: Result<Params> = parse_params(json!({ "info_type": "all" }));
        assert!(matches!(result, Err(crate::Error::InvalidParameters(_))));
    }
}
