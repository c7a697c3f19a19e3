//! Travel tools exposed through the tool registry
//!
//! Every tool answers `Ok`: upstream failures and bad arguments come back as
//! user-facing text.

pub mod country_info;
pub mod destinations;
pub mod flights;
pub mod mood;
pub mod weather;

pub use country_info::CountryInfoTool;
pub use destinations::NeedToDestinationTool;
pub use flights::FlightsFinderTool;
pub use mood::MoodToNeedTool;
pub use weather::WeatherTool;

use serde::de::DeserializeOwned;
use serde_json::Value;
use travel_core::tool::parse_params;

/// Parse tool arguments, or the text answer describing why they are unusable
fn arguments<T: DeserializeOwned>(params: Value) -> Result<T, Value> {
    parse_params(params).map_err(|e| Value::String(format!("❌ {e}")))
}

/// Optional string argument, with blank strings treated as absent
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Params {
        #[allow(dead_code)]
        location: String,
    }

    #[test]
    fn test_bad_arguments_become_text() {
        let err = arguments::<Params>(json!({})).unwrap_err();
        let text = err.as_str().unwrap();
        assert!(text.starts_with("❌ Invalid parameters:"));
        assert!(text.contains("location"));
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some(" 2025-06-01 ")), Some("2025-06-01"));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }
}
