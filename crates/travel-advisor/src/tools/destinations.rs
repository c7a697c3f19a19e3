//! Tool suggesting destinations for a travel need

use super::arguments;
use crate::suggest::TravelSuggester;
use async_trait::async_trait;
use chrono::Local;
use serde::Deserialize;
use serde_json::{Value, json};
use travel_core::{Result, Tool};

/// Destinations with round-trip airports and dates
///
/// Answers with a JSON array on success and a text message otherwise.
pub struct NeedToDestinationTool {
    suggester: TravelSuggester,
}

#[derive(Debug, Deserialize)]
struct NeedParams {
    need: String,
}

impl NeedToDestinationTool {
    pub fn new(suggester: TravelSuggester) -> Self {
        Self { suggester }
    }
}

#[async_trait]
impl Tool for NeedToDestinationTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: NeedParams = match arguments(params) {
            Ok(params) => params,
            Err(message) => return Ok(message),
        };
        let today = Local::now().date_naive();
        match self.suggester.destinations_for(&params.need, Some(today)).await {
            Ok(suggestions) => Ok(json!(suggestions)),
            Err(e) => Ok(Value::String(format!("❌ {e}"))),
        }
    }

    fn name(&self) -> &str {
        "need_to_destination"
    }

    fn description(&self) -> &str {
        "Suggests destinations and flight info based on user need."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "need": {"type": "string", "description": "User's travel need as text"}
            },
            "required": ["need"]
        })
    }
}
