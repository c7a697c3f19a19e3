//! Tool turning a mood into a travel need

use super::arguments;
use crate::suggest::TravelSuggester;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use travel_core::{Result, Tool};

pub struct MoodToNeedTool {
    suggester: TravelSuggester,
}

#[derive(Debug, Deserialize)]
struct MoodParams {
    mood: String,
}

impl MoodToNeedTool {
    pub fn new(suggester: TravelSuggester) -> Self {
        Self { suggester }
    }
}

#[async_trait]
impl Tool for MoodToNeedTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: MoodParams = match arguments(params) {
            Ok(params) => params,
            Err(message) => return Ok(message),
        };
        let text = match self.suggester.mood_to_need(&params.mood).await {
            Ok(need) => need,
            Err(e) => format!("❌ {e}"),
        };
        Ok(Value::String(text))
    }

    fn name(&self) -> &str {
        "mood_to_need"
    }

    fn description(&self) -> &str {
        "Converts user mood into a travel-related need."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "mood": {"type": "string", "description": "User's mood as text"}
            },
            "required": ["mood"]
        })
    }
}
