//! Tool for weather and activity suitability

use super::{arguments, non_blank};
use crate::weather::WeatherReporter;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use travel_core::{Result, Tool};

/// Current or forecast weather, optionally judged for an activity
pub struct WeatherTool {
    reporter: WeatherReporter,
}

#[derive(Debug, Deserialize)]
struct WeatherParams {
    location: String,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    activity_type: Option<String>,
}

impl WeatherTool {
    pub fn new(reporter: WeatherReporter) -> Self {
        Self { reporter }
    }
}

#[async_trait]
impl Tool for WeatherTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: WeatherParams = match arguments(params) {
            Ok(params) => params,
            Err(message) => return Ok(message),
        };
        let report = self
            .reporter
            .report(
                &params.location,
                non_blank(params.date.as_deref()),
                non_blank(params.activity_type.as_deref()),
            )
            .await;
        Ok(Value::String(report))
    }

    fn name(&self) -> &str {
        "weather_forecast"
    }

    fn description(&self) -> &str {
        "Gets current weather or a forecast up to 5 days ahead for a city or country, with a \
         recommendation for the planned activity (beach, ski, city, hiking, camping, festival)."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "location": {
                    "type": "string",
                    "description": "City or country (e.g., 'Nice', 'Chamonix', 'Japan')"
                },
                "date": {
                    "type": "string",
                    "description": "Date in YYYY-MM-DD format; omit for current conditions"
                },
                "activity_type": {
                    "type": "string",
                    "description": "Planned activity: beach, ski, city, hiking, camping, festival"
                }
            },
            "required": ["location"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::ActivityRecommender;

    #[tokio::test]
    async fn test_missing_weather_key() {
        let tool = WeatherTool::new(WeatherReporter::new(None, ActivityRecommender::new(None, "m")));
        assert_eq!(tool.name(), "weather_forecast");

        let result = tool.execute(json!({"location": "Nice"})).await.unwrap();
        assert!(result.as_str().unwrap().contains("OPENWEATHER_API_KEY"));
    }
}
