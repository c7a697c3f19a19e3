//! Tool for country reports

use super::arguments;
use crate::report::ReportBuilder;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use travel_core::{Result, Tool};

/// Security, events, holidays, travel and politics for a country
pub struct CountryInfoTool {
    reports: ReportBuilder,
}

#[derive(Debug, Deserialize)]
struct CountryInfoParams {
    country: String,
    #[serde(default = "default_info_type")]
    info_type: String,
}

fn default_info_type() -> String {
    "all".to_string()
}

impl CountryInfoTool {
    pub fn new(reports: ReportBuilder) -> Self {
        Self { reports }
    }
}

#[async_trait]
impl Tool for CountryInfoTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: CountryInfoParams = match arguments(params) {
            Ok(params) => params,
            Err(message) => return Ok(message),
        };
        let report = self.reports.build(&params.country, &params.info_type).await;
        Ok(Value::String(report))
    }

    fn name(&self) -> &str {
        "country_info"
    }

    fn description(&self) -> &str {
        "Retrieves up-to-date contextual information about a country: security level with a \
         travel recommendation, current events, upcoming holidays, practical travel information \
         and political context."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "country": {
                    "type": "string",
                    "description": "Country name in English or French (e.g., 'France', 'Allemagne')"
                },
                "info_type": {
                    "type": "string",
                    "description": "Which section to return",
                    "enum": ["all", "security", "events", "holidays", "travel", "politics"],
                    "default": "all"
                }
            },
            "required": ["country"]
        })
    }
}
