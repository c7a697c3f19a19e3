//! Tool for round-trip flight search

use super::arguments;
use crate::flights::{FlightFinder, RoundTrip};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use travel_core::{Result, Tool};

/// Cheapest outbound and inbound flights
pub struct FlightsFinderTool {
    finder: FlightFinder,
}

#[derive(Debug, Deserialize)]
struct FlightsParams {
    departure_airport: String,
    arrival_airport: String,
    outbound_date: String,
    return_date: String,
    #[serde(default = "default_adults")]
    adults: u32,
    #[serde(default)]
    children: u32,
}

fn default_adults() -> u32 {
    1
}

impl FlightsFinderTool {
    pub fn new(finder: FlightFinder) -> Self {
        Self { finder }
    }
}

impl From<FlightsParams> for RoundTrip {
    fn from(params: FlightsParams) -> Self {
        RoundTrip {
            departure_airport: params.departure_airport,
            arrival_airport: params.arrival_airport,
            outbound_date: params.outbound_date,
            return_date: params.return_date,
            adults: params.adults,
            children: params.children,
        }
    }
}

#[async_trait]
impl Tool for FlightsFinderTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: FlightsParams = match arguments(params) {
            Ok(params) => params,
            Err(message) => return Ok(message),
        };
        let text = self.finder.round_trip(&params.into()).await;
        Ok(Value::String(text))
    }

    fn name(&self) -> &str {
        "flights_finder"
    }

    fn description(&self) -> &str {
        "Find flights using the Google Flights engine."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "departure_airport": {"type": "string", "description": "Departure airport code (IATA)"},
                "arrival_airport": {"type": "string", "description": "Arrival airport code (IATA)"},
                "outbound_date": {"type": "string", "description": "Outbound date in YYYY-MM-DD format"},
                "return_date": {"type": "string", "description": "Return date in YYYY-MM-DD format"},
                "adults": {"type": "integer", "description": "Number of adults", "default": 1},
                "children": {"type": "integer", "description": "Number of children", "default": 0}
            },
            "required": ["departure_airport", "arrival_airport", "outbound_date", "return_date"]
        })
    }
}
