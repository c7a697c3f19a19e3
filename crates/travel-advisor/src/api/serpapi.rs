//! SerpAPI Google Flights client
//!
//! See: https://serpapi.com/google-flights-api

use super::{ensure_success, http_client, send_error};
use crate::error::{AdvisorError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

const SERPAPI_BASE: &str = "https://serpapi.com";
const SERVICE: &str = "SerpAPI";

/// One-way flight search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightQuery {
    /// Departure IATA code
    pub departure: String,
    /// Arrival IATA code
    pub arrival: String,
    /// YYYY-MM-DD
    pub date: String,
    pub adults: u32,
    pub children: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AirportTime {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Local time, "YYYY-MM-DD HH:MM"
    pub time: String,
}

/// A single leg of an itinerary
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FlightSegment {
    pub departure_airport: AirportTime,
    pub arrival_airport: AirportTime,
    /// Minutes
    pub duration: u32,
    #[serde(default)]
    pub airline: Option<String>,
}

/// A priced itinerary
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FlightOption {
    #[serde(default)]
    pub flights: Vec<FlightSegment>,
    /// USD
    #[serde(default)]
    pub price: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    best_flights: Vec<FlightOption>,
    #[serde(default)]
    error: Option<String>,
}

/// Flight search service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FlightSearch: Send + Sync {
    /// Best itineraries for a one-way trip
    async fn best_flights(&self, query: &FlightQuery) -> Result<Vec<FlightOption>>;
}

/// SerpAPI client
pub struct SerpApiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl SerpApiClient {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            api_key: api_key.into(),
            base_url: SERPAPI_BASE.to_string(),
        })
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl FlightSearch for SerpApiClient {
    #[instrument(skip(self), fields(from = %query.departure, to = %query.arrival, date = %query.date))]
    async fn best_flights(&self, query: &FlightQuery) -> Result<Vec<FlightOption>> {
        let adults = query.adults.to_string();
        let children = query.children.to_string();
        let response = self
            .client
            .get(format!("{}/search.json", self.base_url))
            .query(&[
                ("engine", "google_flights"),
                ("hl", "en"),
                ("gl", "us"),
                ("currency", "USD"),
                // one-way
                ("type", "2"),
                ("departure_id", query.departure.as_str()),
                ("arrival_id", query.arrival.as_str()),
                ("outbound_date", query.date.as_str()),
                ("adults", adults.as_str()),
                ("children", children.as_str()),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| send_error(SERVICE, e))?;

        let response = ensure_success(SERVICE, response).await?;
        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| AdvisorError::ApiError(format!("Failed to parse SerpAPI response: {e}")))?;

        if let Some(error) = body.error {
            // SerpAPI reports empty result sets through the error field
            if error.contains("hasn't returned any results") {
                return Ok(Vec::new());
            }
            return Err(AdvisorError::ApiError(error));
        }

        debug!(count = body.best_flights.len(), "Best flights received");
        Ok(body.best_flights)
    }
}
