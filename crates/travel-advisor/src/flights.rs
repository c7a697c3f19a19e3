//! Cheapest one-way flights for a round trip

use crate::api::{FlightOption, FlightQuery, FlightSearch};
use crate::error::Result;
use std::sync::Arc;
use tracing::{instrument, warn};

const MISSING_KEY: &str =
    "❌ SerpAPI key required. Set SERPAPI_API_KEY in your environment or .env file";

/// Round-trip flight request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTrip {
    pub departure_airport: String,
    pub arrival_airport: String,
    pub outbound_date: String,
    pub return_date: String,
    pub adults: u32,
    pub children: u32,
}

impl RoundTrip {
    fn outbound(&self) -> FlightQuery {
        FlightQuery {
            departure: self.departure_airport.to_uppercase(),
            arrival: self.arrival_airport.to_uppercase(),
            date: self.outbound_date.clone(),
            adults: self.adults,
            children: self.children,
        }
    }

    fn inbound(&self) -> FlightQuery {
        FlightQuery {
            departure: self.arrival_airport.to_uppercase(),
            arrival: self.departure_airport.to_uppercase(),
            date: self.return_date.clone(),
            adults: self.adults,
            children: self.children,
        }
    }
}

/// Lowest-priced option; unpriced options rank last
pub fn cheapest(options: &[FlightOption]) -> Option<&FlightOption> {
    options.iter().min_by_key(|o| o.price.unwrap_or(u32::MAX))
}

/// One line per leg summary of the first segment of an option
pub fn format_option(option: &FlightOption) -> String {
    let Some(segment) = option.flights.first() else {
        return "No flight segments found.".to_string();
    };

    let price = option
        .price
        .map_or_else(|| "unknown".to_string(), |p| format!("${p}"));
    format!(
        "From {} at {} → {} at {} | Duration: {}h {}m\nAirline: {} | Price: {price}",
        segment.departure_airport.id,
        segment.departure_airport.time,
        segment.arrival_airport.id,
        segment.arrival_airport.time,
        segment.duration / 60,
        segment.duration % 60,
        segment.airline.as_deref().unwrap_or("Unknown"),
    )
}

/// Finds and formats flights through a [`FlightSearch`] backend
#[derive(Clone, Default)]
pub struct FlightFinder {
    search: Option<Arc<dyn FlightSearch>>,
}

impl FlightFinder {
    pub fn new(search: Option<Arc<dyn FlightSearch>>) -> Self {
        Self { search }
    }

    /// Whether a flight backend is configured
    pub fn is_enabled(&self) -> bool {
        self.search.is_some()
    }

    /// Cheapest option for one leg, `None` when the search is empty
    pub async fn cheapest_one_way(&self, query: &FlightQuery) -> Result<Option<FlightOption>> {
        let Some(search) = &self.search else {
            return Ok(None);
        };
        let options = search.best_flights(query).await?;
        Ok(cheapest(&options).cloned())
    }

    /// Formatted cheapest flight for one leg
    #[instrument(skip(self), fields(from = %query.departure, to = %query.arrival))]
    pub async fn one_way(&self, query: &FlightQuery) -> String {
        if self.search.is_none() {
            return MISSING_KEY.to_string();
        }
        match self.cheapest_one_way(query).await {
            Ok(Some(option)) => format_option(&option),
            Ok(None) => "No flights found.".to_string(),
            Err(e) => {
                warn!("Flight search failed: {e}");
                format!("Error occurred: {e}")
            }
        }
    }

    /// Outbound and inbound legs in one text
    pub async fn round_trip(&self, trip: &RoundTrip) -> String {
        if self.search.is_none() {
            return MISSING_KEY.to_string();
        }
        let outbound = self.one_way(&trip.outbound()).await;
        let inbound = self.one_way(&trip.inbound()).await;
        format!("✈️ Outbound Flight:\n{outbound}\n\n🛬 Inbound Flight:\n{inbound}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::serpapi::{AirportTime, MockFlightSearch};
    use crate::api::FlightSegment;
    use crate::error::AdvisorError;

    fn option(price: Option<u32>, duration: u32) -> FlightOption {
        FlightOption {
            flights: vec![FlightSegment {
                departure_airport: AirportTime {
                    id: "CDG".to_string(),
                    name: String::new(),
                    time: "2025-06-01 10:15".to_string(),
                },
                arrival_airport: AirportTime {
                    id: "LIS".to_string(),
                    name: String::new(),
                    time: "2025-06-01 12:00".to_string(),
                },
                duration,
                airline: Some("TAP Air Portugal".to_string()),
            }],
            price,
        }
    }

    fn trip() -> RoundTrip {
        RoundTrip {
            departure_airport: "cdg".to_string(),
            arrival_airport: "lis".to_string(),
            outbound_date: "2025-06-01".to_string(),
            return_date: "2025-06-08".to_string(),
            adults: 2,
            children: 0,
        }
    }

    #[test]
    fn test_cheapest_ignores_unpriced() {
        let options = vec![option(None, 60), option(Some(300), 60), option(Some(120), 90)];
        assert_eq!(cheapest(&options).unwrap().price, Some(120));
        assert!(cheapest(&[]).is_none());
    }

    #[test]
    fn test_format_option() {
        assert_eq!(
            format_option(&option(Some(142), 165)),
            "From CDG at 2025-06-01 10:15 → LIS at 2025-06-01 12:00 | Duration: 2h 45m\nAirline: TAP Air Portugal | Price: $142"
        );
        let empty = FlightOption {
            flights: Vec::new(),
            price: Some(10),
        };
        assert_eq!(format_option(&empty), "No flight segments found.");
    }

    #[tokio::test]
    async fn test_round_trip_swaps_airports() {
        let mut search = MockFlightSearch::new();
        search
            .expect_best_flights()
            .withf(|q| q.departure == "CDG" && q.arrival == "LIS" && q.date == "2025-06-01" && q.adults == 2)
            .times(1)
            .returning(|_| Ok(vec![option(Some(142), 165)]));
        search
            .expect_best_flights()
            .withf(|q| q.departure == "LIS" && q.arrival == "CDG" && q.date == "2025-06-08")
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let finder = FlightFinder::new(Some(Arc::new(search)));
        let text = finder.round_trip(&trip()).await;

        assert!(text.starts_with("✈️ Outbound Flight:\nFrom CDG at 2025-06-01 10:15"));
        assert!(text.ends_with("🛬 Inbound Flight:\nNo flights found."));
    }

    #[tokio::test]
    async fn test_search_error_is_text() {
        let mut search = MockFlightSearch::new();
        search
            .expect_best_flights()
            .returning(|_| Err(AdvisorError::ApiError("Invalid API key".to_string())));

        let finder = FlightFinder::new(Some(Arc::new(search)));
        let query = trip().outbound();
        assert_eq!(finder.one_way(&query).await, "Error occurred: API error: Invalid API key");
    }

    #[tokio::test]
    async fn test_missing_backend() {
        let finder = FlightFinder::default();
        assert!(!finder.is_enabled());
        assert!(finder.round_trip(&trip()).await.contains("SERPAPI_API_KEY"));
    }
}
