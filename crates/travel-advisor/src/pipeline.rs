//! Mood to trip: a fixed linear pipeline over the travel services
//!
//! mood → need → destinations → for each destination: weather, security,
//! flights. A failing need or destination stage ends the plan; failures in
//! the per-destination stages are embedded in that destination's text.

use crate::error::Result;
use crate::flights::{FlightFinder, RoundTrip};
use crate::report::ReportBuilder;
use crate::suggest::{DestinationSuggestion, TravelSuggester};
use crate::weather::WeatherReporter;
use chrono::{Local, NaiveDate};
use std::fmt::Write as _;
use tracing::{info, instrument};

/// Everything gathered for one suggested destination
#[derive(Debug, Clone)]
pub struct PlannedStop {
    pub suggestion: DestinationSuggestion,
    pub weather: String,
    pub security: String,
    pub flights: String,
}

/// A finished plan
#[derive(Debug, Clone)]
pub struct TripPlan {
    pub mood: String,
    pub need: String,
    pub stops: Vec<PlannedStop>,
}

impl TripPlan {
    pub fn render(&self) -> String {
        let mut out = format!(
            "🧭 **Trip plan**\nMood: {}\nNeed: {}",
            self.mood, self.need
        );
        if self.stops.is_empty() {
            out.push_str("\n\nNo destinations suggested.");
        }
        for (i, stop) in self.stops.iter().enumerate() {
            let s = &stop.suggestion;
            let _ = write!(
                out,
                "\n\n## {}. {} ({} → {}, {} to {})\n\n{}\n\n{}\n\n{}",
                i + 1,
                s.destination,
                s.departure.from_airport,
                s.departure.to_airport,
                s.departure.date,
                s.return_leg.date,
                stop.weather.trim_end(),
                stop.security,
                stop.flights,
            );
        }
        out
    }
}

/// Runs the mood-to-trip pipeline
#[derive(Clone)]
pub struct TripPlanner {
    suggester: TravelSuggester,
    weather: WeatherReporter,
    reports: ReportBuilder,
    flights: FlightFinder,
}

impl TripPlanner {
    pub fn new(
        suggester: TravelSuggester,
        weather: WeatherReporter,
        reports: ReportBuilder,
        flights: FlightFinder,
    ) -> Self {
        Self {
            suggester,
            weather,
            reports,
            flights,
        }
    }

    /// Plan a trip from a mood, as text
    pub async fn plan_text(&self, mood: &str) -> String {
        match self.plan(mood).await {
            Ok(plan) => plan.render(),
            Err(e) => format!("❌ {e}"),
        }
    }

    /// Plan a trip from a mood
    pub async fn plan(&self, mood: &str) -> Result<TripPlan> {
        self.plan_as_of(mood, Local::now().date_naive()).await
    }

    /// Same as [`plan`](Self::plan) with an explicit notion of today
    #[instrument(skip(self))]
    pub async fn plan_as_of(&self, mood: &str, today: NaiveDate) -> Result<TripPlan> {
        let need = self.suggester.mood_to_need(mood).await?;
        let suggestions = self.suggester.destinations_for(&need, Some(today)).await?;
        info!(%need, destinations = suggestions.len(), "Destinations suggested");

        let mut stops = Vec::with_capacity(suggestions.len());
        for suggestion in suggestions {
            stops.push(self.stop(suggestion, today).await);
        }

        Ok(TripPlan {
            mood: mood.trim().to_string(),
            need,
            stops,
        })
    }

    async fn stop(&self, suggestion: DestinationSuggestion, today: NaiveDate) -> PlannedStop {
        let trip = RoundTrip {
            departure_airport: suggestion.departure.from_airport.clone(),
            arrival_airport: suggestion.departure.to_airport.clone(),
            outbound_date: suggestion.departure.date.clone(),
            return_date: suggestion.return_leg.date.clone(),
            adults: 1,
            children: 0,
        };

        let weather = self.weather.report_as_of(
            &suggestion.destination,
            Some(&suggestion.departure.date),
            None,
            today,
        );
        let security = self.security(&suggestion.destination);
        let flights = self.flights.round_trip(&trip);
        let (weather, security, flights) = tokio::join!(weather, security, flights);

        PlannedStop {
            suggestion,
            weather,
            security,
            flights,
        }
    }

    async fn security(&self, destination: &str) -> String {
        let country = self
            .reports
            .resolve_country(destination)
            .await
            .unwrap_or_else(|| destination.to_string());
        self.reports.security_section(&country).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::newsapi::MockNewsSource;
    use crate::country::CountryNormalizer;
    use crate::test_support::{MockProvider, reply};
    use crate::weather::ActivityRecommender;
    use std::sync::Arc;

    const DESTINATIONS: &str = r#"[
      {"destination": "Ukraine",
       "departure": {"date": "2025-06-01", "from_airport": "CDG", "to_airport": "KBP"},
       "return": {"date": "2025-06-08", "from_airport": "KBP", "to_airport": "CDG"}}
    ]"#;

    fn planner(provider: MockProvider) -> TripPlanner {
        let llm: Arc<dyn travel_llm::LLMProvider> = Arc::new(provider);
        let mut news = MockNewsSource::new();
        news.expect_search().returning(|_| Ok(Vec::new()));
        TripPlanner::new(
            TravelSuggester::new(Some(Arc::clone(&llm)), "m", "CDG"),
            WeatherReporter::new(None, ActivityRecommender::new(None, "m")),
            ReportBuilder::new(CountryNormalizer::offline(), None, "m").with_news(Arc::new(news)),
            FlightFinder::default(),
        )
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 20).unwrap()
    }

    #[tokio::test]
    async fn test_plan_embeds_stage_failures() {
        let mut provider = MockProvider::new();
        provider.expect_name().return_const("mock".to_string());
        provider.expect_complete().returning(|request| {
            if request.messages[0].text().unwrap_or_default().contains("Mood:") {
                Ok(reply("A change of scenery"))
            } else {
                Ok(reply(DESTINATIONS))
            }
        });

        let plan = planner(provider).plan_as_of("stuck in a routine", today()).await.unwrap();
        assert_eq!(plan.need, "A change of scenery");
        assert_eq!(plan.stops.len(), 1);

        let stop = &plan.stops[0];
        assert!(stop.weather.contains("OPENWEATHER_API_KEY"));
        assert!(stop.security.contains("🔴"));
        assert!(stop.flights.contains("SERPAPI_API_KEY"));

        let text = plan.render();
        assert!(text.starts_with("🧭 **Trip plan**\nMood: stuck in a routine\nNeed: A change of scenery"));
        assert!(text.contains("## 1. Ukraine (CDG → KBP, 2025-06-01 to 2025-06-08)"));
    }

    #[tokio::test]
    async fn test_unparseable_destinations_end_plan() {
        let mut provider = MockProvider::new();
        provider.expect_name().return_const("mock".to_string());
        provider.expect_complete().returning(|request| {
            if request.messages[0].text().unwrap_or_default().contains("Mood:") {
                Ok(reply("Adventure"))
            } else {
                Ok(reply("no json"))
            }
        });

        let text = planner(provider).plan_text("bored").await;
        assert!(text.starts_with("❌ Could not parse model output"));
    }
}
