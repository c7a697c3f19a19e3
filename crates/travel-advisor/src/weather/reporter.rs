//! Weather lookups end to end: geocoding, conditions, activity advice

use super::activity::{ActivityRecommender, ActivityType};
use super::formatter::{DateWindow, classify_date, format_current, format_forecast};
use crate::api::{GeoLocation, WeatherSource};
use crate::error::{AdvisorError, Result};
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tracing::{info, instrument};

const MISSING_KEY: &str = "❌ OpenWeatherMap API key required. Set OPENWEATHER_API_KEY in your \
     environment or .env file (free key at https://openweathermap.org/api)";

/// User-facing text for a weather service failure
pub fn error_message(err: &AdvisorError) -> String {
    match err {
        AdvisorError::Unauthorized { .. } => "❌ Error 401: Invalid or inactive OpenWeatherMap API key. \
             New keys can take a few hours to activate."
            .to_string(),
        AdvisorError::RateLimited { .. } => {
            "❌ Error 429: Request limit exceeded. Wait before trying again.".to_string()
        }
        AdvisorError::Timeout { .. } => "❌ Request timed out. Please try again.".to_string(),
        AdvisorError::Http { status, body, .. } => format!("❌ HTTP error {status}: {body}"),
        other => format!("❌ Request error: {other}"),
    }
}

/// Produces the weather report returned by the weather tool
#[derive(Clone)]
pub struct WeatherReporter {
    source: Option<Arc<dyn WeatherSource>>,
    recommender: ActivityRecommender,
}

impl WeatherReporter {
    pub fn new(source: Option<Arc<dyn WeatherSource>>, recommender: ActivityRecommender) -> Self {
        Self {
            source,
            recommender,
        }
    }

    /// Weather report for a place, optionally on a date and for an activity
    pub async fn report(&self, location: &str, date: Option<&str>, activity: Option<&str>) -> String {
        self.report_as_of(location, date, activity, Local::now().date_naive())
            .await
    }

    /// Same as [`report`](Self::report) with an explicit notion of today
    #[instrument(skip(self))]
    pub async fn report_as_of(
        &self,
        location: &str,
        date: Option<&str>,
        activity: Option<&str>,
        today: NaiveDate,
    ) -> String {
        let Some(source) = &self.source else {
            return MISSING_KEY.to_string();
        };

        let window = match classify_date(date, today) {
            Ok(window) => window,
            Err(e) => return e.to_string(),
        };

        let place = match source.geocode(location).await {
            Ok(Some(place)) => place,
            Ok(None) => {
                return format!(
                    "❌ Location '{location}' not found. Try a more specific city or country name."
                );
            }
            Err(e) => return error_message(&e),
        };

        let weather = match Self::conditions(source.as_ref(), &place, window).await {
            Ok(text) => text,
            Err(e) => return error_message(&e),
        };
        info!(place = %place.name, "Weather retrieved");

        let explicit = activity.and_then(ActivityType::parse);
        let detected = explicit.is_none();
        let Some(activity) = explicit.or_else(|| ActivityType::detect(location)) else {
            return weather;
        };

        let target = match window {
            DateWindow::Current => None,
            DateWindow::Forecast(date) => Some(date),
        };
        let Some(recommendation) = self
            .recommender
            .recommend(&weather, &activity, location, target)
            .await
        else {
            return weather;
        };

        let mut out = weather.trim_end().to_string();
        if detected {
            out.push_str(&format!("\n\n💡 *Detected activity: {activity}*"));
        }
        out.push_str("\n\n");
        out.push_str(&recommendation.render());
        out
    }

    async fn conditions(
        source: &dyn WeatherSource,
        place: &GeoLocation,
        window: DateWindow,
    ) -> Result<String> {
        match window {
            DateWindow::Current => {
                let current = source.current(place.lat, place.lon).await?;
                Ok(format_current(place, &current))
            }
            DateWindow::Forecast(date) => {
                let forecast = source.forecast(place.lat, place.lon).await?;
                Ok(format_forecast(place, &forecast, date))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::openweather::MockWeatherSource;
    use crate::api::{Condition, CurrentWeather, Forecast, ForecastCity, MainReadings};
    use crate::test_support::provider_replying;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn place(name: &str) -> GeoLocation {
        GeoLocation {
            name: name.to_string(),
            lat: 1.0,
            lon: 2.0,
            country: "FR".to_string(),
        }
    }

    fn current() -> CurrentWeather {
        CurrentWeather {
            weather: vec![Condition {
                main: "Clear".to_string(),
                description: "clear sky".to_string(),
            }],
            main: MainReadings {
                temp: 28.3,
                feels_like: 29.0,
                humidity: 40.0,
                pressure: 1012.0,
            },
            wind: None,
            visibility: None,
        }
    }

    fn offline_recommender() -> ActivityRecommender {
        ActivityRecommender::new(None, "m")
    }

    #[tokio::test]
    async fn test_missing_key() {
        let reporter = WeatherReporter::new(None, offline_recommender());
        let text = reporter.report_as_of("Paris", None, None, today()).await;
        assert!(text.contains("OPENWEATHER_API_KEY"));
    }

    #[tokio::test]
    async fn test_current_conditions() {
        let mut source = MockWeatherSource::new();
        source
            .expect_geocode()
            .returning(|name| Ok(Some(place(name))));
        source.expect_current().times(1).returning(|_, _| Ok(current()));
        source.expect_forecast().never();

        let reporter = WeatherReporter::new(Some(Arc::new(source)), offline_recommender());
        let text = reporter.report_as_of("Lyon", Some("2025-06-01"), None, today()).await;
        assert!(text.contains("28.3°C"));
        assert!(text.contains("40%"));
    }

    #[tokio::test]
    async fn test_forecast_five_days_ahead() {
        let mut source = MockWeatherSource::new();
        source
            .expect_geocode()
            .returning(|name| Ok(Some(place(name))));
        source.expect_current().never();
        source.expect_forecast().times(1).returning(|_, _| {
            Ok(Forecast {
                list: Vec::new(),
                city: ForecastCity::default(),
            })
        });

        let reporter = WeatherReporter::new(Some(Arc::new(source)), offline_recommender());
        let text = reporter.report_as_of("Lyon", Some("2025-06-06"), None, today()).await;
        assert_eq!(text, "No forecast available for 2025-06-06");
    }

    #[tokio::test]
    async fn test_six_days_ahead_rejected_before_any_call() {
        let mut source = MockWeatherSource::new();
        source.expect_geocode().never();

        let reporter = WeatherReporter::new(Some(Arc::new(source)), offline_recommender());
        let text = reporter.report_as_of("Lyon", Some("2025-06-07"), None, today()).await;
        assert!(text.contains("only available up to 5 days ahead"));
    }

    #[tokio::test]
    async fn test_location_not_found() {
        let mut source = MockWeatherSource::new();
        source.expect_geocode().returning(|_| Ok(None));

        let reporter = WeatherReporter::new(Some(Arc::new(source)), offline_recommender());
        let text = reporter.report_as_of("Nowhereville", None, None, today()).await;
        assert!(text.contains("Location 'Nowhereville' not found"));
    }

    #[tokio::test]
    async fn test_dedicated_error_messages() {
        let mut source = MockWeatherSource::new();
        source.expect_geocode().returning(|_| {
            Err(AdvisorError::Unauthorized {
                service: "OpenWeatherMap",
            })
        });

        let reporter = WeatherReporter::new(Some(Arc::new(source)), offline_recommender());
        let text = reporter.report_as_of("Paris", None, None, today()).await;
        assert!(text.starts_with("❌ Error 401"));

        let timeout = error_message(&AdvisorError::Timeout {
            service: "OpenWeatherMap",
        });
        assert_eq!(timeout, "❌ Request timed out. Please try again.");
        assert!(error_message(&AdvisorError::RateLimited { service: "x" }).contains("429"));
    }

    #[tokio::test]
    async fn test_detected_activity_recommendation() {
        let mut source = MockWeatherSource::new();
        source
            .expect_geocode()
            .returning(|name| Ok(Some(place(name))));
        source.expect_current().returning(|_, _| Ok(current()));

        let provider = provider_replying(r#"{"rating": "IDEAL", "advice": "Perfect beach day."}"#);

        let recommender = ActivityRecommender::new(Some(Arc::new(provider)), "m");
        let reporter = WeatherReporter::new(Some(Arc::new(source)), recommender);
        let text = reporter.report_as_of("Biarritz", None, None, today()).await;

        assert!(text.contains("💡 *Detected activity: beach*"));
        assert!(text.contains("✅ IDEAL"));
        assert!(text.ends_with("Perfect beach day."));
    }
}
