//! Wiring of clients, domain services and tools from an [`AdvisorConfig`]

use crate::api::{
    CountryDirectory, FlightSearch, HolidaySource, NagerClient, NewsApiClient, NewsSource,
    OpenWeatherClient, RestCountriesClient, SerpApiClient, WeatherSource,
};
use crate::config::AdvisorConfig;
use crate::country::CountryNormalizer;
use crate::error::Result;
use crate::flights::FlightFinder;
use crate::pipeline::TripPlanner;
use crate::report::ReportBuilder;
use crate::suggest::TravelSuggester;
use crate::tools::{
    CountryInfoTool, FlightsFinderTool, MoodToNeedTool, NeedToDestinationTool, WeatherTool,
};
use crate::weather::{ActivityRecommender, WeatherReporter};
use std::sync::Arc;
use tracing::info;
use travel_core::ToolRegistry;
use travel_llm::LLMProvider;
use travel_llm::providers::AnthropicProvider;

/// Service backends; `None` marks a backend without credentials
#[derive(Clone, Default)]
pub struct Backends {
    pub llm: Option<Arc<dyn LLMProvider>>,
    pub directory: Option<Arc<dyn CountryDirectory>>,
    pub news: Option<Arc<dyn NewsSource>>,
    pub holidays: Option<Arc<dyn HolidaySource>>,
    pub weather: Option<Arc<dyn WeatherSource>>,
    pub flights: Option<Arc<dyn FlightSearch>>,
}

impl Backends {
    /// HTTP clients for every service the configuration has keys for
    ///
    /// REST Countries and Nager.Date need no key and are always present.
    pub fn from_config(config: &AdvisorConfig) -> Result<Self> {
        let llm = match &config.anthropic_api_key {
            Some(key) => Some(Arc::new(AnthropicProvider::new(key.as_str())?) as Arc<dyn LLMProvider>),
            None => None,
        };
        let news = match &config.newsapi_key {
            Some(key) => Some(Arc::new(NewsApiClient::new(
                key.as_str(),
                config.request_timeout,
                config.news_requests_per_minute,
            )?) as Arc<dyn NewsSource>),
            None => None,
        };
        let weather = match &config.openweather_api_key {
            Some(key) => Some(Arc::new(OpenWeatherClient::new(key.as_str(), config.request_timeout)?)
                as Arc<dyn WeatherSource>),
            None => None,
        };
        let flights = match &config.serpapi_api_key {
            Some(key) => Some(Arc::new(SerpApiClient::new(key.as_str(), config.request_timeout)?)
                as Arc<dyn FlightSearch>),
            None => None,
        };

        info!(
            llm = llm.is_some(),
            news = news.is_some(),
            weather = weather.is_some(),
            flights = flights.is_some(),
            "Service backends configured"
        );

        Ok(Self {
            llm,
            directory: Some(Arc::new(RestCountriesClient::new(config.directory_timeout)?)),
            news,
            holidays: Some(Arc::new(NagerClient::new(config.request_timeout)?)),
            weather,
            flights,
        })
    }
}

/// The domain services behind the tools
#[derive(Clone)]
pub struct TravelServices {
    pub reports: ReportBuilder,
    pub weather: WeatherReporter,
    pub flights: FlightFinder,
    pub suggester: TravelSuggester,
}

impl TravelServices {
    /// Services backed by live HTTP clients
    pub fn from_config(config: &AdvisorConfig) -> Result<Self> {
        Ok(Self::with_backends(config, Backends::from_config(config)?))
    }

    /// Services over explicit backends
    pub fn with_backends(config: &AdvisorConfig, backends: Backends) -> Self {
        let normalizer = match backends.directory {
            Some(directory) => CountryNormalizer::new(directory),
            None => CountryNormalizer::offline(),
        };

        let mut reports = ReportBuilder::new(normalizer, backends.llm.clone(), &config.model);
        if let Some(news) = backends.news {
            reports = reports.with_news(news);
        }
        if let Some(holidays) = backends.holidays {
            reports = reports.with_holidays(holidays);
        }

        let recommender = ActivityRecommender::new(backends.llm.clone(), &config.model);
        Self {
            reports,
            weather: WeatherReporter::new(backends.weather, recommender),
            flights: FlightFinder::new(backends.flights),
            suggester: TravelSuggester::new(backends.llm, &config.model, &config.departure_airport),
        }
    }

    /// Register every travel tool
    pub fn register_tools(&self, registry: &ToolRegistry) {
        registry.register(Arc::new(CountryInfoTool::new(self.reports.clone())));
        registry.register(Arc::new(WeatherTool::new(self.weather.clone())));
        registry.register(Arc::new(FlightsFinderTool::new(self.flights.clone())));
        registry.register(Arc::new(MoodToNeedTool::new(self.suggester.clone())));
        registry.register(Arc::new(NeedToDestinationTool::new(self.suggester.clone())));
    }

    /// A registry holding every travel tool
    pub fn tool_registry(&self) -> ToolRegistry {
        let registry = ToolRegistry::new();
        self.register_tools(&registry);
        registry
    }

    /// Mood-to-trip pipeline over these services
    pub fn trip_planner(&self) -> TripPlanner {
        TripPlanner::new(
            self.suggester.clone(),
            self.weather.clone(),
            self.reports.clone(),
            self.flights.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::newsapi::MockNewsSource;
    use serde_json::json;

    #[test]
    fn test_registry_has_all_tools() {
        let services = TravelServices::with_backends(&AdvisorConfig::default(), Backends::default());
        let registry = services.tool_registry();
        let names: Vec<String> = registry.summaries().into_iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec!["country_info", "flights_finder", "mood_to_need", "need_to_destination", "weather_forecast"]
        );
    }

    #[test]
    fn test_keyless_backends() {
        let backends = Backends::from_config(&AdvisorConfig::default()).unwrap();
        assert!(backends.llm.is_none());
        assert!(backends.news.is_none());
        assert!(backends.weather.is_none());
        assert!(backends.flights.is_none());
        assert!(backends.directory.is_some());
        assert!(backends.holidays.is_some());
    }

    #[tokio::test]
    async fn test_tool_through_registry() {
        let mut news = MockNewsSource::new();
        news.expect_search().returning(|_| Ok(Vec::new()));
        let backends = Backends {
            news: Some(Arc::new(news)),
            ..Backends::default()
        };
        let services = TravelServices::with_backends(&AdvisorConfig::default(), backends);
        let registry = services.tool_registry();
        let result = registry
            .execute("country_info", json!({"country": "Ukraine", "info_type": "security"}))
            .await
            .unwrap();
        assert!(result.as_str().unwrap().contains("CHANGE DESTINATION"));
    }

    #[tokio::test]
    async fn test_keyless_security_needs_model() {
        let services = TravelServices::with_backends(&AdvisorConfig::default(), Backends::default());
        let result = services
            .tool_registry()
            .execute("country_info", json!({"country": "Ukraine", "info_type": "security"}))
            .await
            .unwrap();
        let text = result.as_str().unwrap();
        assert!(text.contains("⚪"));
        assert!(!text.contains("CHANGE DESTINATION"));
    }
}
