//! Configuration for the travel advisor

use crate::error::{AdvisorError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default model used for every language-model call
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";

/// Default departure airport for destination suggestions
pub const DEFAULT_DEPARTURE_AIRPORT: &str = "CDG";

pub const ANTHROPIC_API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
pub const NEWSAPI_KEY_ENV: &str = "NEWSAPI_KEY";
pub const OPENWEATHER_API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
pub const SERPAPI_API_KEY_ENV: &str = "SERPAPI_API_KEY";
pub const MODEL_ENV: &str = "TRAVEL_MODEL";
pub const DEPARTURE_AIRPORT_ENV: &str = "TRAVEL_DEPARTURE_AIRPORT";

/// Configuration for the travel advisor
///
/// Every API key is optional. A missing key disables the feature that needs
/// it; the tools report that as text instead of failing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorConfig {
    /// Anthropic model identifier
    pub model: String,

    /// IATA code used as the home airport for destination suggestions
    pub departure_airport: String,

    /// Timeout for country directory lookups
    pub directory_timeout: Duration,

    /// Timeout for news, weather, holiday and flight requests
    pub request_timeout: Duration,

    /// NewsAPI request quota (requests per minute)
    pub news_requests_per_minute: u32,

    /// Anthropic API key
    #[serde(default, skip_serializing)]
    pub anthropic_api_key: Option<String>,

    /// NewsAPI key
    #[serde(default, skip_serializing)]
    pub newsapi_key: Option<String>,

    /// OpenWeatherMap key
    #[serde(default, skip_serializing)]
    pub openweather_api_key: Option<String>,

    /// SerpAPI key
    #[serde(default, skip_serializing)]
    pub serpapi_api_key: Option<String>,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            departure_airport: DEFAULT_DEPARTURE_AIRPORT.to_string(),
            directory_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
            news_requests_per_minute: 30,
            anthropic_api_key: None,
            newsapi_key: None,
            openweather_api_key: None,
            serpapi_api_key: None,
        }
    }
}

impl AdvisorConfig {
    /// Create a new configuration builder
    pub fn builder() -> AdvisorConfigBuilder {
        AdvisorConfigBuilder::default()
    }

    /// Build a validated configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env().build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(AdvisorError::ConfigError(
                "model must not be empty".to_string(),
            ));
        }

        if !is_iata_code(&self.departure_airport) {
            return Err(AdvisorError::ConfigError(format!(
                "departure airport must be a 3-letter IATA code, got '{}'",
                self.departure_airport
            )));
        }

        if self.directory_timeout.is_zero() || self.request_timeout.is_zero() {
            return Err(AdvisorError::ConfigError(
                "timeouts must be greater than 0".to_string(),
            ));
        }

        if self.news_requests_per_minute == 0 {
            return Err(AdvisorError::ConfigError(
                "news_requests_per_minute must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Whether a language-model backend is configured
    pub fn has_llm(&self) -> bool {
        self.anthropic_api_key.is_some()
    }
}

fn is_iata_code(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_uppercase())
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Builder for AdvisorConfig
#[derive(Debug, Default)]
pub struct AdvisorConfigBuilder {
    model: Option<String>,
    departure_airport: Option<String>,
    directory_timeout: Option<Duration>,
    request_timeout: Option<Duration>,
    news_requests_per_minute: Option<u32>,
    anthropic_api_key: Option<String>,
    newsapi_key: Option<String>,
    openweather_api_key: Option<String>,
    serpapi_api_key: Option<String>,
}

impl AdvisorConfigBuilder {
    /// Set the model identifier
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the departure airport (upper-cased)
    pub fn departure_airport(mut self, code: impl Into<String>) -> Self {
        self.departure_airport = Some(code.into().trim().to_uppercase());
        self
    }

    /// Set the directory lookup timeout
    pub fn directory_timeout(mut self, duration: Duration) -> Self {
        self.directory_timeout = Some(duration);
        self
    }

    /// Set the data endpoint timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set the NewsAPI quota
    pub fn news_requests_per_minute(mut self, rate: u32) -> Self {
        self.news_requests_per_minute = Some(rate);
        self
    }

    /// Set the Anthropic API key
    pub fn anthropic_api_key(mut self, key: impl Into<String>) -> Self {
        self.anthropic_api_key = Some(key.into());
        self
    }

    /// Set the NewsAPI key
    pub fn newsapi_key(mut self, key: impl Into<String>) -> Self {
        self.newsapi_key = Some(key.into());
        self
    }

    /// Set the OpenWeatherMap key
    pub fn openweather_api_key(mut self, key: impl Into<String>) -> Self {
        self.openweather_api_key = Some(key.into());
        self
    }

    /// Set the SerpAPI key
    pub fn serpapi_api_key(mut self, key: impl Into<String>) -> Self {
        self.serpapi_api_key = Some(key.into());
        self
    }

    /// Fill unset fields from environment variables
    ///
    /// Values set explicitly on the builder win over the environment.
    pub fn with_env(mut self) -> Self {
        if self.model.is_none() {
            self.model = env_value(MODEL_ENV);
        }
        if self.departure_airport.is_none() {
            self.departure_airport = env_value(DEPARTURE_AIRPORT_ENV).map(|c| c.to_uppercase());
        }
        if self.anthropic_api_key.is_none() {
            self.anthropic_api_key = env_value(ANTHROPIC_API_KEY_ENV);
        }
        if self.newsapi_key.is_none() {
            self.newsapi_key = env_value(NEWSAPI_KEY_ENV);
        }
        if self.openweather_api_key.is_none() {
            self.openweather_api_key = env_value(OPENWEATHER_API_KEY_ENV);
        }
        if self.serpapi_api_key.is_none() {
            self.serpapi_api_key = env_value(SERPAPI_API_KEY_ENV);
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AdvisorConfig> {
        let defaults = AdvisorConfig::default();

        let config = AdvisorConfig {
            model: self.model.unwrap_or(defaults.model),
            departure_airport: self.departure_airport.unwrap_or(defaults.departure_airport),
            directory_timeout: self.directory_timeout.unwrap_or(defaults.directory_timeout),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            news_requests_per_minute: self
                .news_requests_per_minute
                .unwrap_or(defaults.news_requests_per_minute),
            anthropic_api_key: self.anthropic_api_key,
            newsapi_key: self.newsapi_key,
            openweather_api_key: self.openweather_api_key,
            serpapi_api_key: self.serpapi_api_key,
        };

        config.validate()?;
        Ok(config)
    }
}
