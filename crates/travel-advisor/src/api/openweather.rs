//! OpenWeatherMap client: geocoding, current conditions and 5-day forecast
//!
//! See: https://openweathermap.org/api

use super::{ensure_success, http_client, send_error};
use crate::error::{AdvisorError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

const OPENWEATHER_BASE: &str = "https://api.openweathermap.org";
const SERVICE: &str = "OpenWeatherMap";

/// Geocoding result
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeoLocation {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// ISO alpha-2 country code
    #[serde(default)]
    pub country: String,
}

/// Weather condition descriptor
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Condition {
    /// Group name ("Rain", "Clear", ...)
    #[serde(default)]
    pub main: String,
    pub description: String,
}

/// Core readings, metric units
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub pressure: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Wind {
    #[serde(default)]
    pub speed: Option<f64>,
    #[serde(default)]
    pub deg: Option<f64>,
}

/// `data/2.5/weather` payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CurrentWeather {
    pub weather: Vec<Condition>,
    pub main: MainReadings,
    #[serde(default)]
    pub wind: Option<Wind>,
    /// Metres
    #[serde(default)]
    pub visibility: Option<f64>,
}

/// One 3-hour forecast slot
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastSlot {
    /// Unix timestamp, UTC
    pub dt: i64,
    pub weather: Vec<Condition>,
    pub main: MainReadings,
    #[serde(default)]
    pub wind: Option<Wind>,
    #[serde(default)]
    pub visibility: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ForecastCity {
    #[serde(default)]
    pub name: String,
    /// Shift from UTC in seconds
    #[serde(default)]
    pub timezone: i32,
}

/// `data/2.5/forecast` payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Forecast {
    pub list: Vec<ForecastSlot>,
    #[serde(default)]
    pub city: ForecastCity,
}

/// Weather data service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Best geocoding match for a place name
    async fn geocode(&self, location: &str) -> Result<Option<GeoLocation>>;

    /// Current conditions at a coordinate
    async fn current(&self, lat: f64, lon: f64) -> Result<CurrentWeather>;

    /// 5-day / 3-hour forecast at a coordinate
    async fn forecast(&self, lat: f64, lon: f64) -> Result<Forecast>;
}

/// OpenWeatherMap client
pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            api_key: api_key.into(),
            base_url: OPENWEATHER_BASE.to_string(),
        })
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> Result<T> {
        let response = self
            .client
            .get(format!("{}/{path}", self.base_url))
            .query(params)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| send_error(SERVICE, e))?;

        let response = ensure_success(SERVICE, response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| AdvisorError::ApiError(format!("Failed to parse OpenWeatherMap response: {e}")))
    }

    fn coordinates(lat: f64, lon: f64) -> Vec<(&'static str, String)> {
        vec![
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("units", "metric".to_string()),
        ]
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn geocode(&self, location: &str) -> Result<Option<GeoLocation>> {
        let matches: Vec<GeoLocation> = self
            .get_json(
                "geo/1.0/direct",
                &[("q", location.to_string()), ("limit", "1".to_string())],
            )
            .await?;
        debug!(found = !matches.is_empty(), "Geocoding done");
        Ok(matches.into_iter().next())
    }

    #[instrument(skip(self))]
    async fn current(&self, lat: f64, lon: f64) -> Result<CurrentWeather> {
        self.get_json("data/2.5/weather", &Self::coordinates(lat, lon))
            .await
    }

    #[instrument(skip(self))]
    async fn forecast(&self, lat: f64, lon: f64) -> Result<Forecast> {
        self.get_json("data/2.5/forecast", &Self::coordinates(lat, lon))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_payload() {
        let json = r#"{
            "coord": {"lon": 7.27, "lat": 43.7},
            "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
            "main": {"temp": 28.3, "feels_like": 29.1, "temp_min": 27.0, "temp_max": 29.0, "pressure": 1014, "humidity": 40},
            "visibility": 10000,
            "wind": {"speed": 3.6, "deg": 200},
            "name": "Nice"
        }"#;
        let current: CurrentWeather = serde_json::from_str(json).unwrap();
        assert_eq!(current.weather[0].main, "Clear");
        assert!((current.main.temp - 28.3).abs() < f64::EPSILON);
        assert_eq!(current.visibility, Some(10000.0));
        assert_eq!(current.wind.unwrap().deg, Some(200.0));
    }

    #[test]
    fn test_forecast_payload() {
        let json = r#"{
            "cod": "200",
            "list": [{
                "dt": 1717405200,
                "main": {"temp": 12.5, "feels_like": 11.0, "pressure": 1008, "humidity": 81},
                "weather": [{"main": "Rain", "description": "light rain"}]
            }],
            "city": {"name": "Chamonix", "timezone": 7200}
        }"#;
        let forecast: Forecast = serde_json::from_str(json).unwrap();
        assert_eq!(forecast.list.len(), 1);
        assert!(forecast.list[0].wind.is_none());
        assert_eq!(forecast.city.timezone, 7200);
    }

    #[test]
    fn test_geocode_payload() {
        let json = r#"[{"name": "Tokyo", "lat": 35.68, "lon": 139.76, "country": "JP", "local_names": {}}]"#;
        let found: Vec<GeoLocation> = serde_json::from_str(json).unwrap();
        assert_eq!(found[0].country, "JP");
    }
}
