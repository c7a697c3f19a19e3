//! REST Countries directory client
//!
//! See: https://restcountries.com

use super::{ensure_success, http_client, send_error};
use crate::error::{AdvisorError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

const REST_COUNTRIES_BASE: &str = "https://restcountries.com/v3.1";
const SERVICE: &str = "REST Countries";

/// Country record as returned by the directory
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CountryRecord {
    pub name: CountryName,
    /// ISO 3166-1 alpha-2 code
    #[serde(default)]
    pub cca2: String,
    /// Currencies keyed by ISO 4217 code
    #[serde(default)]
    pub currencies: BTreeMap<String, Currency>,
    /// Language names keyed by ISO 639-3 code
    #[serde(default)]
    pub languages: BTreeMap<String, String>,
    #[serde(default)]
    pub region: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CountryName {
    pub common: String,
    #[serde(default)]
    pub official: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Currency {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
}

impl CountryRecord {
    /// First currency code, if any
    pub fn primary_currency(&self) -> Option<&str> {
        self.currencies.keys().next().map(String::as_str)
    }

    /// Up to `limit` language names
    pub fn language_names(&self, limit: usize) -> Vec<&str> {
        self.languages.values().take(limit).map(String::as_str).collect()
    }
}

/// Country lookup service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CountryDirectory: Send + Sync {
    /// Look a country up by name
    ///
    /// Exact name first, then a fuzzy match. `Ok(None)` when neither
    /// query returns a record.
    async fn lookup(&self, name: &str) -> Result<Option<CountryRecord>>;
}

/// REST Countries client
pub struct RestCountriesClient {
    client: Client,
    base_url: String,
}

impl RestCountriesClient {
    /// Create a new client with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            base_url: REST_COUNTRIES_BASE.to_string(),
        })
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn name_url(&self, name: &str, full_text: bool) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|()| AdvisorError::ConfigError(format!("invalid base URL {}", self.base_url)))?
            .pop_if_empty()
            .push("name")
            .push(name);
        if full_text {
            url.query_pairs_mut().append_pair("fullText", "true");
        }
        Ok(url)
    }

    async fn query(&self, name: &str, full_text: bool) -> Result<Vec<CountryRecord>> {
        let url = self.name_url(name, full_text)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| send_error(SERVICE, e))?;

        // The directory answers 404 when nothing matches
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }

        let response = ensure_success(SERVICE, response).await?;
        response
            .json::<Vec<CountryRecord>>()
            .await
            .map_err(|e| AdvisorError::ApiError(format!("Failed to parse REST Countries response: {e}")))
    }
}

#[async_trait]
impl CountryDirectory for RestCountriesClient {
    #[instrument(skip(self))]
    async fn lookup(&self, name: &str) -> Result<Option<CountryRecord>> {
        let exact = self.query(name, true).await?;
        if let Some(record) = exact.into_iter().next() {
            debug!(common = %record.name.common, "Exact directory match");
            return Ok(Some(record));
        }

        let fuzzy = self.query(name, false).await?;
        Ok(fuzzy.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_url_encodes_segment() {
        let client = RestCountriesClient::new(Duration::from_secs(5)).unwrap();
        let url = client.name_url("côte d'ivoire", true).unwrap();
        assert!(url.as_str().starts_with("https://restcountries.com/v3.1/name/c%C3%B4te%20d'ivoire"));
        assert!(url.as_str().ends_with("?fullText=true"));

        let url = client.name_url("peru", false).unwrap();
        assert_eq!(url.as_str(), "https://restcountries.com/v3.1/name/peru");
    }

    #[test]
    fn test_record_parsing() {
        let json = r#"[{
            "name": {"common": "Peru", "official": "Republic of Peru"},
            "cca2": "PE",
            "currencies": {"PEN": {"name": "Peruvian sol", "symbol": "S/ "}},
            "languages": {"aym": "Aymara", "que": "Quechua", "spa": "Spanish", "xxx": "Extra"},
            "region": "Americas"
        }]"#;
        let records: Vec<CountryRecord> = serde_json::from_str(json).unwrap();
        let peru = &records[0];

        assert_eq!(peru.name.common, "Peru");
        assert_eq!(peru.cca2, "PE");
        assert_eq!(peru.primary_currency(), Some("PEN"));
        assert_eq!(peru.language_names(3), vec!["Aymara", "Quechua", "Spanish"]);
        assert_eq!(peru.region, "Americas");
    }

    #[test]
    fn test_record_missing_optional_fields() {
        let json = r#"{"name": {"common": "Antarctica"}}"#;
        let record: CountryRecord = serde_json::from_str(json).unwrap();
        assert!(record.primary_currency().is_none());
        assert!(record.language_names(3).is_empty());
        assert!(record.cca2.is_empty());
    }
}
