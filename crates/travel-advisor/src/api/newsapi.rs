//! NewsAPI client for security, events and political news
//!
//! See: https://newsapi.org/docs/endpoints/everything

use super::{SharedRateLimiter, ensure_success, http_client, rate_limiter, send_error};
use crate::error::{AdvisorError, Result};
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

const NEWSAPI_BASE: &str = "https://newsapi.org/v2";
const SERVICE: &str = "NewsAPI";

/// A news record reduced to what the advisor reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub description: String,
}

impl NewsArticle {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Search parameters for one news query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsQuery {
    /// Free-text query
    pub query: String,
    /// How far back to search, in days
    pub lookback_days: i64,
    /// Maximum number of articles
    pub page_size: u32,
}

impl NewsQuery {
    pub fn new(query: impl Into<String>, lookback_days: i64, page_size: u32) -> Self {
        Self {
            query: query.into(),
            lookback_days,
            page_size,
        }
    }

    /// First day of the search window relative to `today`
    pub fn from_date(&self, today: NaiveDate) -> NaiveDate {
        today - ChronoDuration::days(self.lookback_days)
    }
}

/// News search service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Most recent English articles matching the query
    async fn search(&self, query: &NewsQuery) -> Result<Vec<NewsArticle>>;
}

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
struct RawArticle {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl From<RawArticle> for NewsArticle {
    fn from(raw: RawArticle) -> Self {
        Self {
            title: raw.title.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
        }
    }
}

/// NewsAPI client with rate limiting
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    base_url: String,
    rate_limiter: SharedRateLimiter,
}

impl NewsApiClient {
    /// Create a new NewsAPI client
    ///
    /// # Arguments
    /// * `api_key` - NewsAPI key
    /// * `timeout` - Per-request timeout
    /// * `per_minute` - Request quota (developer tier allows ~100 per day)
    pub fn new(api_key: impl Into<String>, timeout: Duration, per_minute: u32) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            api_key: api_key.into(),
            base_url: NEWSAPI_BASE.to_string(),
            rate_limiter: rate_limiter(per_minute),
        })
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    #[instrument(skip(self), fields(q = %query.query))]
    async fn search(&self, query: &NewsQuery) -> Result<Vec<NewsArticle>> {
        self.rate_limiter.until_ready().await;

        let from = query.from_date(Utc::now().date_naive()).format("%Y-%m-%d").to_string();
        let page_size = query.page_size.to_string();
        let response = self
            .client
            .get(format!("{}/everything", self.base_url))
            .header("X-Api-Key", &self.api_key)
            .query(&[
                ("q", query.query.as_str()),
                ("sortBy", "publishedAt"),
                ("pageSize", page_size.as_str()),
                ("language", "en"),
                ("from", from.as_str()),
            ])
            .send()
            .await
            .map_err(|e| send_error(SERVICE, e))?;

        let response = ensure_success(SERVICE, response).await?;
        let body: EverythingResponse = response
            .json()
            .await
            .map_err(|e| AdvisorError::ApiError(format!("Failed to parse NewsAPI response: {e}")))?;

        if body.status != "ok" {
            return Err(AdvisorError::ApiError(
                body.message.unwrap_or_else(|| format!("NewsAPI status {}", body.status)),
            ));
        }

        debug!(count = body.articles.len(), "NewsAPI articles received");
        Ok(body.articles.into_iter().map(NewsArticle::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_date() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let query = NewsQuery::new("Peru politics", 30, 5);
        assert_eq!(query.from_date(today), NaiveDate::from_ymd_opt(2025, 2, 8).unwrap());
    }

    #[test]
    fn test_null_fields_become_empty() {
        let json = r#"{
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {"title": "Border clashes escalate", "description": null},
                {"title": null, "description": "orphan"}
            ]
        }"#;
        let body: EverythingResponse = serde_json::from_str(json).unwrap();
        let articles: Vec<NewsArticle> = body.articles.into_iter().map(NewsArticle::from).collect();

        assert_eq!(articles[0], NewsArticle::new("Border clashes escalate", ""));
        assert_eq!(articles[1].title, "");
    }

    #[test]
    fn test_error_payload() {
        let json = r#"{"status": "error", "code": "apiKeyInvalid", "message": "Your API key is invalid"}"#;
        let body: EverythingResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.status, "error");
        assert_eq!(body.message.as_deref(), Some("Your API key is invalid"));
        assert!(body.articles.is_empty());
    }
}
