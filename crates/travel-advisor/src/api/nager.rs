//! Nager.Date public holiday client
//!
//! See: https://date.nager.at/Api

use super::{ensure_success, http_client, send_error};
use crate::error::{AdvisorError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

const NAGER_BASE: &str = "https://date.nager.at/api/v3";
const SERVICE: &str = "Nager.Date";

/// A public holiday
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    pub date: NaiveDate,
    /// Name in the local language
    #[serde(default)]
    pub local_name: String,
    /// English name
    pub name: String,
}

/// Public holiday calendar
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HolidaySource: Send + Sync {
    /// Public holidays for one year in the country with the given ISO alpha-2 code
    async fn public_holidays(&self, year: i32, country_code: &str) -> Result<Vec<Holiday>>;
}

/// Nager.Date client
pub struct NagerClient {
    client: Client,
    base_url: String,
}

impl NagerClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            base_url: NAGER_BASE.to_string(),
        })
    }

    /// Override the API base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl HolidaySource for NagerClient {
    #[instrument(skip(self))]
    async fn public_holidays(&self, year: i32, country_code: &str) -> Result<Vec<Holiday>> {
        let response = self
            .client
            .get(format!("{}/PublicHolidays/{year}/{country_code}", self.base_url))
            .send()
            .await
            .map_err(|e| send_error(SERVICE, e))?;

        // Unsupported countries answer 204 or 404
        if matches!(response.status(), StatusCode::NO_CONTENT | StatusCode::NOT_FOUND) {
            return Ok(Vec::new());
        }

        let response = ensure_success(SERVICE, response).await?;
        response
            .json::<Vec<Holiday>>()
            .await
            .map_err(|e| AdvisorError::ApiError(format!("Failed to parse Nager.Date response: {e}")))
    }
}
