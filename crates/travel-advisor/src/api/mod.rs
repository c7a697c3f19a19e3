//! Clients for the external JSON services
//!
//! Each service sits behind a small trait so the domain code can run against
//! stubs in tests. Clients own a `reqwest::Client` with a fixed timeout and
//! never retry.

pub mod nager;
pub mod newsapi;
pub mod openweather;
pub mod restcountries;
pub mod serpapi;

pub use nager::{Holiday, HolidaySource, NagerClient};
pub use newsapi::{NewsApiClient, NewsArticle, NewsQuery, NewsSource};
pub use openweather::{
    Condition, CurrentWeather, Forecast, ForecastCity, ForecastSlot, GeoLocation, MainReadings,
    OpenWeatherClient, WeatherSource, Wind,
};
pub use restcountries::{CountryDirectory, CountryRecord, RestCountriesClient};
pub use serpapi::{FlightOption, FlightQuery, FlightSearch, FlightSegment, SerpApiClient};

use crate::error::{AdvisorError, Result};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::{Client, Response};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

pub(crate) type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

pub(crate) fn rate_limiter(per_minute: u32) -> SharedRateLimiter {
    let rate = NonZeroU32::new(per_minute).unwrap_or(NonZeroU32::MIN);
    Arc::new(RateLimiter::direct(Quota::per_minute(rate)))
}

pub(crate) fn http_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Map a transport failure, keeping timeouts distinguishable
pub(crate) fn send_error(service: &'static str, err: reqwest::Error) -> AdvisorError {
    if err.is_timeout() {
        AdvisorError::Timeout { service }
    } else {
        AdvisorError::NetworkError(err)
    }
}

/// Turn non-2xx responses into errors
pub(crate) async fn ensure_success(service: &'static str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status.as_u16() {
        401 => Err(AdvisorError::Unauthorized { service }),
        429 => Err(AdvisorError::RateLimited { service }),
        code => {
            let body = response.text().await.unwrap_or_default();
            Err(AdvisorError::Http {
                service,
                status: code,
                body,
            })
        }
    }
}
