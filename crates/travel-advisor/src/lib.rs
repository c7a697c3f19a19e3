//! Travel recommendation services
//!
//! This crate turns free-text travel questions into ready-to-read reports:
//!
//! - Country reports: security verdict, events, holidays, practical travel
//!   information and political context
//! - Weather for a place and date, with advice for the planned activity
//! - Cheapest round-trip flights
//! - Mood to travel need, need to destinations, and a trip planner chaining
//!   them with weather, security and flights
//!
//! External services (REST Countries, NewsAPI, OpenWeatherMap, Nager.Date,
//! SerpAPI, Anthropic) sit behind traits in [`api`] and `travel_llm`, so
//! every component runs against stubs. A missing API key disables the
//! feature that needs it; nothing panics or fails hard on missing keys.
//!
//! # Example
//!
//! ```rust,no_run
//! use travel_advisor::{AdvisorConfig, TravelServices};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = AdvisorConfig::from_env()?;
//!     let services = TravelServices::from_config(&config)?;
//!
//!     let report = services.reports.build("Japon", "all").await;
//!     println!("{report}");
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod country;
pub mod error;
pub mod flights;
mod model_output;
pub mod pipeline;
pub mod prompts;
pub mod report;
pub mod security;
pub mod services;
pub mod suggest;
pub mod tools;
pub mod weather;

#[cfg(test)]
mod test_support;

pub use config::AdvisorConfig;
pub use country::{CountryNormalizer, RiskTier, classify_risk};
pub use error::{AdvisorError, Result};
pub use flights::{FlightFinder, RoundTrip};
pub use pipeline::{TripPlan, TripPlanner};
pub use report::{InfoType, ReportBuilder};
pub use security::{SecurityAnalyzer, SecurityLevel, SecurityVerdict};
pub use services::{Backends, TravelServices};
pub use suggest::{DestinationSuggestion, TravelSuggester};
pub use weather::WeatherReporter;
