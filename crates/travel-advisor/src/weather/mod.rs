//! Weather conditions, forecast windows and activity suitability

pub mod activity;
pub mod formatter;
pub mod reporter;

pub use activity::{ActivityRating, ActivityRecommendation, ActivityRecommender, ActivityType};
pub use formatter::{DateError, DateWindow, WeatherSnapshot, classify_date, wind_direction};
pub use reporter::WeatherReporter;
