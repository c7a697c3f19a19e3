//! Weather formatting and date-window rules

use crate::api::{Condition, CurrentWeather, Forecast, ForecastSlot, GeoLocation, MainReadings, Wind};
use crate::country::title_case;
use chrono::{DateTime, NaiveDate};
use std::fmt::Write as _;
use thiserror::Error;

/// Forecasts reach this many days ahead
pub const MAX_FORECAST_DAYS: i64 = 5;

const COMPASS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// 16-point compass direction for a bearing in degrees
pub fn wind_direction(degrees: f64) -> &'static str {
    let index = (degrees / 22.5).round().rem_euclid(16.0) as usize;
    COMPASS[index % 16]
}

/// Which endpoint serves a requested date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow {
    /// No date, or today
    Current,
    /// 1 to 5 days ahead
    Forecast(NaiveDate),
}

/// Requested date outside what the service can answer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("❌ Invalid date format '{0}'. Use YYYY-MM-DD (e.g., 2025-01-15)")]
    InvalidFormat(String),

    #[error("❌ {0} is in the past. Weather is available for today and the next 5 days only")]
    Past(NaiveDate),

    #[error("❌ Forecasts are only available up to 5 days ahead ({date} is {days} days away)")]
    OutOfRange { date: NaiveDate, days: i64 },
}

/// Classify a requested `YYYY-MM-DD` date relative to `today`
pub fn classify_date(date: Option<&str>, today: NaiveDate) -> Result<DateWindow, DateError> {
    let Some(raw) = date.map(str::trim).filter(|d| !d.is_empty()) else {
        return Ok(DateWindow::Current);
    };

    let target = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| DateError::InvalidFormat(raw.to_string()))?;
    let days = (target - today).num_days();

    match days {
        0 => Ok(DateWindow::Current),
        d if d < 0 => Err(DateError::Past(target)),
        d if d > MAX_FORECAST_DAYS => Err(DateError::OutOfRange { date: target, days: d }),
        _ => Ok(DateWindow::Forecast(target)),
    }
}

/// Conditions at one point in time, metric units
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub conditions: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub pressure: f64,
    /// m/s
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<&'static str>,
    /// Kilometres
    pub visibility_km: Option<f64>,
}

impl WeatherSnapshot {
    fn from_parts(
        weather: &[Condition],
        main: &MainReadings,
        wind: Option<&Wind>,
        visibility: Option<f64>,
    ) -> Self {
        let conditions = weather
            .first()
            .map(|c| title_case(&c.description))
            .unwrap_or_else(|| "Unknown".to_string());

        Self {
            conditions,
            temperature: main.temp,
            feels_like: main.feels_like,
            humidity: main.humidity,
            pressure: main.pressure,
            wind_speed: wind.and_then(|w| w.speed),
            wind_direction: wind.and_then(|w| w.deg).map(wind_direction),
            visibility_km: visibility.map(|m| m / 1000.0),
        }
    }

    fn wind_text(&self) -> Option<String> {
        self.wind_speed.map(|speed| match self.wind_direction {
            Some(dir) => format!("{speed} m/s ({dir})"),
            None => format!("{speed} m/s"),
        })
    }
}

impl From<&CurrentWeather> for WeatherSnapshot {
    fn from(current: &CurrentWeather) -> Self {
        Self::from_parts(&current.weather, &current.main, current.wind.as_ref(), current.visibility)
    }
}

impl From<&ForecastSlot> for WeatherSnapshot {
    fn from(slot: &ForecastSlot) -> Self {
        Self::from_parts(&slot.weather, &slot.main, slot.wind.as_ref(), slot.visibility)
    }
}

fn place_name(place: &GeoLocation) -> String {
    if place.country.is_empty() {
        place.name.clone()
    } else {
        format!("{}, {}", place.name, place.country)
    }
}

/// Current-conditions block
pub fn format_current(place: &GeoLocation, current: &CurrentWeather) -> String {
    let snapshot = WeatherSnapshot::from(current);
    let mut out = format!("🌤️ **Current weather for {}**\n\n", place_name(place));
    let _ = writeln!(out, "**Conditions:** {}", snapshot.conditions);
    let _ = writeln!(
        out,
        "**Temperature:** {:.1}°C (feels like: {:.1}°C)",
        snapshot.temperature, snapshot.feels_like
    );
    let _ = writeln!(out, "**Humidity:** {}%", snapshot.humidity);
    let _ = writeln!(out, "**Pressure:** {} hPa", snapshot.pressure);
    if let Some(wind) = snapshot.wind_text() {
        let _ = writeln!(out, "**Wind:** {wind}");
    }
    if let Some(km) = snapshot.visibility_km {
        let _ = writeln!(out, "**Visibility:** {km:.1} km");
    }
    out
}

/// Slots falling on `date` in the city's local time, with their local `HH:MM`
pub fn slots_on(forecast: &Forecast, date: NaiveDate) -> Vec<(String, &ForecastSlot)> {
    let offset = i64::from(forecast.city.timezone);
    forecast
        .list
        .iter()
        .filter_map(|slot| {
            let local = DateTime::from_timestamp(slot.dt + offset, 0)?.naive_utc();
            (local.date() == date).then(|| (local.format("%H:%M").to_string(), slot))
        })
        .collect()
}

/// Forecast block for one date
pub fn format_forecast(place: &GeoLocation, forecast: &Forecast, date: NaiveDate) -> String {
    let slots = slots_on(forecast, date);
    if slots.is_empty() {
        return format!("No forecast available for {date}");
    }

    let mut blocks = Vec::with_capacity(slots.len());
    for (time, slot) in slots {
        let snapshot = WeatherSnapshot::from(slot);
        let mut block = format!("**{time}:**\n");
        let _ = writeln!(block, "  • Conditions: {}", snapshot.conditions);
        let _ = writeln!(
            block,
            "  • Temperature: {:.1}°C (feels like: {:.1}°C)",
            snapshot.temperature, snapshot.feels_like
        );
        let _ = writeln!(block, "  • Humidity: {}%", snapshot.humidity);
        if let Some(wind) = snapshot.wind_text() {
            let _ = writeln!(block, "  • Wind: {wind}");
        }
        blocks.push(block);
    }

    format!(
        "🌤️ **Weather forecast for {} - {date}**\n\n{}",
        place_name(place),
        blocks.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ForecastCity;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn nice() -> GeoLocation {
        GeoLocation {
            name: "Nice".to_string(),
            lat: 43.7,
            lon: 7.27,
            country: "FR".to_string(),
        }
    }

    fn readings(temp: f64) -> MainReadings {
        MainReadings {
            temp,
            feels_like: temp - 1.0,
            humidity: 40.0,
            pressure: 1014.0,
        }
    }

    fn clear() -> Vec<Condition> {
        vec![Condition {
            main: "Clear".to_string(),
            description: "clear sky".to_string(),
        }]
    }

    #[test]
    fn test_wind_direction() {
        assert_eq!(wind_direction(0.0), "N");
        assert_eq!(wind_direction(22.5), "NNE");
        assert_eq!(wind_direction(200.0), "SSW");
        assert_eq!(wind_direction(270.0), "W");
        assert_eq!(wind_direction(350.0), "N");
        assert_eq!(wind_direction(360.0), "N");
    }

    #[test]
    fn test_date_window_edges() {
        assert_eq!(classify_date(None, today()), Ok(DateWindow::Current));
        assert_eq!(classify_date(Some("  "), today()), Ok(DateWindow::Current));
        assert_eq!(classify_date(Some("2025-06-01"), today()), Ok(DateWindow::Current));

        let five = NaiveDate::from_ymd_opt(2025, 6, 6).unwrap();
        assert_eq!(classify_date(Some("2025-06-06"), today()), Ok(DateWindow::Forecast(five)));

        let six = classify_date(Some("2025-06-07"), today()).unwrap_err();
        assert!(matches!(six, DateError::OutOfRange { days: 6, .. }));
        assert!(six.to_string().contains("only available up to 5 days"));

        assert!(matches!(classify_date(Some("2025-05-31"), today()), Err(DateError::Past(_))));
        assert!(matches!(classify_date(Some("06/02/2025"), today()), Err(DateError::InvalidFormat(_))));
    }

    #[test]
    fn test_format_current() {
        let current = CurrentWeather {
            weather: clear(),
            main: readings(28.3),
            wind: Some(Wind {
                speed: Some(3.6),
                deg: Some(200.0),
            }),
            visibility: Some(10000.0),
        };
        let text = format_current(&nice(), &current);

        assert!(text.starts_with("🌤️ **Current weather for Nice, FR**"));
        assert!(text.contains("28.3°C"));
        assert!(text.contains("40%"));
        assert!(text.contains("**Conditions:** Clear Sky"));
        assert!(text.contains("**Pressure:** 1014 hPa"));
        assert!(text.contains("**Wind:** 3.6 m/s (SSW)"));
        assert!(text.contains("**Visibility:** 10.0 km"));
    }

    #[test]
    fn test_format_current_without_wind() {
        let current = CurrentWeather {
            weather: clear(),
            main: readings(15.0),
            wind: None,
            visibility: None,
        };
        let text = format_current(&nice(), &current);
        assert!(!text.contains("Wind"));
        assert!(!text.contains("Visibility"));
    }

    #[test]
    fn test_forecast_uses_city_local_date() {
        // 2025-06-02 22:00 UTC is 2025-06-03 00:00 at UTC+2
        let late = DateTime::parse_from_rfc3339("2025-06-02T22:00:00Z").unwrap().timestamp();
        let forecast = Forecast {
            list: vec![
                ForecastSlot {
                    dt: late - 3 * 3600,
                    weather: clear(),
                    main: readings(20.0),
                    wind: None,
                    visibility: None,
                },
                ForecastSlot {
                    dt: late,
                    weather: clear(),
                    main: readings(18.0),
                    wind: Some(Wind {
                        speed: Some(2.0),
                        deg: None,
                    }),
                    visibility: None,
                },
            ],
            city: ForecastCity {
                name: "Nice".to_string(),
                timezone: 7200,
            },
        };

        let june_third = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap();
        let slots = slots_on(&forecast, june_third);
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].0, "00:00");

        let text = format_forecast(&nice(), &forecast, june_third);
        assert!(text.starts_with("🌤️ **Weather forecast for Nice, FR - 2025-06-03**"));
        assert!(text.contains("**00:00:**"));
        assert!(text.contains("  • Temperature: 18.0°C"));
        assert!(text.contains("  • Wind: 2 m/s\n"));

        let empty = format_forecast(&nice(), &forecast, today());
        assert_eq!(empty, "No forecast available for 2025-06-01");
    }
}
