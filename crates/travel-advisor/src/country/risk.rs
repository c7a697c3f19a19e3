//! Static country risk tiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Active war or major conflict
const HIGH_RISK: &[&str] = &[
    "Ukraine",
    "Afghanistan",
    "Syria",
    "Yemen",
    "Somalia",
    "South Sudan",
    "Central African Republic",
    "Mali",
    "Burkina Faso",
    "Niger",
    "Democratic Republic of the Congo",
    "Myanmar",
    "Palestine",
    "Gaza",
    "West Bank",
    "Iraq",
    "Libya",
    "Sudan",
];

/// Significant political instability
const MODERATE_RISK: &[&str] = &[
    "Iran",
    "North Korea",
    "Venezuela",
    "Belarus",
    "Ethiopia",
    "Chad",
    "Cameroon",
    "Nigeria",
    "Pakistan",
    "Bangladesh",
    "Haiti",
    "Lebanon",
    "Turkey",
    "Egypt",
    "Algeria",
];

/// Geopolitical tensions
const TENSION: &[&str] = &[
    "Russia",
    "China",
    "Israel",
    "India",
    "Kashmir",
    "Taiwan",
    "Hong Kong",
    "Thailand",
    "Philippines",
    "Colombia",
];

/// Coarse risk tier, independent of live news
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTier {
    HighRisk,
    ModerateRisk,
    Tension,
    Unknown,
}

impl RiskTier {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskTier::HighRisk => "HIGH_RISK",
            RiskTier::ModerateRisk => "MODERATE_RISK",
            RiskTier::Tension => "TENSION",
            RiskTier::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a canonical country name
///
/// Case-insensitive substring match in either direction, checked from the
/// most to the least severe list. "Nigeria" therefore lands in
/// [`RiskTier::HighRisk`] through "Niger".
pub fn classify_risk(country: &str) -> RiskTier {
    let name = country.trim().to_lowercase();
    if name.is_empty() {
        return RiskTier::Unknown;
    }

    let hit = |list: &[&str]| {
        list.iter().any(|entry| {
            let entry = entry.to_lowercase();
            entry.contains(&name) || name.contains(&entry)
        })
    };

    if hit(HIGH_RISK) {
        RiskTier::HighRisk
    } else if hit(MODERATE_RISK) {
        RiskTier::ModerateRisk
    } else if hit(TENSION) {
        RiskTier::Tension
    } else {
        RiskTier::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers() {
        assert_eq!(classify_risk("ukraine"), RiskTier::HighRisk);
        assert_eq!(classify_risk("Iran"), RiskTier::ModerateRisk);
        assert_eq!(classify_risk("Taiwan"), RiskTier::Tension);
        assert_eq!(classify_risk("Portugal"), RiskTier::Unknown);
    }

    #[test]
    fn test_containing_high_risk_name() {
        for entry in HIGH_RISK {
            let padded = format!("Northern {} region", entry.to_uppercase());
            assert_eq!(classify_risk(&padded), RiskTier::HighRisk, "{padded}");
        }
    }

    #[test]
    fn test_severity_precedence() {
        // "Niger" is a substring of "Nigeria"
        assert_eq!(classify_risk("Nigeria"), RiskTier::HighRisk);
        // "Sudan" is a substring of "South Sudan"
        assert_eq!(classify_risk("South Sudan"), RiskTier::HighRisk);
    }

    #[test]
    fn test_empty_is_unknown() {
        assert_eq!(classify_risk(""), RiskTier::Unknown);
        assert_eq!(classify_risk("   "), RiskTier::Unknown);
    }

    #[test]
    fn test_display() {
        assert_eq!(RiskTier::ModerateRisk.to_string(), "MODERATE_RISK");
    }
}
