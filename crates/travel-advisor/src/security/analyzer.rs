//! Security verdicts from risk tier and news evidence

use crate::api::NewsArticle;
use crate::country::RiskTier;
use crate::model_output::{parse_object, truncate_chars};
use crate::prompts;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write as _;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use travel_llm::{CompletionRequest, LLMProvider, complete_text};

const MAX_EVIDENCE: usize = 10;
const MAX_DESCRIPTION: usize = 100;
const MAX_JUSTIFICATION: usize = 200;

/// Traffic-light security level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SecurityLevel {
    Red,
    Yellow,
    Green,
    /// Only produced by fallback verdicts
    Unknown,
}

impl SecurityLevel {
    pub fn emoji(self) -> &'static str {
        match self {
            SecurityLevel::Red => "🔴",
            SecurityLevel::Yellow => "🟡",
            SecurityLevel::Green => "🟢",
            SecurityLevel::Unknown => "⚪",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "RED" => Some(SecurityLevel::Red),
            "YELLOW" => Some(SecurityLevel::Yellow),
            "GREEN" => Some(SecurityLevel::Green),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    ChangeDestination,
    EnhancedPrecautions,
    SafeDestination,
    /// Only produced by fallback verdicts
    ConsultOfficialSources,
}

impl Recommendation {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "CHANGE_DESTINATION" => Some(Recommendation::ChangeDestination),
            "ENHANCED_PRECAUTIONS" => Some(Recommendation::EnhancedPrecautions),
            "SAFE_DESTINATION" => Some(Recommendation::SafeDestination),
            _ => None,
        }
    }

    fn for_level(level: SecurityLevel) -> Self {
        match level {
            SecurityLevel::Red => Recommendation::ChangeDestination,
            SecurityLevel::Yellow => Recommendation::EnhancedPrecautions,
            SecurityLevel::Green => Recommendation::SafeDestination,
            SecurityLevel::Unknown => Recommendation::ConsultOfficialSources,
        }
    }
}

/// Outcome of a security assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityVerdict {
    pub level: SecurityLevel,
    /// At most 100 characters
    pub description: String,
    pub recommendation: Recommendation,
    /// At most 200 characters
    pub justification: String,
}

impl SecurityVerdict {
    fn new(
        level: SecurityLevel,
        description: &str,
        recommendation: Recommendation,
        justification: &str,
    ) -> Self {
        Self {
            level,
            description: truncate_chars(description, MAX_DESCRIPTION),
            recommendation,
            justification: truncate_chars(justification, MAX_JUSTIFICATION),
        }
    }

    /// Canned verdict used when there is no evidence to analyze
    pub fn for_tier(tier: RiskTier) -> Self {
        match tier {
            RiskTier::HighRisk => Self::new(
                SecurityLevel::Red,
                "Very high risk country - active conflict or war",
                Recommendation::ChangeDestination,
                "Active conflict zone",
            ),
            RiskTier::ModerateRisk => Self::new(
                SecurityLevel::Yellow,
                "Moderate risk country - political instability",
                Recommendation::EnhancedPrecautions,
                "",
            ),
            RiskTier::Tension | RiskTier::Unknown => Self::new(
                SecurityLevel::Green,
                "No recent security news found",
                Recommendation::SafeDestination,
                "",
            ),
        }
    }

    /// Verdict when no language model is configured
    pub fn model_unavailable() -> Self {
        Self::new(
            SecurityLevel::Unknown,
            "Security analysis unavailable (no language model configured)",
            Recommendation::ConsultOfficialSources,
            "Check your government's official travel advisories",
        )
    }

    /// Verdict when the model call or its output failed
    pub fn analysis_error() -> Self {
        Self::new(
            SecurityLevel::Unknown,
            "Security analysis error",
            Recommendation::ConsultOfficialSources,
            "Unable to analyze security currently",
        )
    }

    /// Human-readable advice line
    pub fn advice(&self) -> String {
        let lead = match self.level {
            SecurityLevel::Red => "🚫 CHANGE DESTINATION",
            SecurityLevel::Yellow => "⚠️ Travel possible with enhanced precautions",
            SecurityLevel::Green => "✅ Destination considered safe",
            SecurityLevel::Unknown => "❓ Consult official sources",
        };
        if self.justification.is_empty() {
            lead.to_string()
        } else {
            format!("{lead} - {}", self.justification)
        }
    }

    /// Report section for this verdict
    pub fn render_section(&self) -> String {
        format!(
            "🛡️ **Security and Travel Advice**\n{} **Level determined by real-time analysis**\n📋 {}\n🎯 **Recommendation: {}**",
            self.level.emoji(),
            self.description,
            self.advice()
        )
    }
}

#[derive(Debug, Deserialize)]
struct RawVerdict {
    level: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    recommendation: Option<String>,
    #[serde(default)]
    justification: Option<String>,
}

/// Interpret a model answer; `None` when no usable verdict is found
pub fn parse_verdict(text: &str) -> Option<SecurityVerdict> {
    let raw: RawVerdict = parse_object(text)?;
    let level = SecurityLevel::parse(&raw.level)?;
    let recommendation = raw
        .recommendation
        .as_deref()
        .and_then(Recommendation::parse)
        .unwrap_or_else(|| Recommendation::for_level(level));

    Some(SecurityVerdict::new(
        level,
        raw.description.as_deref().unwrap_or("Analysis completed"),
        recommendation,
        raw.justification.as_deref().unwrap_or_default(),
    ))
}

/// Numbered evidence block for the prompt, at most ten entries
pub fn format_evidence(evidence: &[NewsArticle]) -> String {
    let mut out = String::new();
    for (i, article) in evidence.iter().take(MAX_EVIDENCE).enumerate() {
        if article.title.is_empty() && article.description.is_empty() {
            continue;
        }
        let _ = write!(out, "{}. {}\n{}\n\n", i + 1, article.title, article.description);
    }
    out
}

/// Produces security verdicts
///
/// Never fails: every problem degrades to one of the fallback verdicts.
#[derive(Clone)]
pub struct SecurityAnalyzer {
    llm: Option<Arc<dyn LLMProvider>>,
    model: String,
}

impl SecurityAnalyzer {
    pub fn new(llm: Option<Arc<dyn LLMProvider>>, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
        }
    }

    #[instrument(skip(self, evidence), fields(evidence = evidence.len()))]
    pub async fn analyze(
        &self,
        country: &str,
        evidence: &[NewsArticle],
        tier: RiskTier,
    ) -> SecurityVerdict {
        let news = format_evidence(evidence);
        if news.trim().is_empty() {
            debug!(%tier, "No evidence, using tier verdict");
            return SecurityVerdict::for_tier(tier);
        }

        let Some(llm) = &self.llm else {
            debug!("No language model configured");
            return SecurityVerdict::model_unavailable();
        };

        let prompt = match prompts::render(
            prompts::SECURITY,
            json!({"country": country, "risk_level": tier.as_str(), "news": news}),
        ) {
            Ok(prompt) => prompt,
            Err(e) => {
                warn!("Security prompt failed to render: {e}");
                return SecurityVerdict::analysis_error();
            }
        };

        let request = CompletionRequest::single_turn(&self.model, prompts::SECURITY_SYSTEM, prompt)
            .max_tokens(300)
            .temperature(0.1)
            .build();

        match complete_text(llm.as_ref(), request).await {
            Ok(text) => match parse_verdict(&text) {
                Some(verdict) => {
                    info!(level = ?verdict.level, "Security verdict from model");
                    verdict
                }
                None => {
                    warn!("Unparseable security verdict");
                    SecurityVerdict::analysis_error()
                }
            },
            Err(e) => {
                warn!("Security analysis call failed: {e}");
                SecurityVerdict::analysis_error()
            }
        }
    }
}
