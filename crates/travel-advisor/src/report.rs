//! Country report assembly
//!
//! A report is a header plus the requested sections in a fixed order:
//! security, events, holidays, travel, politics. A failing section turns
//! into an inline error line and never takes the others down.

use crate::api::{HolidaySource, NewsQuery, NewsSource};
use crate::country::{CountryNormalizer, classify_risk};
use crate::error::{AdvisorError, Result};
use crate::prompts;
use crate::security::{EvidenceAggregator, SecurityAnalyzer};
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use serde_json::json;
use std::fmt::Write as _;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use travel_llm::{CompletionRequest, LLMProvider, complete_text};

const SUMMARY_HEADER: &str = "🎯 **FINAL RECOMMENDATION**";

/// Which part of the report the caller asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoType {
    All,
    Security,
    Events,
    Holidays,
    Travel,
    Politics,
}

impl FromStr for InfoType {
    type Err = AdvisorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(InfoType::All),
            "security" => Ok(InfoType::Security),
            "events" => Ok(InfoType::Events),
            "holidays" => Ok(InfoType::Holidays),
            "travel" => Ok(InfoType::Travel),
            "politics" => Ok(InfoType::Politics),
            other => Err(AdvisorError::InvalidInput(format!(
                "Unknown info_type '{other}'. Use one of: all, security, events, holidays, travel, politics"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Security,
    Events,
    Holidays,
    Travel,
    Politics,
}

impl Section {
    const ORDER: [Section; 5] = [
        Section::Security,
        Section::Events,
        Section::Holidays,
        Section::Travel,
        Section::Politics,
    ];

    fn requested_by(self, info: InfoType) -> bool {
        matches!(
            (info, self),
            (InfoType::All, _)
                | (InfoType::Security, Section::Security)
                | (InfoType::Events, Section::Events)
                | (InfoType::Holidays, Section::Holidays)
                | (InfoType::Travel, Section::Travel)
                | (InfoType::Politics, Section::Politics)
        )
    }

    fn short_title(self) -> &'static str {
        match self {
            Section::Security => "🛡️ **Security**",
            Section::Events => "📅 **Events**",
            Section::Holidays => "🎉 **Holidays**",
            Section::Travel => "✈️ **Travel**",
            Section::Politics => "🏛️ **Politics**",
        }
    }

    fn error_line(self, err: &AdvisorError) -> String {
        format!("{}: Error during retrieval - {err}", self.short_title())
    }
}

/// Header, timestamp and sections joined into the final text
pub fn assemble(country: &str, sections: &[String], updated: NaiveDateTime) -> String {
    format!(
        "🌍 **Contextual Information for {country}**\n*Updated: {}*\n\n{}",
        updated.format("%m/%d/%Y %H:%M"),
        sections.join("\n\n")
    )
}

/// Builds country reports
#[derive(Clone)]
pub struct ReportBuilder {
    normalizer: CountryNormalizer,
    evidence: EvidenceAggregator,
    analyzer: SecurityAnalyzer,
    news: Option<Arc<dyn NewsSource>>,
    holidays: Option<Arc<dyn HolidaySource>>,
    llm: Option<Arc<dyn LLMProvider>>,
    model: String,
}

impl ReportBuilder {
    pub fn new(
        normalizer: CountryNormalizer,
        llm: Option<Arc<dyn LLMProvider>>,
        model: impl Into<String>,
    ) -> Self {
        let model = model.into();
        Self {
            normalizer,
            evidence: EvidenceAggregator::default(),
            analyzer: SecurityAnalyzer::new(llm.clone(), model.clone()),
            news: None,
            holidays: None,
            llm,
            model,
        }
    }

    /// Use a news source for security evidence, events and politics
    pub fn with_news(mut self, news: Arc<dyn NewsSource>) -> Self {
        self.evidence = EvidenceAggregator::new(Some(Arc::clone(&news)));
        self.news = Some(news);
        self
    }

    /// Use a holiday calendar for the holidays section
    pub fn with_holidays(mut self, holidays: Arc<dyn HolidaySource>) -> Self {
        self.holidays = Some(holidays);
        self
    }

    /// Canonical name for a free-text country, if recognized
    pub async fn resolve_country(&self, input: &str) -> Option<String> {
        self.normalizer.normalize(input).await
    }

    /// Full report text for a free-text country and an `info_type`
    pub async fn build(&self, country: &str, info_type: &str) -> String {
        self.build_as_of(country, info_type, Local::now().naive_local())
            .await
    }

    /// Same as [`build`](Self::build) with an explicit clock
    #[instrument(skip(self, now))]
    pub async fn build_as_of(&self, input: &str, info_type: &str, now: NaiveDateTime) -> String {
        let info = match info_type.parse::<InfoType>() {
            Ok(info) => info,
            Err(e) => return format!("❌ {e}"),
        };

        let Some(country) = self.normalizer.normalize(input).await else {
            return format!(
                "❌ Country not recognized: '{input}'. Try with the full name (e.g., 'France', 'United States', 'United Kingdom')"
            );
        };

        let mut sections = Vec::new();
        for section in Section::ORDER {
            if !section.requested_by(info) {
                continue;
            }
            match self.section(section, &country, now.date()).await {
                Ok(Some(text)) => sections.push(text),
                Ok(None) => debug!(?section, "Section skipped"),
                Err(e) => {
                    warn!(?section, "Section failed: {e}");
                    sections.push(section.error_line(&e));
                }
            }
        }

        if sections.is_empty() {
            return format!("❌ No information available for {country} currently.");
        }

        let mut report = assemble(&country, &sections, now);
        if info == InfoType::All {
            if let Some(summary) = self.summary(&country, &sections.join("\n\n")).await {
                report.push_str("\n\n");
                report.push_str(&summary);
            }
        }

        info!(%country, sections = sections.len(), "Country report built");
        report
    }

    /// The security section alone, for callers that only need the verdict
    pub async fn security_section(&self, country: &str) -> String {
        let tier = classify_risk(country);
        let evidence = self.evidence.gather(country).await;
        let verdict = self.analyzer.analyze(country, &evidence, tier).await;
        verdict.render_section()
    }

    async fn section(&self, section: Section, country: &str, today: NaiveDate) -> Result<Option<String>> {
        match section {
            Section::Security => Ok(Some(self.security_section(country).await)),
            Section::Events => self.events_section(country).await,
            Section::Holidays => self.holidays_section(country, today).await,
            Section::Travel => self.travel_section(country).await.map(Some),
            Section::Politics => self.politics_section(country).await,
        }
    }

    async fn events_section(&self, country: &str) -> Result<Option<String>> {
        let Some(news) = &self.news else {
            return Ok(Some(format!(
                "📅 **Events**: No major events detected for {country}"
            )));
        };

        let query = NewsQuery::new(format!("{country} current events news today recent"), 7, 5);
        let articles = news.search(&query).await?;
        if articles.is_empty() {
            return Ok(Some(format!(
                "📅 **Events**: No major events detected for {country}"
            )));
        }

        let mut out = String::from("📅 **Current Events and Context**");
        for article in articles.iter().take(5) {
            let title = if article.title.is_empty() {
                "Event not specified"
            } else {
                article.title.as_str()
            };
            let _ = write!(out, "\n• {title}");
        }
        Ok(Some(out))
    }

    async fn holidays_section(&self, country: &str, today: NaiveDate) -> Result<Option<String>> {
        let Some(calendar) = &self.holidays else {
            return Ok(None);
        };

        let Some(code) = self.normalizer.iso_code(country).await else {
            return Ok(Some(format!(
                "🎉 **Holidays**: Country code not found for {country}"
            )));
        };

        let holidays = calendar.public_holidays(today.year(), &code).await?;
        if holidays.is_empty() {
            return Ok(Some(format!(
                "🎉 **Holidays**: Information not available for {country}"
            )));
        }

        let upcoming: Vec<_> = holidays
            .iter()
            .filter(|h| h.date.year() == today.year() && h.date.month() >= today.month())
            .take(5)
            .collect();

        let mut out = String::from("🎉 **Holidays and Seasonal Events**\n");
        if upcoming.is_empty() {
            out.push_str("**No major holidays scheduled in the coming months**");
        } else {
            out.push_str("**Upcoming holidays:**");
            for holiday in upcoming {
                let _ = write!(out, "\n• {} ({})", holiday.name, holiday.date);
            }
        }
        Ok(Some(out))
    }

    async fn travel_section(&self, country: &str) -> Result<String> {
        let Some(record) = self.normalizer.record(country).await? else {
            return Ok(format!("✈️ **Travel**: Information not available for {country}"));
        };

        let currency = record.primary_currency().unwrap_or("Unknown");
        let languages = record.language_names(3);
        let languages = if languages.is_empty() {
            "Unknown".to_string()
        } else {
            languages.join(", ")
        };
        let region = if record.region.is_empty() {
            "Unknown"
        } else {
            record.region.as_str()
        };

        Ok(format!(
            "✈️ **Practical Travel Information**\n💰 Currency: {currency}\n🗣️ Languages: {languages}\n🌍 Region: {region}\n📋 Check visa requirements on the country's official website"
        ))
    }

    async fn politics_section(&self, country: &str) -> Result<Option<String>> {
        let Some(news) = &self.news else {
            return Ok(Some(format!("🏛️ **Politics**: Stable situation for {country}")));
        };

        let query = NewsQuery::new(format!("{country} politics government election democracy"), 30, 5);
        let articles = news.search(&query).await?;
        let titles: Vec<&str> = articles
            .iter()
            .map(|a| a.title.as_str())
            .filter(|t| !t.is_empty())
            .take(3)
            .collect();

        if titles.is_empty() {
            return Ok(Some(format!("🏛️ **Politics**: Stable situation for {country}")));
        }

        let mut out = String::from("🏛️ **Political Context**");
        for title in titles {
            let _ = write!(out, "\n• {title}");
        }
        Ok(Some(out))
    }

    /// Model-written executive summary; failures are dropped silently
    async fn summary(&self, country: &str, report: &str) -> Option<String> {
        let llm = self.llm.as_ref()?;
        let prompt = prompts::render(prompts::SUMMARY, json!({"country": country, "report": report}))
            .map_err(|e| warn!("Summary prompt failed to render: {e}"))
            .ok()?;

        let request = CompletionRequest::single_turn(&self.model, prompts::SUMMARY_SYSTEM, prompt)
            .max_tokens(250)
            .temperature(0.2)
            .build();

        match complete_text(llm.as_ref(), request).await {
            Ok(text) if text.starts_with(SUMMARY_HEADER) => Some(text),
            Ok(text) => Some(format!("{SUMMARY_HEADER}\n{text}")),
            Err(e) => {
                warn!("Final recommendation failed: {e}");
                None
            }
        }
    }
}
