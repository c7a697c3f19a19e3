//! Mood to travel need, need to destinations

use crate::error::{AdvisorError, Result};
use crate::model_output::parse_array;
use crate::prompts;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, instrument};
use travel_llm::{CompletionRequest, LLMProvider, complete_text};

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: usize = 1024;

/// One flight leg of a suggested trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leg {
    /// YYYY-MM-DD
    pub date: String,
    pub from_airport: String,
    pub to_airport: String,
}

/// A destination proposed for a travel need
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationSuggestion {
    pub destination: String,
    pub departure: Leg,
    #[serde(rename = "return")]
    pub return_leg: Leg,
}

/// Model-backed trip ideation
#[derive(Clone)]
pub struct TravelSuggester {
    llm: Option<Arc<dyn LLMProvider>>,
    model: String,
    departure_airport: String,
}

impl TravelSuggester {
    pub fn new(
        llm: Option<Arc<dyn LLMProvider>>,
        model: impl Into<String>,
        departure_airport: impl Into<String>,
    ) -> Self {
        Self {
            llm,
            model: model.into(),
            departure_airport: departure_airport.into(),
        }
    }

    pub fn departure_airport(&self) -> &str {
        &self.departure_airport
    }

    fn llm(&self) -> Result<&dyn LLMProvider> {
        self.llm.as_deref().ok_or_else(|| {
            AdvisorError::ConfigError(
                "ANTHROPIC_API_KEY is required for travel suggestions".to_string(),
            )
        })
    }

    async fn ask(&self, prompt: String) -> Result<String> {
        let request = CompletionRequest::single_turn(&self.model, prompts::TRAVEL_AGENT_SYSTEM, prompt)
            .max_tokens(MAX_TOKENS)
            .temperature(TEMPERATURE)
            .build();
        Ok(complete_text(self.llm()?, request).await?)
    }

    /// One-line travel need for a mood
    #[instrument(skip(self))]
    pub async fn mood_to_need(&self, mood: &str) -> Result<String> {
        if mood.trim().is_empty() {
            return Err(AdvisorError::InvalidInput("mood must not be empty".to_string()));
        }
        let prompt = prompts::render(prompts::MOOD_TO_NEED, json!({ "mood": mood.trim() }))?;
        let need = self.ask(prompt).await?;
        let need = need.trim().trim_matches('"').trim().to_string();
        debug!(%need, "Need derived from mood");
        Ok(need)
    }

    /// Two or three destinations with round-trip legs for a need
    ///
    /// `today`, when given, is passed to the model so it proposes future dates.
    #[instrument(skip(self))]
    pub async fn destinations_for(
        &self,
        need: &str,
        today: Option<NaiveDate>,
    ) -> Result<Vec<DestinationSuggestion>> {
        if need.trim().is_empty() {
            return Err(AdvisorError::InvalidInput("need must not be empty".to_string()));
        }
        let prompt = prompts::render(
            prompts::NEED_TO_DESTINATIONS,
            json!({
                "need": need.trim(),
                "departure_airport": self.departure_airport,
                "today": today.map(|d| d.to_string()),
            }),
        )?;
        let answer = self.ask(prompt).await?;
        let suggestions: Vec<DestinationSuggestion> = parse_array(&answer).map_err(|e| {
            AdvisorError::ParseError(format!("Could not parse LLM output to JSON: {e}"))
        })?;
        debug!(count = suggestions.len(), "Destinations suggested");
        Ok(suggestions)
    }
}
