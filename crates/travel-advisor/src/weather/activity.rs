//! Activity detection and weather suitability verdicts

use crate::model_output::parse_object;
use crate::prompts;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use travel_llm::{CompletionRequest, LLMProvider, complete_text};

const BEACH_PLACES: &[&str] = &[
    "nice",
    "cannes",
    "saint-tropez",
    "biarritz",
    "deauville",
    "miami",
    "maldives",
    "ibiza",
    "mykonos",
    "cancun",
    "phuket",
    "bali",
];

const SKI_PLACES: &[&str] = &[
    "chamonix",
    "val d'isère",
    "courchevel",
    "méribel",
    "aspen",
    "zermatt",
    "st moritz",
    "verbier",
];

const HIKING_PLACES: &[&str] = &[
    "mont blanc",
    "everest",
    "kilimanjaro",
    "patagonie",
    "patagonia",
    "himalaya",
    "alpes",
    "alps",
    "pyrénées",
    "pyrenees",
];

/// Kind of trip the weather is judged against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityType {
    Beach,
    Ski,
    City,
    Hiking,
    Camping,
    Festival,
    /// Free-text activity passed through to the model
    Other(String),
}

impl ActivityType {
    /// Interpret a user-supplied label (English or French)
    pub fn parse(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.is_empty() {
            return None;
        }
        let activity = match label.to_lowercase().as_str() {
            "beach" | "plage" => ActivityType::Beach,
            "ski" | "skiing" => ActivityType::Ski,
            "city" | "ville" => ActivityType::City,
            "hiking" | "hike" | "trekking" | "randonnee" | "randonnée" => ActivityType::Hiking,
            "camping" => ActivityType::Camping,
            "festival" => ActivityType::Festival,
            _ => ActivityType::Other(label.to_string()),
        };
        Some(activity)
    }

    /// Guess the activity from a well-known place name
    pub fn detect(location: &str) -> Option<Self> {
        let location = location.to_lowercase();
        let matches = |places: &[&str]| places.iter().any(|p| location.contains(p));

        if matches(BEACH_PLACES) {
            Some(ActivityType::Beach)
        } else if matches(SKI_PLACES) {
            Some(ActivityType::Ski)
        } else if matches(HIKING_PLACES) {
            Some(ActivityType::Hiking)
        } else {
            None
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ActivityType::Beach => "beach",
            ActivityType::Ski => "ski",
            ActivityType::City => "city",
            ActivityType::Hiking => "hiking",
            ActivityType::Camping => "camping",
            ActivityType::Festival => "festival",
            ActivityType::Other(label) => label,
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityRating {
    Ideal,
    Acceptable,
    NotRecommended,
    ChangeDestination,
}

impl ActivityRating {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().replace([' ', '-'], "_").as_str() {
            "IDEAL" => Some(ActivityRating::Ideal),
            "ACCEPTABLE" => Some(ActivityRating::Acceptable),
            "NOT_RECOMMENDED" => Some(ActivityRating::NotRecommended),
            "CHANGE_DESTINATION" => Some(ActivityRating::ChangeDestination),
            _ => None,
        }
    }

    fn headline(self) -> &'static str {
        match self {
            ActivityRating::Ideal => "✅ IDEAL",
            ActivityRating::Acceptable => "👍 ACCEPTABLE",
            ActivityRating::NotRecommended => "⚠️ NOT RECOMMENDED",
            ActivityRating::ChangeDestination => "🚫 CHANGE DESTINATION",
        }
    }
}

/// Model verdict on weather vs. activity
///
/// `rating` is `None` when the model answered in prose instead of JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRecommendation {
    pub rating: Option<ActivityRating>,
    pub advice: String,
}

impl ActivityRecommendation {
    pub fn render(&self) -> String {
        match self.rating {
            Some(rating) => format!(
                "🎯 **TRAVEL RECOMMENDATION**\n**{}**\n{}",
                rating.headline(),
                self.advice
            ),
            None => format!("🎯 **TRAVEL RECOMMENDATION**\n{}", self.advice),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawRecommendation {
    rating: String,
    #[serde(default)]
    advice: String,
}

/// Interpret a model answer, falling back to the verbatim text
pub fn parse_recommendation(text: &str) -> Option<ActivityRecommendation> {
    let structured = parse_object::<RawRecommendation>(text)
        .and_then(|raw| ActivityRating::parse(&raw.rating).map(|rating| (rating, raw.advice)));
    if let Some((rating, advice)) = structured {
        return Some(ActivityRecommendation {
            rating: Some(rating),
            advice: advice.trim().to_string(),
        });
    }

    let verbatim = text.trim();
    (!verbatim.is_empty()).then(|| ActivityRecommendation {
        rating: None,
        advice: verbatim.to_string(),
    })
}

/// Asks the model whether the weather suits an activity
#[derive(Clone)]
pub struct ActivityRecommender {
    llm: Option<Arc<dyn LLMProvider>>,
    model: String,
}

impl ActivityRecommender {
    pub fn new(llm: Option<Arc<dyn LLMProvider>>, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.llm.is_some()
    }

    /// `None` when no model is configured or the call fails
    #[instrument(skip(self, weather), fields(activity = %activity))]
    pub async fn recommend(
        &self,
        weather: &str,
        activity: &ActivityType,
        location: &str,
        date: Option<NaiveDate>,
    ) -> Option<ActivityRecommendation> {
        let llm = self.llm.as_ref()?;
        let date = date.map_or_else(|| "today".to_string(), |d| d.to_string());

        let prompt = prompts::render(
            prompts::ACTIVITY,
            json!({
                "location": location,
                "date": date,
                "activity": activity.label(),
                "weather": weather,
            }),
        )
        .map_err(|e| warn!("Activity prompt failed to render: {e}"))
        .ok()?;

        let request = CompletionRequest::single_turn(&self.model, prompts::ACTIVITY_SYSTEM, prompt)
            .max_tokens(200)
            .temperature(0.2)
            .build();

        match complete_text(llm.as_ref(), request).await {
            Ok(text) => {
                let recommendation = parse_recommendation(&text);
                debug!(rating = ?recommendation.as_ref().and_then(|r| r.rating), "Activity verdict");
                recommendation
            }
            Err(e) => {
                warn!("Activity recommendation failed: {e}");
                None
            }
        }
    }
}
