//! Prompt templates for every model call
//!
//! Templates live in one static minijinja environment and are rendered with
//! serde-serializable contexts.

use crate::error::Result;
use minijinja::Environment;
use serde::Serialize;
use std::sync::LazyLock;
use tracing::error;

pub const SECURITY: &str = "security";
pub const SUMMARY: &str = "summary";
pub const ACTIVITY: &str = "activity";
pub const MOOD_TO_NEED: &str = "mood_to_need";
pub const NEED_TO_DESTINATIONS: &str = "need_to_destinations";

pub const SECURITY_SYSTEM: &str =
    "You are a travel security expert. Analyze the risks objectively.";
pub const SUMMARY_SYSTEM: &str =
    "You are an expert travel advisor. Provide clear and practical recommendations.";
pub const ACTIVITY_SYSTEM: &str = "You are an expert weather advisor. Give practical, clear \
     recommendations for travel activities.";
pub const TRAVEL_AGENT_SYSTEM: &str = "You are a travel agent AI.";

const SECURITY_TEMPLATE: &str = r#"Analyze the following recent news about {{ country }} and determine the security level for a traveler:

KNOWN RISK LEVEL: {{ risk_level }}
- HIGH_RISK = Country in active war or major conflict
- MODERATE_RISK = Country with significant political instability
- TENSION = Country with geopolitical tensions
- UNKNOWN = No special classification

RECENT NEWS:
{{ news }}

CRITICAL INSTRUCTIONS:
1. If RISK LEVEL = HIGH_RISK, you MUST recommend CHANGE_DESTINATION unless clear evidence of improvement
2. For Ukraine, Palestine, Afghanistan, Syria, Yemen: ALWAYS RED/CHANGE_DESTINATION
3. Analyze risk level for a civilian tourist/traveler
4. Be VERY STRICT - traveler safety is priority

Respond ONLY in the following JSON format:

{
    "level": "RED|YELLOW|GREEN",
    "description": "Short situation description (max 100 characters)",
    "recommendation": "CHANGE_DESTINATION|ENHANCED_PRECAUTIONS|SAFE_DESTINATION",
    "justification": "Explanation of your decision (max 200 characters)"
}

STRICT Criteria:
- RED/CHANGE_DESTINATION: active war, armed conflict, active terrorism, coup, widespread violence, combat zones
- YELLOW/ENHANCED_PRECAUTIONS: violent protests, very high crime, political instability, ethnic tensions
- GREEN/SAFE_DESTINATION: no major risks for civilians

ABSOLUTE PRIORITY: Protect travelers - when in doubt, choose the strictest security level."#;

const SUMMARY_TEMPLATE: &str = r#"Analyze this complete report about {{ country }} and provide a concise final recommendation for a traveler:

COMPLETE REPORT:
{{ report }}

Your task:
1. Synthesize the most important information
2. Give a clear and actionable recommendation
3. Respond in English, maximum 200 words
4. Use a professional but accessible tone
5. If risks exist, be explicit about precautions

Desired response format:
🎯 **FINAL RECOMMENDATION**
[Your synthetic analysis and recommendation]

If the destination is dangerous, clearly use "CHANGE DESTINATION" in your response."#;

const ACTIVITY_TEMPLATE: &str = r#"Analyze this weather data for {{ location }} on {{ date }} and give a recommendation for a "{{ activity }}" activity:

WEATHER DATA:
{{ weather }}

ACTIVITY TYPE: {{ activity }}

Your task:
1. Decide whether the weather suits this activity
2. Pick one rating: IDEAL, ACCEPTABLE, NOT_RECOMMENDED or CHANGE_DESTINATION
3. Suggest alternatives when needed
4. Answer in English, maximum 150 words, practical and friendly

Example logic:
- Beach + rain = CHANGE_DESTINATION or postpone
- Ski + temperature above 5°C = NOT_RECOMMENDED
- Hiking + thunderstorm = CHANGE_DESTINATION
- City + light rain = ACCEPTABLE with an umbrella
- Outdoor festival + heavy rain = NOT_RECOMMENDED

Respond ONLY in the following JSON format:

{
    "rating": "IDEAL|ACCEPTABLE|NOT_RECOMMENDED|CHANGE_DESTINATION",
    "advice": "Your analysis and advice"
}"#;

const MOOD_TO_NEED_TEMPLATE: &str = r#"Given the user's mood, suggest a travel need.
Mood: "{{ mood }}"
Return only the need, no explanation.
Example:
Mood: "I am exhausted" → Need: "A calm wellness retreat"
Mood: "{{ mood }}"
Need:"#;

const NEED_TO_DESTINATIONS_TEMPLATE: &str = r#"Based on the user's need: "{{ need }}",
suggest 2-3 travel destinations with round-trip flight information.
{% if today %}Travel dates must be after {{ today }}.
{% endif %}
Return the output as valid JSON in the following format:

[
  {
    "destination": "DestinationName",
    "departure": {
      "date": "YYYY-MM-DD",
      "from_airport": "{{ departure_airport }}",
      "to_airport": "XXX"
    },
    "return": {
      "date": "YYYY-MM-DD",
      "from_airport": "XXX",
      "to_airport": "{{ departure_airport }}"
    }
  }
]

DO NOT add explanations, only return raw JSON."#;

const TEMPLATES: &[(&str, &str)] = &[
    (SECURITY, SECURITY_TEMPLATE),
    (SUMMARY, SUMMARY_TEMPLATE),
    (ACTIVITY, ACTIVITY_TEMPLATE),
    (MOOD_TO_NEED, MOOD_TO_NEED_TEMPLATE),
    (NEED_TO_DESTINATIONS, NEED_TO_DESTINATIONS_TEMPLATE),
];

static ENV: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    for &(name, source) in TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            error!(template = name, "Invalid prompt template: {e}");
        }
    }
    env
});

/// Render a named prompt
pub fn render<S: Serialize>(name: &str, context: S) -> Result<String> {
    let template = ENV.get_template(name)?;
    Ok(template.render(context)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_all_templates_load() {
        for &(name, _) in TEMPLATES {
            assert!(ENV.get_template(name).is_ok(), "template {name}");
        }
    }

    #[test]
    fn test_security_prompt() {
        let prompt = render(
            SECURITY,
            json!({"country": "Mali", "risk_level": "HIGH_RISK", "news": "1. Coup attempt\nDetails\n\n"}),
        )
        .unwrap();
        assert!(prompt.contains("recent news about Mali"));
        assert!(prompt.contains("KNOWN RISK LEVEL: HIGH_RISK"));
        assert!(prompt.contains("1. Coup attempt"));
        assert!(prompt.contains("\"level\": \"RED|YELLOW|GREEN\""));
    }

    #[test]
    fn test_mood_prompt_repeats_mood() {
        let prompt = render(MOOD_TO_NEED, json!({"mood": "restless"})).unwrap();
        assert_eq!(prompt.matches("Mood: \"restless\"").count(), 2);
        assert!(prompt.ends_with("Need:"));
    }

    #[test]
    fn test_destinations_prompt() {
        let prompt = render(
            NEED_TO_DESTINATIONS,
            json!({"need": "sun and sea", "departure_airport": "LYS", "today": "2025-05-01"}),
        )
        .unwrap();
        assert!(prompt.contains("\"from_airport\": \"LYS\""));
        assert!(prompt.contains("after 2025-05-01"));
    }

    #[test]
    fn test_unknown_template() {
        assert!(render("nope", json!({})).is_err());
    }
}
