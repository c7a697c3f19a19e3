//! Extraction of JSON payloads from model answers
//!
//! Models sometimes wrap the requested JSON in prose or code fences; the
//! outermost object or array is cut out before parsing.

use regex::Regex;
use serde::de::DeserializeOwned;
use std::sync::LazyLock;

static OBJECT: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(?s)\{.*\}").ok());
static ARRAY: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(?s)\[.*\]").ok());

fn outermost<'a>(text: &'a str, pattern: &Option<Regex>) -> Option<&'a str> {
    pattern.as_ref()?.find(text).map(|m| m.as_str())
}

/// Parse the outermost `{...}` in `text`
pub(crate) fn parse_object<T: DeserializeOwned>(text: &str) -> Option<T> {
    let json = outermost(text, &OBJECT)?;
    serde_json::from_str(json).ok()
}

/// Parse the outermost `[...]` in `text`
pub(crate) fn parse_array<T: DeserializeOwned>(text: &str) -> serde_json::Result<T> {
    let json = outermost(text, &ARRAY).unwrap_or(text);
    serde_json::from_str(json)
}

/// Cut `text` to at most `max` characters
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_object_inside_fences() {
        let text = "Here is my analysis:\n```json\n{\"level\": \"RED\"}\n```\nStay safe.";
        let value: Value = parse_object(text).unwrap();
        assert_eq!(value["level"], "RED");
    }

    #[test]
    fn test_object_missing() {
        assert!(parse_object::<Value>("no json here").is_none());
        assert!(parse_object::<Value>("{not json}").is_none());
    }

    #[test]
    fn test_array_with_prose() {
        let values: Vec<u32> = parse_array("Sure! [1, 2, 3] Enjoy.").unwrap();
        assert_eq!(values, vec![1, 2, 3]);
        assert!(parse_array::<Vec<u32>>("nothing").is_err());
    }

    #[test]
    fn test_patterns_compile() {
        assert!(OBJECT.is_some());
        assert!(ARRAY.is_some());
        assert!(parse_object::<Value>("a {\"n\": 1} b {\"n\": 2}").is_none());
        let first: Value = parse_object("{\"n\": 1}").unwrap();
        let second: Value = parse_object("{\"n\": 2}").unwrap();
        assert_eq!((first["n"].as_u64(), second["n"].as_u64()), (Some(1), Some(2)));
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("héllo wörld", 7), "héllo w");
        assert_eq!(truncate_chars("short", 100), "short");
    }
}
