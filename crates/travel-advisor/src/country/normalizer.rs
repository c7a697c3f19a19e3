//! Free-text country names to canonical English names

use super::table::{BY_ENGLISH, BY_KEY, FRENCH_TO_ENGLISH, ISO_CODES};
use crate::api::{CountryDirectory, CountryRecord};
use crate::error::Result;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Resolves country names typed in French or English
///
/// Static tables are consulted first; the country directory is the last
/// resort. Network failures never surface as errors.
#[derive(Clone, Default)]
pub struct CountryNormalizer {
    directory: Option<Arc<dyn CountryDirectory>>,
}

impl CountryNormalizer {
    /// Create a normalizer backed by a country directory
    pub fn new(directory: Arc<dyn CountryDirectory>) -> Self {
        Self {
            directory: Some(directory),
        }
    }

    /// Create a normalizer that only knows the static tables
    pub fn offline() -> Self {
        Self { directory: None }
    }

    /// Static-table resolution (exact key, English value, then substring)
    pub fn resolve_static(input: &str) -> Option<&'static str> {
        let needle = input.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        if let Some(english) = BY_KEY.get(needle.as_str()) {
            return Some(english);
        }

        if let Some(english) = BY_ENGLISH.get(&needle) {
            return Some(english);
        }

        FRENCH_TO_ENGLISH
            .iter()
            .find(|(key, _)| key.contains(needle.as_str()) || needle.contains(key))
            .map(|&(_, english)| english)
    }

    /// Canonical English name, or `None` when the input is not recognized
    #[instrument(skip(self))]
    pub async fn normalize(&self, input: &str) -> Option<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        if let Some(english) = Self::resolve_static(trimmed) {
            debug!(canonical = english, "Resolved from static table");
            return Some(english.to_string());
        }

        match self.lookup(trimmed).await {
            Ok(Some(record)) => {
                debug!(canonical = %record.name.common, "Resolved through directory");
                return Some(record.name.common);
            }
            Ok(None) => debug!("Directory has no match"),
            Err(e) => warn!("Country directory unavailable: {e}"),
        }

        (trimmed.chars().count() > 2).then(|| title_case(trimmed))
    }

    /// ISO alpha-2 code for a canonical name
    pub async fn iso_code(&self, canonical: &str) -> Option<String> {
        if let Some(code) = ISO_CODES.get(canonical) {
            return Some((*code).to_string());
        }

        match self.lookup(canonical).await {
            Ok(Some(record)) if !record.cca2.is_empty() => Some(record.cca2),
            Ok(_) => None,
            Err(e) => {
                warn!("Country code lookup failed for {canonical}: {e}");
                None
            }
        }
    }

    /// Full directory record for a canonical name
    pub async fn record(&self, canonical: &str) -> Result<Option<CountryRecord>> {
        self.lookup(canonical).await
    }

    async fn lookup(&self, name: &str) -> Result<Option<CountryRecord>> {
        match &self.directory {
            Some(directory) => directory.lookup(name).await,
            None => Ok(None),
        }
    }
}

/// Upper-case the first letter of every word, lower-case the rest
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut at_word_start = true;
    for c in input.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
