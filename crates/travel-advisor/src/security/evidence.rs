//! Security news gathering

use crate::api::{NewsArticle, NewsQuery, NewsSource};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Articles must mention at least one of these to count as evidence
const CRITICAL_KEYWORDS: &[&str] = &[
    "war",
    "conflict",
    "attack",
    "bombing",
    "terrorism",
    "violence",
    "crisis",
    "coup",
    "sanctions",
    "advisory",
    "warning",
    "danger",
    "risk",
    "threat",
    "security",
];

const DANGER_KEYWORDS: &[&str] = &[
    "war",
    "conflict",
    "terrorism",
    "violence",
    "crisis",
    "coup",
    "sanctions",
];

const CAUTION_KEYWORDS: &[&str] = &["protest", "unrest", "advisory", "caution", "alert"];

const LOOKBACK_DAYS: i64 = 30;
const PAGE_SIZE: u32 = 20;

/// The four security searches run for every country
pub fn security_queries(country: &str) -> [String; 4] {
    [
        format!("{country} travel advisory security warning conflict war"),
        format!("{country} war conflict violence terrorism attack bombing"),
        format!("{country} coup government crisis instability sanctions"),
        format!("{country} \"travel ban\" \"do not travel\" \"avoid travel\" embassy"),
    ]
}

/// Whether an article mentions a critical keyword
pub fn is_relevant(article: &NewsArticle) -> bool {
    let title = article.title.to_lowercase();
    let description = article.description.to_lowercase();
    CRITICAL_KEYWORDS
        .iter()
        .any(|k| title.contains(k) || description.contains(k))
}

/// Keep the first article per title, drop untitled ones, keep order
pub fn dedupe_by_title(articles: impl IntoIterator<Item = NewsArticle>) -> Vec<NewsArticle> {
    let mut seen = HashSet::new();
    articles
        .into_iter()
        .filter(|a| !a.title.is_empty() && seen.insert(a.title.clone()))
        .collect()
}

/// Keyword-presence stand-in used when no news source is configured
///
/// Looks at the query text only and yields at most one synthetic article.
pub fn heuristic_articles(country: &str, query: &str) -> Vec<NewsArticle> {
    let query = query.to_lowercase();
    if DANGER_KEYWORDS.iter().any(|k| query.contains(k)) {
        vec![NewsArticle::new(
            format!("Security concerns in {country}"),
            "Recent security developments",
        )]
    } else if CAUTION_KEYWORDS.iter().any(|k| query.contains(k)) {
        vec![NewsArticle::new(
            format!("Travel advisory for {country}"),
            "Caution advised",
        )]
    } else {
        Vec::new()
    }
}

/// Runs the security searches and merges their results
#[derive(Clone, Default)]
pub struct EvidenceAggregator {
    source: Option<Arc<dyn NewsSource>>,
}

impl EvidenceAggregator {
    pub fn new(source: Option<Arc<dyn NewsSource>>) -> Self {
        Self { source }
    }

    /// Deduplicated evidence for one country, in query order
    #[instrument(skip(self))]
    pub async fn gather(&self, country: &str) -> Vec<NewsArticle> {
        let mut collected = Vec::new();
        for query in security_queries(country) {
            let batch = match &self.source {
                Some(source) => {
                    let request = NewsQuery::new(query, LOOKBACK_DAYS, PAGE_SIZE);
                    match source.search(&request).await {
                        Ok(articles) => articles,
                        Err(e) => {
                            warn!("Security news search failed: {e}");
                            Vec::new()
                        }
                    }
                }
                None => heuristic_articles(country, &query),
            };
            collected.extend(batch.into_iter().filter(is_relevant));
        }

        let evidence = dedupe_by_title(collected);
        debug!(count = evidence.len(), "Security evidence gathered");
        evidence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::newsapi::MockNewsSource;
    use crate::error::AdvisorError;

    #[test]
    fn test_dedupe_keeps_first_copy() {
        let first = vec![
            NewsArticle::new("Clashes near the border", "first"),
            NewsArticle::new("Curfew extended", "a"),
        ];
        let second = vec![
            NewsArticle::new("Clashes near the border", "second"),
            NewsArticle::new("", "untitled"),
            NewsArticle::new("Airport reopened", "b"),
        ];

        let merged = dedupe_by_title(first.into_iter().chain(second));
        let titles: Vec<&str> = merged.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Clashes near the border", "Curfew extended", "Airport reopened"]);
        assert_eq!(merged[0].description, "first");
    }

    #[test]
    fn test_relevance_filter() {
        assert!(is_relevant(&NewsArticle::new("Travel WARNING issued", "")));
        assert!(is_relevant(&NewsArticle::new("Update", "Rising terrorism threat")));
        assert!(!is_relevant(&NewsArticle::new("New museum opens", "Art lovers rejoice")));
    }

    #[test]
    fn test_heuristic_articles() {
        let queries = security_queries("Peru");
        let danger = heuristic_articles("Peru", &queries[0]);
        assert_eq!(danger, vec![NewsArticle::new("Security concerns in Peru", "Recent security developments")]);

        let caution = heuristic_articles("Peru", "Peru protest march");
        assert_eq!(caution[0].title, "Travel advisory for Peru");

        assert!(heuristic_articles("Peru", "Peru food festival").is_empty());
    }

    #[tokio::test]
    async fn test_gather_without_source_yields_one_article() {
        let aggregator = EvidenceAggregator::default();
        let evidence = aggregator.gather("Portugal").await;
        assert_eq!(evidence.len(), 1);
        assert_eq!(evidence[0].title, "Security concerns in Portugal");
    }

    #[tokio::test]
    async fn test_gather_merges_batches() {
        let mut source = MockNewsSource::new();
        source.expect_search().times(4).returning(|query| {
            assert_eq!(query.lookback_days, 30);
            assert_eq!(query.page_size, 20);
            if query.query.contains("coup") {
                Err(AdvisorError::RateLimited { service: "NewsAPI" })
            } else {
                Ok(vec![
                    NewsArticle::new("Protests turn violent", "violence in the capital"),
                    NewsArticle::new("Cooking show renewed", "nothing to see"),
                ])
            }
        });

        let aggregator = EvidenceAggregator::new(Some(Arc::new(source)));
        let evidence = aggregator.gather("Kenya").await;
        assert_eq!(evidence, vec![NewsArticle::new("Protests turn violent", "violence in the capital")]);
    }
}
