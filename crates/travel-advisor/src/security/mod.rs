//! Country security assessment: news evidence and verdicts

pub mod analyzer;
pub mod evidence;

pub use analyzer::{Recommendation, SecurityAnalyzer, SecurityLevel, SecurityVerdict};
pub use evidence::{EvidenceAggregator, dedupe_by_title};
