//! Country name resolution and static risk classification

pub mod normalizer;
pub mod risk;
mod table;

pub use normalizer::{CountryNormalizer, title_case};
pub use risk::{RiskTier, classify_risk};
