//! Reference sources and the per-claim evidence built from them.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of outlet a registry entry represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceType {
    News,
    FactCheck,
    Health,
    Science,
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SourceType::News => "news",
            SourceType::FactCheck => "fact-check",
            SourceType::Health => "health",
            SourceType::Science => "science",
        };
        f.write_str(s)
    }
}

/// A registry entry: an outlet with a static credibility rating
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredibleSource {
    pub name: String,

    /// Domain without scheme, e.g. "reuters.com"
    pub base_url: String,

    /// Static rating, 0-100
    pub credibility_score: u8,

    #[serde(rename = "type")]
    pub source_type: SourceType,
}

impl CredibleSource {
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        credibility_score: u8,
        source_type: SourceType,
    ) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            credibility_score,
            source_type,
        }
    }
}

/// A source enriched with claim-specific fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceItem {
    #[serde(flatten)]
    pub source: CredibleSource,

    pub title: String,

    pub url: String,

    pub excerpt: String,

    /// Serialized as YYYY-MM-DD
    pub publish_date: NaiveDate,

    /// Topical match, 0-100
    pub relevance_score: u8,
}

impl EvidenceItem {
    pub fn credibility(&self) -> u8 {
        self.source.credibility_score
    }
}
