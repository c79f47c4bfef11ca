//! Feature analysis of a claim.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Topical category of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Health,
    Politics,
    Science,
    Economics,
    General,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Health => "health",
            Category::Politics => "politics",
            Category::Science => "science",
            Category::Economics => "economics",
            Category::General => "general",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse sentiment of the claim wording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        };
        f.write_str(s)
    }
}

/// Syntactic complexity tier, from average words per sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    /// Confidence multiplier for this tier
    pub fn confidence_factor(&self) -> f64 {
        match self {
            Complexity::Low => 1.1,
            Complexity::Medium => 1.0,
            Complexity::High => 0.9,
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Complexity::Low => "low",
            Complexity::Medium => "medium",
            Complexity::High => "high",
        };
        f.write_str(s)
    }
}

/// Features extracted from a single claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureAnalysis {
    /// At most ten keywords, in order of first occurrence
    pub keywords: Vec<String>,

    /// Topical category
    #[serde(rename = "type")]
    pub category: Category,

    pub sentiment: Sentiment,

    pub complexity: Complexity,

    /// Claim length in characters
    pub length: usize,
}
