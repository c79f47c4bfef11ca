//! Verdicts and the engine's output record.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::analysis::FeatureAnalysis;
use super::source::EvidenceItem;

/// Discrete credibility verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictType {
    True,
    Mixed,
    Unverified,
    False,
}

impl VerdictType {
    /// Map a verdict score onto the descending threshold ladder
    pub fn from_score(score: f64) -> Self {
        if score > 85.0 {
            VerdictType::True
        } else if score > 70.0 {
            VerdictType::Mixed
        } else if score > 50.0 {
            VerdictType::Unverified
        } else {
            VerdictType::False
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VerdictType::True => "Likely True",
            VerdictType::Mixed => "Mixed/Partial",
            VerdictType::Unverified => "Unverified",
            VerdictType::False => "Likely False",
        }
    }
}

impl fmt::Display for VerdictType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VerdictType::True => "true",
            VerdictType::Mixed => "mixed",
            VerdictType::Unverified => "unverified",
            VerdictType::False => "false",
        };
        f.write_str(s)
    }
}

/// Verdict with its human-readable label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    #[serde(rename = "type")]
    pub verdict_type: VerdictType,
    pub label: String,
}

impl Verdict {
    pub fn new(verdict_type: VerdictType) -> Self {
        Self {
            verdict_type,
            label: verdict_type.label().to_string(),
        }
    }

    pub fn unverified() -> Self {
        Self::new(VerdictType::Unverified)
    }
}

impl From<VerdictType> for Verdict {
    fn from(verdict_type: VerdictType) -> Self {
        Self::new(verdict_type)
    }
}

/// The complete result of analysing one claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub claim: String,

    pub analysis: FeatureAnalysis,

    /// Never null; empty when no evidence was found
    pub sources: Vec<EvidenceItem>,

    pub verdict: Verdict,

    /// 0-100
    pub confidence: u8,

    /// When the result was assembled
    pub timestamp: DateTime<Utc>,
}
