//! Verdict and confidence synthesis.
//!
//! The heuristic combines average credibility, average relevance and source
//! count with one bounded noise draw each for the verdict and confidence.
//! An external annotator may short-circuit it with a [`DirectMatch`].

use serde::{Deserialize, Serialize};

use crate::domain::{EvidenceItem, FeatureAnalysis, Verdict, VerdictType};

use super::random::RandomSource;

/// Confidence reported when there is no evidence at all
pub const NO_EVIDENCE_CONFIDENCE: u8 = 30;

/// Confidence bounds once any evidence exists, in [0, 1]
pub const CONFIDENCE_FLOOR: f64 = 0.30;
pub const CONFIDENCE_CEILING: f64 = 0.95;

/// Integer noise added to the verdict score, inclusive
pub const SCORE_NOISE_MAX: i64 = 20;

/// Symmetric noise added to raw confidence
pub const CONFIDENCE_NOISE: f64 = 0.05;

/// Sources beyond this count add no confidence
const SATURATING_SOURCE_COUNT: usize = 5;

/// A definite verdict supplied by an external annotator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectMatch {
    pub verdict: Verdict,
    pub confidence: u8,
    pub sources: Vec<EvidenceItem>,
}

/// How the final verdict was reached
#[derive(Debug, Clone, PartialEq)]
pub enum Synthesis {
    /// An external match overrides the heuristic
    DirectMatch(DirectMatch),
    /// Heuristic synthesis over the selected sources
    Heuristic { verdict: Verdict, confidence: u8 },
}

impl Synthesis {
    pub fn verdict(&self) -> &Verdict {
        match self {
            Synthesis::DirectMatch(m) => &m.verdict,
            Synthesis::Heuristic { verdict, .. } => verdict,
        }
    }

    pub fn confidence(&self) -> u8 {
        match self {
            Synthesis::DirectMatch(m) => m.confidence,
            Synthesis::Heuristic { confidence, .. } => *confidence,
        }
    }

    pub fn is_direct_match(&self) -> bool {
        matches!(self, Synthesis::DirectMatch(_))
    }
}

/// Means over a non-empty evidence set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvidenceStats {
    pub avg_credibility: f64,
    pub avg_relevance: f64,
    pub count: usize,
}

impl EvidenceStats {
    pub fn from_sources(sources: &[EvidenceItem]) -> Option<Self> {
        if sources.is_empty() {
            return None;
        }

        let count = sources.len();
        let credibility: u32 = sources.iter().map(|s| u32::from(s.credibility())).sum();
        let relevance: u32 = sources.iter().map(|s| u32::from(s.relevance_score)).sum();

        Some(Self {
            avg_credibility: f64::from(credibility) / count as f64,
            avg_relevance: f64::from(relevance) / count as f64,
            count,
        })
    }
}

/// Verdict score before thresholding
pub fn verdict_score(stats: &EvidenceStats, noise: i64) -> f64 {
    0.4 * stats.avg_credibility + 0.3 * stats.avg_relevance + 5.0 * stats.count as f64 + noise as f64
}

/// Confidence in [0, 1], clamped to the floor/ceiling band
pub fn raw_confidence(stats: &EvidenceStats, analysis: &FeatureAnalysis, noise: f64) -> f64 {
    let coverage = stats.count.min(SATURATING_SOURCE_COUNT) as f64 / SATURATING_SOURCE_COUNT as f64;
    let base = (stats.avg_credibility / 100.0) * analysis.complexity.confidence_factor() * coverage;
    (base + noise).clamp(CONFIDENCE_FLOOR, CONFIDENCE_CEILING)
}

/// Scale a [0, 1] confidence onto 0-100, rounding halves to even
pub fn to_percent(confidence: f64) -> u8 {
    (confidence * 100.0).round_ties_even().clamp(0.0, 100.0) as u8
}

/// Heuristic verdict and confidence for a set of sources
pub fn synthesize(
    analysis: &FeatureAnalysis,
    sources: &[EvidenceItem],
    rng: &mut dyn RandomSource,
) -> (Verdict, u8) {
    let Some(stats) = EvidenceStats::from_sources(sources) else {
        return (Verdict::unverified(), NO_EVIDENCE_CONFIDENCE);
    };

    let score = verdict_score(&stats, rng.int_in(0, SCORE_NOISE_MAX));
    let verdict = Verdict::new(VerdictType::from_score(score));

    let noise = rng.float_in(-CONFIDENCE_NOISE, CONFIDENCE_NOISE);
    let confidence = to_percent(raw_confidence(&stats, analysis, noise));

    (verdict, confidence)
}

/// Choose between an external match and the heuristic
pub fn resolve(
    direct: Option<DirectMatch>,
    analysis: &FeatureAnalysis,
    sources: &[EvidenceItem],
    rng: &mut dyn RandomSource,
) -> Synthesis {
    match direct {
        Some(m) => Synthesis::DirectMatch(m),
        None => {
            let (verdict, confidence) = synthesize(analysis, sources, rng);
            Synthesis::Heuristic {
                verdict,
                confidence,
            }
        }
    }
}
