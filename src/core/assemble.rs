//! Packaging of the final result.

use chrono::{DateTime, Utc};

use crate::domain::{AnalysisResult, EvidenceItem, FeatureAnalysis, Verdict};

/// Build the output record, stamped now
pub fn assemble(
    claim: &str,
    analysis: FeatureAnalysis,
    sources: Vec<EvidenceItem>,
    verdict: Verdict,
    confidence: u8,
) -> AnalysisResult {
    assemble_at(claim, analysis, sources, verdict, confidence, Utc::now())
}

/// Build the output record with an explicit timestamp
pub fn assemble_at(
    claim: &str,
    analysis: FeatureAnalysis,
    sources: Vec<EvidenceItem>,
    verdict: Verdict,
    confidence: u8,
    timestamp: DateTime<Utc>,
) -> AnalysisResult {
    AnalysisResult {
        claim: claim.to_string(),
        analysis,
        sources,
        verdict,
        confidence: confidence.min(100),
        timestamp,
    }
}
