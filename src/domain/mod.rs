//! Domain types for the fact checker.
//!
//! This module contains the core data structures:
//! - Claim: Validated input text
//! - FeatureAnalysis: Keywords, category, sentiment, complexity
//! - CredibleSource / EvidenceItem: Registry entries and per-claim evidence
//! - Verdict / AnalysisResult: Engine output

pub mod analysis;
pub mod claim;
pub mod source;
pub mod verdict;

// Re-export commonly used types
pub use analysis::{Category, Complexity, FeatureAnalysis, Sentiment};
pub use claim::{Claim, MIN_CLAIM_CHARS};
pub use source::{CredibleSource, EvidenceItem, SourceType};
pub use verdict::{AnalysisResult, Verdict, VerdictType};
