//! Adapter interfaces for external evidence collaborators.
//!
//! Adapters let real search or fact-check services stand in for the
//! synthetic evidence the engine generates on its own. Their failures are
//! absorbed by the engine, never propagated.

pub mod factcheck;

use anyhow::Result;
use async_trait::async_trait;

use crate::core::synthesis::DirectMatch;
use crate::domain::{EvidenceItem, FeatureAnalysis};

// Re-export the Fact Check Tools adapter
pub use factcheck::{FactCheckToolsClient, FactCheckToolsConfig};

/// Supplies real evidence in place of synthesized sources
#[async_trait]
pub trait EvidenceRetriever: Send + Sync {
    /// Human-readable adapter name
    fn name(&self) -> &str;

    /// Ranked evidence for a claim; the engine uses the list verbatim
    async fn retrieve(&self, claim: &str, analysis: &FeatureAnalysis) -> Result<Vec<EvidenceItem>>;
}

/// Supplies a definite verdict when a direct match exists
#[async_trait]
pub trait VerdictAnnotator: Send + Sync {
    /// Human-readable adapter name
    fn name(&self) -> &str;

    /// `Ok(None)` when nothing qualifies as a direct match
    async fn annotate(&self, claim: &str, analysis: &FeatureAnalysis)
        -> Result<Option<DirectMatch>>;
}

/// Answer of a [`ClaimReviewer`] lookup
#[derive(Debug, Clone, PartialEq)]
pub enum Review {
    /// A definite rating; overrides the heuristic
    Direct(DirectMatch),
    /// No definite rating; evidence for the heuristic
    Evidence(Vec<EvidenceItem>),
}

/// Supplies a direct match or evidence from a single lookup.
///
/// Takes the place of both an annotator and a retriever, so a backend that
/// answers both questions is queried once per claim.
#[async_trait]
pub trait ClaimReviewer: Send + Sync {
    /// Human-readable adapter name
    fn name(&self) -> &str;

    async fn review(&self, claim: &str, analysis: &FeatureAnalysis) -> Result<Review>;
}
