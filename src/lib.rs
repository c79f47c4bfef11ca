//! factcheck - Claim analysis and verdict synthesis engine
//!
//! Turns a natural-language claim into keywords, a topical category, a
//! sentiment label and a complexity tier, gathers weighted evidence, and
//! synthesizes a verdict with a confidence score.
//!
//! # Pipeline
//!
//! claim → feature extraction → source selection (or external retrieval)
//! → verdict synthesis (or direct match) → assembled [`AnalysisResult`]
//!
//! # Modules
//!
//! - `adapters`: External evidence collaborators (Google Fact Check Tools)
//! - `core`: Extraction, selection, synthesis and the engine
//! - `domain`: Data structures (Claim, FeatureAnalysis, EvidenceItem, Verdict)
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Check a claim
//! factcheck check "The COVID vaccine causes infertility in healthy women"
//!
//! # Reproducible offline run as JSON
//! factcheck check --seed 42 --json "The Earth is flat"
//!
//! # List the source registry
//! factcheck sources
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod error;

// Re-export main types at crate root for convenience
pub use core::{FactChecker, RandomSource, SourceRegistry};
pub use domain::{
    AnalysisResult, Category, Claim, Complexity, CredibleSource, EvidenceItem, FeatureAnalysis,
    Sentiment, SourceType, Verdict, VerdictType,
};
pub use error::EngineError;
