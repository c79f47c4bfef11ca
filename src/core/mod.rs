//! Core analysis logic.
//!
//! This module contains:
//! - Features: Keyword, category, sentiment and complexity extraction
//! - Registry: The validated credible-source list
//! - Selector: Category routing and synthetic evidence
//! - Synthesis: Verdict and confidence scoring
//! - Engine: The FactChecker that runs the whole pipeline

pub mod assemble;
pub mod engine;
pub mod features;
pub mod random;
pub mod registry;
pub mod selector;
pub mod synthesis;
pub mod templates;

// Re-export commonly used types
pub use assemble::{assemble, assemble_at};
pub use engine::FactChecker;
pub use features::extract;
pub use random::{seeded_random, thread_random, FixedRandom, RandomSource, SeededRandom};
pub use registry::{RegistryError, SourceRegistry};
pub use selector::{select, SourceRouting};
pub use synthesis::{synthesize, DirectMatch, Synthesis};
