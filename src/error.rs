//! Error types for the engine boundary.
//!
//! Collaborator failures never leave the engine; they are logged and turned
//! into an empty source list. Only caller contract violations surface here.

use thiserror::Error;

use crate::core::registry::RegistryError;

/// Errors raised at the engine boundary
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid claim: {reason}")]
    InvalidInput { reason: String },

    #[error("Evidence retrieval failed: {0}")]
    RetrievalFailure(String),

    #[error("Invalid source registry: {0}")]
    InvalidRegistry(#[from] RegistryError),
}
