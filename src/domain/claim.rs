//! Claim text accepted by the engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Minimum claim length in characters, after trimming
pub const MIN_CLAIM_CHARS: usize = 10;

/// A validated, trimmed claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claim(String);

impl Claim {
    /// Validate raw input at the calling boundary
    pub fn parse(raw: &str) -> Result<Self, EngineError> {
        let text = raw.trim();

        if text.is_empty() {
            return Err(EngineError::InvalidInput {
                reason: "claim is empty".to_string(),
            });
        }

        let chars = text.chars().count();
        if chars < MIN_CLAIM_CHARS {
            return Err(EngineError::InvalidInput {
                reason: format!(
                    "claim must be at least {} characters long (got {})",
                    MIN_CLAIM_CHARS, chars
                ),
            });
        }

        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Claim {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
