//! The credible-source registry.
//!
//! Built once at startup (built-in list or a YAML file), validated, then
//! shared read-only between analyses.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;

use crate::domain::{CredibleSource, SourceType};

/// Registry construction errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Registry contains no sources")]
    Empty,

    #[error("Source #{index} has an empty name")]
    EmptyName { index: usize },

    #[error("Source '{name}' has an empty baseUrl")]
    EmptyBaseUrl { name: String },

    #[error("Source '{name}' baseUrl must be a bare domain, got '{base_url}'")]
    SchemeInBaseUrl { name: String, base_url: String },

    #[error("Source '{name}' credibility score out of range: {score} > 100")]
    CredibilityOutOfRange { name: String, score: u8 },

    #[error("Duplicate source name: {name}")]
    DuplicateName { name: String },
}

/// Immutable, validated set of credible sources
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    sources: Vec<CredibleSource>,
}

impl SourceRegistry {
    /// Validate and wrap a list of sources
    pub fn new(sources: Vec<CredibleSource>) -> Result<Self, RegistryError> {
        validate(&sources)?;
        Ok(Self { sources })
    }

    /// Parse a YAML list of sources
    pub fn from_yaml(content: &str) -> Result<Self> {
        let sources: Vec<CredibleSource> =
            serde_yaml::from_str(content).context("Failed to parse source registry YAML")?;
        Ok(Self::new(sources)?)
    }

    /// Load a registry file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read source registry: {}", path.display()))?;

        Self::from_yaml(&content)
            .with_context(|| format!("Invalid source registry: {}", path.display()))
    }

    pub fn sources(&self) -> &[CredibleSource] {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Find a source by domain, accepting subdomains ("www.snopes.com")
    pub fn find_by_domain(&self, domain: &str) -> Option<&CredibleSource> {
        let domain = domain.trim().trim_start_matches("www.").to_lowercase();

        self.sources.iter().find(|s| {
            let base = s.base_url.to_lowercase();
            domain == base || domain.ends_with(&format!(".{}", base))
        })
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self {
            sources: default_sources(),
        }
    }
}

fn validate(sources: &[CredibleSource]) -> Result<(), RegistryError> {
    if sources.is_empty() {
        return Err(RegistryError::Empty);
    }

    let mut seen = HashSet::new();
    for (index, source) in sources.iter().enumerate() {
        if source.name.trim().is_empty() {
            return Err(RegistryError::EmptyName { index });
        }
        if source.base_url.trim().is_empty() {
            return Err(RegistryError::EmptyBaseUrl {
                name: source.name.clone(),
            });
        }
        if source.base_url.contains("://") {
            return Err(RegistryError::SchemeInBaseUrl {
                name: source.name.clone(),
                base_url: source.base_url.clone(),
            });
        }
        if source.credibility_score > 100 {
            return Err(RegistryError::CredibilityOutOfRange {
                name: source.name.clone(),
                score: source.credibility_score,
            });
        }
        if !seen.insert(source.name.as_str()) {
            return Err(RegistryError::DuplicateName {
                name: source.name.clone(),
            });
        }
    }

    Ok(())
}

/// The built-in outlet list
pub fn default_sources() -> Vec<CredibleSource> {
    vec![
        CredibleSource::new("Reuters", "reuters.com", 95, SourceType::News),
        CredibleSource::new("Associated Press", "apnews.com", 94, SourceType::News),
        CredibleSource::new("BBC News", "bbc.com", 92, SourceType::News),
        CredibleSource::new("NPR", "npr.org", 91, SourceType::News),
        CredibleSource::new("Snopes", "snopes.com", 89, SourceType::FactCheck),
        CredibleSource::new("PolitiFact", "politifact.com", 88, SourceType::FactCheck),
        CredibleSource::new("FactCheck.org", "factcheck.org", 90, SourceType::FactCheck),
        CredibleSource::new("World Health Organization", "who.int", 96, SourceType::Health),
        CredibleSource::new("CDC", "cdc.gov", 95, SourceType::Health),
        CredibleSource::new("NASA", "nasa.gov", 97, SourceType::Science),
    ]
}
