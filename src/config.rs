//! Configuration for factcheck.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (FACTCHECK_API_KEY, FACTCHECK_REGISTRY)
//! 2. Config file (.factcheck/config.yaml)
//! 3. Defaults (built-in registry, offline synthesis)
//!
//! Config file discovery:
//! - Searches current directory and parents for .factcheck/config.yaml
//! - Falls back to the user config dir (~/.config/factcheck/config.yaml)
//! - Paths in a project config are relative to the project root (parent of
//!   .factcheck/); paths in the user config are relative to its directory

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::adapters::factcheck::{FactCheckToolsConfig, DEFAULT_ENDPOINT};
use crate::adapters::FactCheckToolsClient;
use crate::core::registry::SourceRegistry;
use crate::core::selector::SourceRouting;
use crate::core::FactChecker;
use crate::domain::{Category, SourceType};

pub const ENV_API_KEY: &str = "FACTCHECK_API_KEY";
pub const ENV_REGISTRY: &str = "FACTCHECK_REGISTRY";

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    /// Registry YAML file (relative to project root)
    pub registry: Option<String>,
    #[serde(default)]
    pub routing: HashMap<Category, Vec<SourceType>>,
    #[serde(default)]
    pub retrieval: Option<RetrievalConfig>,
    #[serde(default)]
    pub synthesis: Option<SynthesisConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetrievalConfig {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub language_code: Option<String>,
    pub page_size: Option<u32>,
    pub unknown_publisher_credibility: Option<u8>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SynthesisConfig {
    pub direct_match_confidence: Option<u8>,
}

/// Retrieval settings after defaults are applied
#[derive(Debug, Clone)]
pub struct RetrievalSettings {
    pub api_key: Option<String>,
    pub endpoint: String,
    pub timeout_seconds: u64,
    pub language_code: Option<String>,
    pub page_size: u32,
    pub unknown_publisher_credibility: u8,
    pub direct_match_confidence: u8,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_seconds: 10,
            language_code: Some("en".to_string()),
            page_size: 10,
            unknown_publisher_credibility: 75,
            direct_match_confidence: 90,
        }
    }
}

impl RetrievalSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Client settings, if an API key is configured
    pub fn client_config(&self) -> Option<FactCheckToolsConfig> {
        let api_key = self.api_key.clone()?;
        Some(FactCheckToolsConfig {
            endpoint: self.endpoint.clone(),
            api_key,
            language_code: self.language_code.clone(),
            page_size: self.page_size,
            unknown_publisher_credibility: self.unknown_publisher_credibility,
            direct_match_confidence: self.direct_match_confidence,
        })
    }
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    /// Registry file, or None for the built-in list
    pub registry: Option<PathBuf>,
    /// Per-category routing overrides
    pub routing: HashMap<Category, Vec<SourceType>>,
    /// Retrieval settings
    pub retrieval: RetrievalSettings,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Load the configured registry, or the built-in one
    pub fn load_registry(&self) -> Result<SourceRegistry> {
        match self.registry {
            Some(ref path) => SourceRegistry::from_file(path),
            None => Ok(SourceRegistry::default()),
        }
    }

    pub fn routing(&self) -> SourceRouting {
        SourceRouting::with_overrides(&self.routing)
    }

    /// Build the engine; `live` wires in the Fact Check Tools reviewer when
    /// an API key is available
    pub fn build_engine(&self, live: bool) -> Result<FactChecker> {
        let registry = Arc::new(self.load_registry()?);
        let mut engine = FactChecker::new(Arc::clone(&registry))
            .with_routing(self.routing())
            .with_retrieval_timeout(self.retrieval.timeout());

        if live {
            if let Some(client_config) = self.retrieval.client_config() {
                let client = FactCheckToolsClient::new(client_config, registry);
                engine = engine.with_reviewer(Arc::new(client));
            }
        }

        Ok(engine)
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".factcheck").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    let user_config = dirs::config_dir()?.join("factcheck").join("config.yaml");
    user_config.exists().then_some(user_config)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the project root
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Merge a parsed config file into defaults
fn resolve_file(config: ConfigFile, config_path: &Path) -> ResolvedConfig {
    // Project configs resolve against the parent of .factcheck/
    let config_dir = config_path.parent().unwrap_or(Path::new("."));
    let base_dir = if config_dir.file_name().map_or(false, |n| n == ".factcheck") {
        config_dir.parent().unwrap_or(config_dir)
    } else {
        config_dir
    };

    let defaults = RetrievalSettings::default();
    let retrieval = config.retrieval.as_ref();
    let synthesis = config.synthesis.as_ref();

    ResolvedConfig {
        registry: config.registry.as_deref().map(|p| resolve_path(base_dir, p)),
        routing: config.routing,
        retrieval: RetrievalSettings {
            api_key: None,
            endpoint: retrieval
                .and_then(|r| r.endpoint.clone())
                .unwrap_or(defaults.endpoint),
            timeout_seconds: retrieval
                .and_then(|r| r.timeout_seconds)
                .unwrap_or(defaults.timeout_seconds),
            language_code: retrieval
                .and_then(|r| r.language_code.clone())
                .or(defaults.language_code),
            page_size: retrieval
                .and_then(|r| r.page_size)
                .unwrap_or(defaults.page_size),
            unknown_publisher_credibility: retrieval
                .and_then(|r| r.unknown_publisher_credibility)
                .unwrap_or(defaults.unknown_publisher_credibility),
            direct_match_confidence: synthesis
                .and_then(|s| s.direct_match_confidence)
                .unwrap_or(defaults.direct_match_confidence),
        },
        config_file: Some(config_path.to_path_buf()),
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let mut resolved = match find_config_file() {
        Some(config_path) => {
            let config = load_config_file(&config_path)?;
            resolve_file(config, &config_path)
        }
        None => ResolvedConfig::default(),
    };

    // Environment overrides
    if let Some(registry) = non_empty_env(ENV_REGISTRY) {
        resolved.registry = Some(PathBuf::from(registry));
    }
    resolved.retrieval.api_key = non_empty_env(ENV_API_KEY);

    Ok(resolved)
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}
