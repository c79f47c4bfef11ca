//! Command-line interface for factcheck.
//!
//! Provides commands for checking a claim, listing the source registry
//! and showing the resolved configuration.

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::{self, ResolvedConfig};
use crate::core::random::seeded_random;
use crate::core::FactChecker;
use crate::domain::{AnalysisResult, Claim, CredibleSource};

/// factcheck - Claim analysis and verdict synthesis
#[derive(Parser, Debug)]
#[command(name = "factcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a claim
    Check {
        /// Claim text (reads --input or stdin if not provided)
        claim: Option<String>,

        /// Read the claim from a file
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,

        /// Seed the random source for a reproducible run (implies --offline)
        #[arg(long)]
        seed: Option<u64>,

        /// Never call external fact-check services
        #[arg(long)]
        offline: bool,
    },

    /// List the credible-source registry
    Sources {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Check {
                claim,
                input,
                json,
                seed,
                offline,
            } => check_claim(claim, input, json, seed, offline).await,
            Commands::Sources { json } => list_sources(json),
            Commands::Config => show_config(),
        }
    }
}

/// Claim text from the argument, a file, or piped stdin
fn read_claim(claim: Option<String>, input_file: Option<PathBuf>) -> Result<String> {
    if let Some(text) = claim {
        return Ok(text);
    }

    if let Some(path) = input_file {
        return std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read input file: {}", path.display()));
    }

    if io::stdin().is_terminal() {
        anyhow::bail!("No claim provided. Pass it as an argument, use --input <file>, or pipe it in");
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read from stdin")?;
    Ok(buffer)
}

/// Check a single claim
async fn check_claim(
    claim: Option<String>,
    input_file: Option<PathBuf>,
    json: bool,
    seed: Option<u64>,
    offline: bool,
) -> Result<()> {
    let raw = read_claim(claim, input_file)?;
    let claim = Claim::parse(&raw)?;

    let cfg = config::config()?;
    let live = !offline && seed.is_none();
    let engine: FactChecker = cfg.build_engine(live)?;

    let result = match seed {
        Some(seed) => engine.analyze_with(claim.as_str(), &mut seeded_random(seed)),
        None if live => engine.analyze_live(claim.as_str()).await,
        None => engine.analyze(claim.as_str()),
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).context("Failed to serialize result")?
        );
    } else {
        print_result(&result);
    }

    Ok(())
}

fn print_result(result: &AnalysisResult) {
    println!("Claim: {}", result.claim);
    println!(
        "Verdict: {} ({}% confidence)",
        result.verdict.label, result.confidence
    );
    println!(
        "Analysis: type={} sentiment={} complexity={} length={}",
        result.analysis.category,
        result.analysis.sentiment,
        result.analysis.complexity,
        result.analysis.length
    );
    if !result.analysis.keywords.is_empty() {
        println!("Keywords: {}", result.analysis.keywords.join(", "));
    }

    if result.sources.is_empty() {
        println!("\nNo supporting sources found");
    } else {
        println!("\nSources:");
        for item in &result.sources {
            println!(
                "  [{:>3}] {} ({}, credibility {})",
                item.relevance_score,
                item.source.name,
                item.source.source_type,
                item.source.credibility_score
            );
            println!("        {}", item.title);
            println!("        {} ({})", item.url, item.publish_date);
        }
    }

    eprintln!("\n[Checked at {}]", result.timestamp.to_rfc3339());
}

/// List the configured registry
fn list_sources(json: bool) -> Result<()> {
    let cfg = config::config()?;
    let registry = cfg.load_registry()?;

    if json {
        #[derive(serde::Serialize)]
        struct SourcesOutput<'a> {
            sources: &'a [CredibleSource],
            total: usize,
        }

        let output = SourcesOutput {
            sources: registry.sources(),
            total: registry.len(),
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Failed to serialize sources")?
        );
        return Ok(());
    }

    println!("{:<28} {:<18} {:<12} {:>5}", "NAME", "DOMAIN", "TYPE", "SCORE");
    println!("{}", "-".repeat(66));
    for source in registry.sources() {
        println!(
            "{:<28} {:<18} {:<12} {:>5}",
            source.name,
            source.base_url,
            source.source_type.to_string(),
            source.credibility_score
        );
    }
    println!("\n{} sources", registry.len());

    Ok(())
}

/// Show resolved configuration
fn show_config() -> Result<()> {
    let cfg: &ResolvedConfig = config::config()?;

    println!("factcheck configuration");
    println!("=======================");
    match cfg.config_file {
        Some(ref path) => println!("Config file:  {}", path.display()),
        None => println!("Config file:  (none, using defaults)"),
    }
    match cfg.registry {
        Some(ref path) => println!("Registry:     {}", path.display()),
        None => println!("Registry:     (built-in)"),
    }

    let retrieval = &cfg.retrieval;
    let key = match retrieval.api_key {
        Some(ref k) => mask_key(k),
        None => format!("(not set, export {} to enable)", config::ENV_API_KEY),
    };
    println!("API key:      {}", key);
    println!("Endpoint:     {}", retrieval.endpoint);
    println!("Timeout:      {}s", retrieval.timeout_seconds);
    println!("Page size:    {}", retrieval.page_size);
    println!("Direct match: {}% confidence", retrieval.direct_match_confidence);

    if !cfg.routing.is_empty() {
        println!("\nRouting overrides:");
        for (category, types) in &cfg.routing {
            let types: Vec<String> = types.iter().map(|t| t.to_string()).collect();
            println!("  {:<10} -> {}", category.as_str(), types.join(", "));
        }
    }

    Ok(())
}

/// Show only the last four characters of a secret
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check_command() {
        let cli = Cli::parse_from([
            "factcheck",
            "check",
            "The Earth is round",
            "--json",
            "--seed",
            "7",
        ]);
        match cli.command {
            Commands::Check {
                claim, json, seed, offline, ..
            } => {
                assert_eq!(claim.as_deref(), Some("The Earth is round"));
                assert!(json);
                assert_eq!(seed, Some(7));
                assert!(!offline);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_sources_command() {
        let cli = Cli::parse_from(["factcheck", "sources", "--json"]);
        assert!(matches!(cli.command, Commands::Sources { json: true }));
    }

    #[test]
    fn test_read_claim_prefers_argument() {
        let text = read_claim(Some("Water boils at 100C".to_string()), None).unwrap();
        assert_eq!(text, "Water boils at 100C");
    }

    #[test]
    fn test_read_claim_from_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "The moon is made of cheese\n").unwrap();

        let text = read_claim(None, Some(temp.path().to_path_buf())).unwrap();
        assert_eq!(text.trim(), "The moon is made of cheese");
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key("AIzaSyExample1234"), "****1234");
        assert_eq!(mask_key("abc"), "****");
    }
}
