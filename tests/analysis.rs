//! Analysis Integration Tests
//!
//! End-to-end runs of the synchronous pipeline through the public API.

use std::collections::HashMap;

use chrono::{NaiveDate, TimeZone, Utc};
use factcheck::core::random::{seeded_random, FixedRandom};
use factcheck::core::{assemble_at, extract, FactChecker, SourceRegistry, SourceRouting};
use factcheck::{
    AnalysisResult, Category, Claim, Complexity, CredibleSource, EngineError, Sentiment,
    SourceType, VerdictType,
};

#[test]
fn test_health_claim_features() {
    let analysis = extract("The COVID vaccine causes infertility in healthy women");

    assert_eq!(
        analysis.keywords,
        vec!["covid", "vaccine", "causes", "infertility", "healthy", "women"]
    );
    assert_eq!(analysis.category, Category::Health);
    assert_eq!(analysis.sentiment, Sentiment::Neutral);
    assert_eq!(analysis.complexity, Complexity::Low);
    assert_eq!(analysis.length, 53);
}

#[test]
fn test_extraction_is_deterministic() {
    let claim = "Scientists published new research showing the climate is changing fast";
    assert_eq!(extract(claim), extract(claim));
}

#[test]
fn test_sources_respect_category_routing() {
    let checker = FactChecker::default();

    for seed in 0..25 {
        let result = checker.analyze_with(
            "The president announced a new election policy today",
            &mut seeded_random(seed),
        );
        assert_eq!(result.analysis.category, Category::Politics);

        // Politics draws from news and fact-check outlets only
        assert!((3..=6).contains(&result.sources.len()));
        for item in &result.sources {
            assert!(matches!(
                item.source.source_type,
                SourceType::News | SourceType::FactCheck
            ));
            assert!((70..=95).contains(&item.relevance_score));
        }

        let mut names: Vec<&str> = result.sources.iter().map(|s| s.source.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), result.sources.len(), "sources must be distinct");
    }
}

#[test]
fn test_confidence_stays_in_band() {
    let checker = FactChecker::default();
    for seed in 0..50 {
        let result = checker.analyze_with(
            "Inflation hit the stock market hard this quarter",
            &mut seeded_random(seed),
        );
        assert!(!result.sources.is_empty());
        assert!((30..=95).contains(&result.confidence));
        assert_eq!(result.verdict.label, result.verdict.verdict_type.label());
    }
}

#[test]
fn test_empty_pool_yields_unverified() {
    let registry = SourceRegistry::new(vec![CredibleSource::new(
        "Mayo Clinic",
        "mayoclinic.org",
        93,
        SourceType::Health,
    )])
    .unwrap();

    let mut overrides = HashMap::new();
    overrides.insert(Category::General, vec![SourceType::Science]);
    let checker = FactChecker::new(registry.into())
        .with_routing(SourceRouting::with_overrides(&overrides));

    let result = checker.analyze_with("Cats can see in the dark", &mut seeded_random(3));

    assert!(result.sources.is_empty());
    assert_eq!(result.verdict.verdict_type, VerdictType::Unverified);
    assert_eq!(result.verdict.label, "Unverified");
    assert_eq!(result.confidence, 30);
}

#[test]
fn test_invalid_registry_rejected() {
    let sources = vec![
        CredibleSource::new("Reuters", "reuters.com", 95, SourceType::News),
        CredibleSource::new("Reuters", "reuters.co.uk", 90, SourceType::News),
    ];
    assert!(matches!(
        FactChecker::from_sources(sources),
        Err(EngineError::InvalidRegistry(_))
    ));
}

#[test]
fn test_claim_validation() {
    assert!(matches!(Claim::parse("   "), Err(EngineError::InvalidInput { .. })));
    assert!(matches!(Claim::parse("too short"), Err(EngineError::InvalidInput { .. })));
    assert_eq!(
        Claim::parse("  The Earth is round  ").unwrap().as_str(),
        "The Earth is round"
    );
}

#[test]
fn test_json_contract_field_names() {
    let checker = FactChecker::default();
    let result = checker.analyze_with("Cats can see in the dark", &mut FixedRandom::zero());
    let json = serde_json::to_value(&result).unwrap();

    for key in ["claim", "analysis", "sources", "verdict", "confidence", "timestamp"] {
        assert!(json.get(key).is_some(), "missing {}", key);
    }
    assert_eq!(json["analysis"]["type"], "general");
    assert_eq!(json["analysis"]["complexity"], "low");
    assert_eq!(json["verdict"]["type"], "mixed");
    assert_eq!(json["verdict"]["label"], "Mixed/Partial");

    let source = &json["sources"][0];
    assert_eq!(source["name"], "Reuters");
    assert_eq!(source["baseUrl"], "reuters.com");
    assert_eq!(source["credibilityScore"], 95);
    assert_eq!(source["type"], "news");
    assert_eq!(source["relevanceScore"], 70);
    assert!(source["url"].as_str().unwrap().starts_with("https://reuters.com/"));

    let date = source["publishDate"].as_str().unwrap();
    assert!(NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok());
}

#[test]
fn test_assembled_result_round_trips() {
    let checker = FactChecker::default();
    let produced = checker.analyze_with("Cats can see in the dark", &mut FixedRandom::zero());

    let timestamp = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let result = assemble_at(
        &produced.claim,
        produced.analysis.clone(),
        produced.sources.clone(),
        produced.verdict.clone(),
        produced.confidence,
        timestamp,
    );

    let json = serde_json::to_string(&result).unwrap();
    let parsed: AnalysisResult = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, result);
    assert_eq!(parsed.timestamp, timestamp);
}
