//! Google Fact Check Tools adapter.
//!
//! Queries the `claims:search` endpoint and turns published claim reviews
//! into evidence items, and into a direct verdict when a reviewer gave a
//! definite rating.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{ClaimReviewer, Review};
use crate::core::registry::SourceRegistry;
use crate::core::synthesis::DirectMatch;
use crate::domain::{CredibleSource, EvidenceItem, FeatureAnalysis, SourceType, Verdict, VerdictType};

pub const DEFAULT_ENDPOINT: &str = "https://factchecktools.googleapis.com/v1alpha1/claims:search";

/// Configuration for the Fact Check Tools client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactCheckToolsConfig {
    pub endpoint: String,
    pub api_key: String,
    pub language_code: Option<String>,
    pub page_size: u32,
    /// Credibility for publishers missing from the registry
    pub unknown_publisher_credibility: u8,
    /// Confidence reported with a direct match
    pub direct_match_confidence: u8,
}

impl FactCheckToolsConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            language_code: Some("en".to_string()),
            page_size: 10,
            unknown_publisher_credibility: 75,
            direct_match_confidence: 90,
        }
    }
}

/// Response body of `claims:search`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimSearchResponse {
    #[serde(default)]
    pub claims: Vec<ReviewedClaim>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewedClaim {
    pub text: Option<String>,
    pub claimant: Option<String>,
    pub claim_date: Option<String>,
    #[serde(default)]
    pub claim_review: Vec<ClaimReview>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimReview {
    pub publisher: Option<Publisher>,
    pub url: Option<String>,
    pub title: Option<String>,
    pub review_date: Option<String>,
    pub textual_rating: Option<String>,
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Publisher {
    pub name: Option<String>,
    pub site: Option<String>,
}

/// Fact Check Tools client
pub struct FactCheckToolsClient {
    config: FactCheckToolsConfig,
    registry: Arc<SourceRegistry>,
    client: reqwest::Client,
}

impl FactCheckToolsClient {
    pub fn new(config: FactCheckToolsConfig, registry: Arc<SourceRegistry>) -> Self {
        Self {
            config,
            registry,
            client: reqwest::Client::new(),
        }
    }

    /// Run one `claims:search` query
    pub async fn search(&self, query: &str) -> Result<ClaimSearchResponse> {
        let mut params = vec![
            ("query", query.to_string()),
            ("key", self.config.api_key.clone()),
            ("pageSize", self.config.page_size.to_string()),
        ];
        if let Some(ref lang) = self.config.language_code {
            params.push(("languageCode", lang.clone()));
        }

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&params)
            .send()
            .await
            .context("Failed to reach Fact Check Tools API")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!(
                "Fact Check Tools API request failed with status {}: {}",
                status,
                body.trim()
            );
        }

        let parsed: ClaimSearchResponse = response
            .json()
            .await
            .context("Failed to parse Fact Check Tools response")?;

        debug!(claims = parsed.claims.len(), "Fact Check Tools search complete");
        Ok(parsed)
    }
}

#[async_trait]
impl ClaimReviewer for FactCheckToolsClient {
    fn name(&self) -> &str {
        "fact-check-tools"
    }

    async fn review(&self, claim: &str, analysis: &FeatureAnalysis) -> Result<Review> {
        let response = self.search(claim).await?;
        let today = Utc::now().date_naive();
        Ok(to_review(&response, analysis, &self.registry, &self.config, today))
    }
}

const MIXED_RATINGS: &[&str] = &[
    "half", "mixed", "mixture", "partly", "partially", "mostly", "misleading", "exaggerat",
    "out of context",
];
const FALSE_RATINGS: &[&str] = &[
    "false", "pants on fire", "incorrect", "inaccurate", "fake", "not true", "untrue", "wrong",
    "hoax", "fabricated", "not accurate", "not correct",
];
const TRUE_RATINGS: &[&str] = &["true", "correct", "accurate"];

/// Map a reviewer's free-text rating onto a verdict type
pub fn rating_to_verdict(rating: &str) -> VerdictType {
    let rating = rating.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| rating.contains(w));

    // Order matters: "mostly false" is mixed, "incorrect" is not "correct"
    if has(MIXED_RATINGS) {
        VerdictType::Mixed
    } else if has(FALSE_RATINGS) {
        VerdictType::False
    } else if has(TRUE_RATINGS) {
        VerdictType::True
    } else {
        VerdictType::Unverified
    }
}

/// Bare host of a URL, without scheme, port or leading "www."
pub fn domain_of(url: &str) -> Option<String> {
    let rest = url.split_once("://").map(|(_, r)| r).unwrap_or(url);
    let host = rest.split(['/', '?', '#']).next()?.split(':').next()?;
    let host = host.trim_start_matches("www.").to_lowercase();
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}

/// Share of analysis keywords found in the reviewed text, mapped to 70-95
pub fn relevance(analysis: &FeatureAnalysis, reviewed_text: &str) -> u8 {
    if analysis.keywords.is_empty() {
        return 70;
    }

    let text = reviewed_text.to_lowercase();
    let hits = analysis
        .keywords
        .iter()
        .filter(|k| text.contains(k.as_str()))
        .count();
    let share = hits as f64 / analysis.keywords.len() as f64;

    (70.0 + 25.0 * share).round() as u8
}

fn parse_review_date(raw: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(raw)
        .map(|d| d.date_naive())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(raw.get(..10)?, "%Y-%m-%d").ok())
}

fn review_to_evidence(
    claim: &ReviewedClaim,
    review: &ClaimReview,
    analysis: &FeatureAnalysis,
    registry: &SourceRegistry,
    unknown_credibility: u8,
    today: NaiveDate,
) -> Option<EvidenceItem> {
    let url = review.url.clone()?;
    let publisher = review.publisher.as_ref();

    let base_url = publisher
        .and_then(|p| p.site.as_deref())
        .and_then(domain_of)
        .or_else(|| domain_of(&url))?;

    let known = registry.find_by_domain(&base_url);
    let name = publisher
        .and_then(|p| p.name.clone())
        .or_else(|| known.map(|s| s.name.clone()))
        .unwrap_or_else(|| base_url.clone());
    let credibility = known
        .map(|s| s.credibility_score)
        .unwrap_or(unknown_credibility);

    let reviewed_text = claim.text.clone().unwrap_or_default();
    let title = review
        .title
        .clone()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| format!("Fact Check: {}", reviewed_text));
    let publish_date = review
        .review_date
        .as_deref()
        .and_then(parse_review_date)
        .unwrap_or(today);

    Some(EvidenceItem {
        source: CredibleSource::new(name, base_url, credibility, SourceType::FactCheck),
        title,
        url,
        excerpt: reviewed_text.clone(),
        publish_date,
        relevance_score: relevance(analysis, &reviewed_text),
    })
}

/// Every review with a usable URL, in response order
pub fn reviews_to_evidence(
    response: &ClaimSearchResponse,
    analysis: &FeatureAnalysis,
    registry: &SourceRegistry,
    unknown_credibility: u8,
    today: NaiveDate,
) -> Vec<EvidenceItem> {
    response
        .claims
        .iter()
        .flat_map(|claim| {
            claim.claim_review.iter().filter_map(move |review| {
                review_to_evidence(claim, review, analysis, registry, unknown_credibility, today)
            })
        })
        .collect()
}

/// The first definite rating, with all reviews as supporting evidence
pub fn direct_match(
    response: &ClaimSearchResponse,
    analysis: &FeatureAnalysis,
    registry: &SourceRegistry,
    config: &FactCheckToolsConfig,
    today: NaiveDate,
) -> Option<DirectMatch> {
    let verdict_type = response
        .claims
        .iter()
        .flat_map(|c| c.claim_review.iter())
        .filter_map(|r| r.textual_rating.as_deref())
        .map(rating_to_verdict)
        .find(|v| *v != VerdictType::Unverified)?;

    Some(DirectMatch {
        verdict: Verdict::new(verdict_type),
        confidence: config.direct_match_confidence.min(100),
        sources: reviews_to_evidence(
            response,
            analysis,
            registry,
            config.unknown_publisher_credibility,
            today,
        ),
    })
}

/// A direct match when any rating is definite, otherwise every review as
/// evidence
pub fn to_review(
    response: &ClaimSearchResponse,
    analysis: &FeatureAnalysis,
    registry: &SourceRegistry,
    config: &FactCheckToolsConfig,
    today: NaiveDate,
) -> Review {
    match direct_match(response, analysis, registry, config, today) {
        Some(matched) => Review::Direct(matched),
        None => Review::Evidence(reviews_to_evidence(
            response,
            analysis,
            registry,
            config.unknown_publisher_credibility,
            today,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::features;

    const SAMPLE: &str = r#"{
      "claims": [
        {
          "text": "COVID vaccines cause infertility in women",
          "claimant": "Social media posts",
          "claimDate": "2021-01-10T00:00:00Z",
          "claimReview": [
            {
              "publisher": {"name": "PolitiFact", "site": "politifact.com"},
              "url": "https://www.politifact.com/factchecks/2021/covid-vaccine-infertility/",
              "title": "No, COVID-19 vaccines do not cause infertility",
              "reviewDate": "2021-01-12T00:00:00Z",
              "textualRating": "False",
              "languageCode": "en"
            },
            {
              "publisher": {"name": "Health Feedback"},
              "url": "https://healthfeedback.org/claimreview/covid-vaccines-infertility/",
              "textualRating": "Inaccurate",
              "languageCode": "en"
            }
          ]
        }
      ],
      "nextPageToken": "abc"
    }"#;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    #[test]
    fn test_rating_mapping() {
        assert_eq!(rating_to_verdict("False"), VerdictType::False);
        assert_eq!(rating_to_verdict("Pants on Fire!"), VerdictType::False);
        assert_eq!(rating_to_verdict("Incorrect"), VerdictType::False);
        assert_eq!(rating_to_verdict("Inaccurate"), VerdictType::False);
        assert_eq!(rating_to_verdict("Not accurate"), VerdictType::False);
        assert_eq!(rating_to_verdict("Not correct"), VerdictType::False);
        assert_eq!(rating_to_verdict("Mostly False"), VerdictType::Mixed);
        assert_eq!(rating_to_verdict("Half True"), VerdictType::Mixed);
        assert_eq!(rating_to_verdict("Misleading"), VerdictType::Mixed);
        assert_eq!(rating_to_verdict("True"), VerdictType::True);
        assert_eq!(rating_to_verdict("Correct"), VerdictType::True);
        assert_eq!(rating_to_verdict("Unproven"), VerdictType::Unverified);
    }

    #[test]
    fn test_domain_of() {
        assert_eq!(
            domain_of("https://www.politifact.com/factchecks/x/").as_deref(),
            Some("politifact.com")
        );
        assert_eq!(domain_of("snopes.com").as_deref(), Some("snopes.com"));
        assert_eq!(domain_of("http://example.org:8080?q=1").as_deref(), Some("example.org"));
        assert_eq!(domain_of("https:///path"), None);
    }

    #[test]
    fn test_reviews_to_evidence() {
        let response: ClaimSearchResponse = serde_json::from_str(SAMPLE).unwrap();
        let analysis = features::extract("The COVID vaccine causes infertility in healthy women");
        let registry = SourceRegistry::default();

        let items = reviews_to_evidence(&response, &analysis, &registry, 75, today());
        assert_eq!(items.len(), 2);

        let politifact = &items[0];
        assert_eq!(politifact.source.name, "PolitiFact");
        assert_eq!(politifact.source.base_url, "politifact.com");
        assert_eq!(politifact.source.credibility_score, 88);
        assert_eq!(politifact.source.source_type, SourceType::FactCheck);
        assert_eq!(politifact.title, "No, COVID-19 vaccines do not cause infertility");
        assert_eq!(politifact.publish_date, NaiveDate::from_ymd_opt(2021, 1, 12).unwrap());
        assert_eq!(politifact.excerpt, "COVID vaccines cause infertility in women");

        let unknown = &items[1];
        assert_eq!(unknown.source.base_url, "healthfeedback.org");
        assert_eq!(unknown.source.credibility_score, 75);
        assert_eq!(unknown.title, "Fact Check: COVID vaccines cause infertility in women");
        assert_eq!(unknown.publish_date, today());
    }

    #[test]
    fn test_relevance_from_keyword_overlap() {
        let analysis = features::extract("The COVID vaccine causes infertility in healthy women");
        // keywords: covid, vaccine, causes, infertility, healthy, women
        assert_eq!(relevance(&analysis, "COVID vaccines cause infertility in women"), 87);
        assert_eq!(relevance(&analysis, "Nothing related"), 70);
        assert_eq!(
            relevance(&analysis, "covid vaccine causes infertility in healthy women"),
            95
        );
    }

    #[test]
    fn test_direct_match_uses_first_definite_rating() {
        let response: ClaimSearchResponse = serde_json::from_str(SAMPLE).unwrap();
        let analysis = features::extract("The COVID vaccine causes infertility in healthy women");
        let config = FactCheckToolsConfig::new("key");

        let matched =
            direct_match(&response, &analysis, &SourceRegistry::default(), &config, today())
                .unwrap();
        assert_eq!(matched.verdict.verdict_type, VerdictType::False);
        assert_eq!(matched.verdict.label, "Likely False");
        assert_eq!(matched.confidence, 90);
        assert_eq!(matched.sources.len(), 2);
    }

    #[test]
    fn test_no_direct_match_without_definite_rating() {
        let json = r#"{"claims":[{"text":"x","claimReview":[{"url":"https://a.org/x","textualRating":"Unproven"}]}]}"#;
        let response: ClaimSearchResponse = serde_json::from_str(json).unwrap();
        let analysis = features::extract("Some claim about nothing");
        let config = FactCheckToolsConfig::new("key");

        assert!(
            direct_match(&response, &analysis, &SourceRegistry::default(), &config, today())
                .is_none()
        );
    }

    #[test]
    fn test_review_prefers_direct_match() {
        let response: ClaimSearchResponse = serde_json::from_str(SAMPLE).unwrap();
        let analysis = features::extract("The COVID vaccine causes infertility in healthy women");
        let config = FactCheckToolsConfig::new("key");

        match to_review(&response, &analysis, &SourceRegistry::default(), &config, today()) {
            Review::Direct(matched) => assert_eq!(matched.verdict.verdict_type, VerdictType::False),
            other => panic!("expected a direct match, got {:?}", other),
        }
    }

    #[test]
    fn test_review_falls_back_to_evidence() {
        let json = r#"{"claims":[{"text":"x","claimReview":[{"url":"https://a.org/x","textualRating":"Unproven"}]}]}"#;
        let response: ClaimSearchResponse = serde_json::from_str(json).unwrap();
        let analysis = features::extract("Some claim about nothing");
        let config = FactCheckToolsConfig::new("key");

        match to_review(&response, &analysis, &SourceRegistry::default(), &config, today()) {
            Review::Evidence(items) => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].source.base_url, "a.org");
                assert_eq!(items[0].credibility(), 75);
            }
            other => panic!("expected evidence, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_response_parses() {
        let response: ClaimSearchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.claims.is_empty());
    }
}
