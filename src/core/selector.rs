//! Evidence source selection.
//!
//! Filters the registry by category, samples a handful of sources and
//! synthesizes claim-specific evidence for each. Used when no external
//! retriever supplies real results.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Category, CredibleSource, EvidenceItem, SourceType};

use super::random::RandomSource;
use super::registry::SourceRegistry;
use super::templates;

/// Bounds of the sample size draw
pub const MIN_SAMPLE: i64 = 3;
pub const MAX_SAMPLE: i64 = 6;

/// Bounds of the synthesized relevance score
pub const MIN_RELEVANCE: i64 = 70;
pub const MAX_RELEVANCE: i64 = 95;

/// How far back a synthesized publish date may fall
pub const MAX_AGE_DAYS: i64 = 30;

/// Which source types may support a claim of each category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceRouting {
    routes: HashMap<Category, Vec<SourceType>>,
}

impl Default for SourceRouting {
    fn default() -> Self {
        let general = vec![SourceType::News, SourceType::FactCheck];
        let routes = HashMap::from([
            (Category::Health, vec![SourceType::Health, SourceType::FactCheck]),
            (Category::Science, vec![SourceType::Science, SourceType::FactCheck]),
            (Category::Politics, general.clone()),
            (Category::Economics, general.clone()),
            (Category::General, general),
        ]);
        Self { routes }
    }
}

impl SourceRouting {
    /// Default routing with per-category replacements applied
    pub fn with_overrides(overrides: &HashMap<Category, Vec<SourceType>>) -> Self {
        let mut routing = Self::default();
        for (category, types) in overrides {
            routing.routes.insert(*category, types.clone());
        }
        routing
    }

    pub fn allowed(&self, category: Category) -> &[SourceType] {
        self.routes.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn allows(&self, category: Category, source_type: SourceType) -> bool {
        self.allowed(category).contains(&source_type)
    }
}

/// Registry entries eligible for a category, in registry order
pub fn candidate_pool<'a>(
    category: Category,
    registry: &'a SourceRegistry,
    routing: &SourceRouting,
) -> Vec<&'a CredibleSource> {
    registry
        .sources()
        .iter()
        .filter(|s| routing.allows(category, s.source_type))
        .collect()
}

/// Pick and enrich a random sample of eligible sources
pub fn select(
    claim: &str,
    keywords: &[String],
    category: Category,
    registry: &SourceRegistry,
    routing: &SourceRouting,
    today: NaiveDate,
    rng: &mut dyn RandomSource,
) -> Vec<EvidenceItem> {
    let pool = candidate_pool(category, registry, routing);
    if pool.is_empty() {
        debug!(%category, "No eligible sources for category");
        return Vec::new();
    }

    let wanted = rng.int_in(MIN_SAMPLE, MAX_SAMPLE) as usize;
    let picked = rng.sample_indices(pool.len(), wanted.min(pool.len()));
    debug!(%category, pool = pool.len(), picked = picked.len(), "Sampled sources");

    picked
        .into_iter()
        .map(|idx| enrich(pool[idx], claim, keywords, today, &mut *rng))
        .collect()
}

/// Attach synthesized per-claim fields to a registry entry
pub fn enrich(
    source: &CredibleSource,
    claim: &str,
    keywords: &[String],
    today: NaiveDate,
    rng: &mut dyn RandomSource,
) -> EvidenceItem {
    let pool_len = templates::title_templates(source.source_type).len();
    let title_idx = rng.index(pool_len);
    let excerpt_idx = rng.index(templates::EXCERPTS.len());
    let days_ago = rng.int_in(0, MAX_AGE_DAYS);
    let relevance = rng.int_in(MIN_RELEVANCE, MAX_RELEVANCE);

    EvidenceItem {
        source: source.clone(),
        title: templates::render_title(claim, keywords, source.source_type, title_idx),
        url: templates::source_url(&source.base_url, claim),
        excerpt: templates::render_excerpt(excerpt_idx).to_string(),
        publish_date: today - Duration::days(days_ago),
        relevance_score: relevance as u8,
    }
}
