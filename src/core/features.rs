//! Text feature extraction.
//!
//! Turns claim text into keywords, a topical category, a sentiment label
//! and a complexity tier. Deterministic: the same text always yields the
//! same [`FeatureAnalysis`].

use crate::domain::{Category, Complexity, FeatureAnalysis, Sentiment};

/// Maximum number of keywords kept per claim
pub const MAX_KEYWORDS: usize = 10;

/// Tokens this short or shorter are never keywords
const MIN_KEYWORD_CHARS: usize = 4;

pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
];

/// Category vocabularies, in priority order. Matching is by substring.
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Health,
        &[
            "health", "medical", "disease", "vaccine", "treatment", "doctor", "hospital",
            "medicine", "covid", "virus", "bacteria",
        ],
    ),
    (
        Category::Politics,
        &[
            "government", "president", "election", "policy", "congress", "senate", "vote",
            "political", "democrat", "republican",
        ],
    ),
    (
        Category::Science,
        &[
            "research", "study", "scientist", "experiment", "data", "climate", "space",
            "technology", "scientific",
        ],
    ),
    (
        Category::Economics,
        &[
            "economy", "market", "stock", "price", "inflation", "economic", "financial",
            "money", "business",
        ],
    ),
];

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "amazing", "wonderful", "fantastic", "awesome", "brilliant",
    "outstanding", "perfect",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "horrible", "disgusting", "worst", "hate", "fail", "wrong",
    "false",
];

/// Run every extractor over the claim
pub fn extract(claim: &str) -> FeatureAnalysis {
    FeatureAnalysis {
        keywords: extract_keywords(claim),
        category: classify(claim),
        sentiment: sentiment(claim),
        complexity: complexity(claim),
        length: claim.chars().count(),
    }
}

/// Split lower-cased text into runs of word characters
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// First ten distinct tokens that are long enough and not stop words
pub fn extract_keywords(text: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();

    for token in tokenize(text) {
        if keywords.len() == MAX_KEYWORDS {
            break;
        }
        if token.chars().count() < MIN_KEYWORD_CHARS || STOP_WORDS.contains(&token.as_str()) {
            continue;
        }
        if !keywords.contains(&token) {
            keywords.push(token);
        }
    }

    keywords
}

/// First category whose vocabulary appears anywhere in the claim
pub fn classify(claim: &str) -> Category {
    let lower = claim.to_lowercase();

    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::General)
}

/// Positive vs negative word count over whitespace-separated words
pub fn sentiment(text: &str) -> Sentiment {
    let lower = text.to_lowercase();
    let (mut positive, mut negative) = (0usize, 0usize);

    for word in lower.split_whitespace() {
        if POSITIVE_WORDS.contains(&word) {
            positive += 1;
        } else if NEGATIVE_WORDS.contains(&word) {
            negative += 1;
        }
    }

    match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => Sentiment::Positive,
        std::cmp::Ordering::Less => Sentiment::Negative,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    }
}

/// Average words per sentence, bucketed
pub fn complexity(text: &str) -> Complexity {
    let sentences = text
        .split(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
        .count();

    if sentences == 0 {
        return Complexity::Low;
    }

    let words = text.split_whitespace().count();
    let average = words as f64 / sentences as f64;

    if average > 20.0 {
        Complexity::High
    } else if average > 12.0 {
        Complexity::Medium
    } else {
        Complexity::Low
    }
}
