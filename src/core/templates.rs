//! Title, excerpt and URL templates for synthesized evidence.
//!
//! Everything here is a pure function of its inputs. The random part
//! (which template) is chosen by the caller and passed in as an index.

use crate::domain::SourceType;

/// One title shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleTemplate {
    /// `{prefix}{first `take` chars of claim}{suffix}`
    Excerpt {
        prefix: &'static str,
        take: usize,
        suffix: &'static str,
    },
    /// `{prefix}{first keyword, or fallback}`
    Keyword {
        prefix: &'static str,
        fallback: &'static str,
    },
}

const FACT_CHECK_TITLES: &[TitleTemplate] = &[
    TitleTemplate::Excerpt { prefix: "Fact Check: ", take: 50, suffix: "..." },
    TitleTemplate::Excerpt { prefix: "Is it true that ", take: 40, suffix: "?" },
    TitleTemplate::Keyword { prefix: "Verifying claims about ", fallback: "recent news" },
];

const NEWS_TITLES: &[TitleTemplate] = &[
    TitleTemplate::Excerpt { prefix: "Breaking: ", take: 45, suffix: "..." },
    TitleTemplate::Excerpt { prefix: "Report: ", take: 50, suffix: "..." },
    TitleTemplate::Excerpt { prefix: "Analysis: ", take: 45, suffix: "..." },
];

const HEALTH_TITLES: &[TitleTemplate] = &[
    TitleTemplate::Excerpt { prefix: "Health Alert: ", take: 40, suffix: "..." },
    TitleTemplate::Excerpt { prefix: "Medical Update: ", take: 35, suffix: "..." },
    TitleTemplate::Excerpt { prefix: "Health Officials: ", take: 35, suffix: "..." },
];

const SCIENCE_TITLES: &[TitleTemplate] = &[
    TitleTemplate::Excerpt { prefix: "Study: ", take: 45, suffix: "..." },
    TitleTemplate::Excerpt { prefix: "Research: ", take: 40, suffix: "..." },
    TitleTemplate::Excerpt { prefix: "Scientists: ", take: 35, suffix: "..." },
];

pub const EXCERPTS: &[&str] = &[
    "Our investigation into this claim reveals important details that provide context and clarity...",
    "According to verified sources and expert analysis, the facts surrounding this matter are...",
    "Recent evidence and expert testimony suggest that the situation is more nuanced than initially reported...",
    "Multiple credible sources have confirmed key aspects of this story while highlighting areas that require further clarification...",
    "Our fact-checking team has reviewed available evidence and consulted with experts in the field...",
];

/// Maximum slug length in characters
pub const SLUG_MAX_CHARS: usize = 50;

/// Title pool for a source type
pub fn title_templates(source_type: SourceType) -> &'static [TitleTemplate] {
    match source_type {
        SourceType::FactCheck => FACT_CHECK_TITLES,
        SourceType::News => NEWS_TITLES,
        SourceType::Health => HEALTH_TITLES,
        SourceType::Science => SCIENCE_TITLES,
    }
}

impl TitleTemplate {
    pub fn render(&self, claim: &str, keywords: &[String]) -> String {
        match self {
            TitleTemplate::Excerpt { prefix, take, suffix } => {
                format!("{}{}{}", prefix, truncate_chars(claim, *take), suffix)
            }
            TitleTemplate::Keyword { prefix, fallback } => {
                let subject = keywords.first().map(String::as_str).unwrap_or(*fallback);
                format!("{}{}", prefix, subject)
            }
        }
    }
}

/// Render title `index` (wrapping) of the pool for `source_type`
pub fn render_title(
    claim: &str,
    keywords: &[String],
    source_type: SourceType,
    index: usize,
) -> String {
    let pool = title_templates(source_type);
    pool[index % pool.len()].render(claim, keywords)
}

/// Excerpt `index` (wrapping) of the fixed pool
pub fn render_excerpt(index: usize) -> &'static str {
    EXCERPTS[index % EXCERPTS.len()]
}

/// Lower-case, drop punctuation, hyphenate whitespace, cap at 50 chars
pub fn slugify(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    let hyphenated = cleaned.split_whitespace().collect::<Vec<_>>().join("-");
    let leading = if cleaned.starts_with(char::is_whitespace) { "-" } else { "" };
    let trailing = if cleaned.ends_with(char::is_whitespace) && !hyphenated.is_empty() {
        "-"
    } else {
        ""
    };

    truncate_chars(&format!("{}{}{}", leading, hyphenated, trailing), SLUG_MAX_CHARS).to_string()
}

/// Source URL for a claim
pub fn source_url(base_url: &str, claim: &str) -> String {
    format!("https://{}/{}", base_url, slugify(claim))
}

/// Prefix of at most `max` characters, on a char boundary
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_fact_check_titles() {
        let claim = "The COVID vaccine causes infertility in healthy women";
        let kw = keywords(&["covid", "vaccine"]);

        assert_eq!(
            render_title(claim, &kw, SourceType::FactCheck, 0),
            "Fact Check: The COVID vaccine causes infertility in healthy wo..."
        );
        assert_eq!(
            render_title(claim, &kw, SourceType::FactCheck, 1),
            "Is it true that The COVID vaccine causes infertility in ?"
        );
        assert_eq!(
            render_title(claim, &kw, SourceType::FactCheck, 2),
            "Verifying claims about covid"
        );
    }

    #[test]
    fn test_keyword_title_fallback() {
        assert_eq!(
            render_title("a b c d e f g h", &[], SourceType::FactCheck, 2),
            "Verifying claims about recent news"
        );
    }

    #[test]
    fn test_short_claims_are_not_padded() {
        assert_eq!(
            render_title("Moon landing", &[], SourceType::Science, 0),
            "Study: Moon landing..."
        );
    }

    #[test]
    fn test_index_wraps() {
        assert_eq!(
            render_title("Moon landing", &[], SourceType::News, 3),
            render_title("Moon landing", &[], SourceType::News, 0)
        );
        assert_eq!(render_excerpt(EXCERPTS.len()), EXCERPTS[0]);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("The Earth is round!"), "the-earth-is-round");
        assert_eq!(slugify("Is 5G   safe?  Really"), "is-5g-safe-really");
        assert_eq!(slugify("snake_case stays"), "snake_case-stays");
    }

    #[test]
    fn test_slug_truncated_to_fifty_chars() {
        let claim = "Scientists have discovered that drinking coffee every morning extends lifespan";
        let slug = slugify(claim);
        assert_eq!(slug.chars().count(), SLUG_MAX_CHARS);
        assert!(slug.starts_with("scientists-have-discovered"));
    }

    #[test]
    fn test_source_url() {
        assert_eq!(
            source_url("reuters.com", "Water is wet, experts say"),
            "https://reuters.com/water-is-wet-experts-say"
        );
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("hi", 10), "hi");
    }
}
