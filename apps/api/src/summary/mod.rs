//! Business summaries: up to 30 salient words per resume.
//!
//! Two strategies share one normalization step:
//! - `keyword`: first occurrences of a fixed business vocabulary, in text order
//! - `tfidf`:   top terms by single-document TF-IDF, stopwords removed

pub mod handlers;
pub mod keyword;
pub mod stopwords;
pub mod tfidf;

use serde::{Deserialize, Serialize};

/// Upper bound on summary length, for both strategies.
pub const SUMMARY_LIMIT: usize = 30;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryStrategy {
    #[default]
    Keyword,
    Tfidf,
}

impl SummaryStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryStrategy::Keyword => "keyword",
            SummaryStrategy::Tfidf => "tfidf",
        }
    }
}

pub fn summarize(text: &str, strategy: SummaryStrategy) -> Vec<String> {
    match strategy {
        SummaryStrategy::Keyword => keyword::keyword_summary(text),
        SummaryStrategy::Tfidf => tfidf::tfidf_summary(text),
    }
}

/// Lowercase, drop everything that is neither a word character nor whitespace,
/// split on whitespace.
pub fn normalize_words(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    cleaned.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation_and_case() {
        assert_eq!(
            normalize_words("Drove  Growth, (fast)!\n\tRe-org"),
            vec!["drove", "growth", "fast", "reorg"]
        );
    }

    #[test]
    fn test_strategy_serde_names() {
        let s: SummaryStrategy = serde_json::from_str(r#""tfidf""#).unwrap();
        assert_eq!(s, SummaryStrategy::Tfidf);
        assert_eq!(SummaryStrategy::default().as_str(), "keyword");
    }

    #[test]
    fn test_summarize_dispatches_by_strategy() {
        let text = "Revenue growth beats revenue targets";
        assert_eq!(summarize(text, SummaryStrategy::Keyword), vec!["revenue", "growth"]);
        assert_eq!(summarize(text, SummaryStrategy::Tfidf)[0], "revenue");
    }
}
