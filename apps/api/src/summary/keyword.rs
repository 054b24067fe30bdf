use std::collections::HashSet;

use super::{normalize_words, SUMMARY_LIMIT};

/// Fixed business vocabulary the keyword summary draws from.
pub const BUSINESS_KEYWORDS: &[&str] = &[
    "growth",
    "strategy",
    "revenue",
    "profit",
    "market",
    "sales",
    "customer",
    "management",
    "leadership",
    "business",
    "finance",
    "marketing",
    "operations",
    "investment",
    "development",
    "product",
    "team",
    "project",
    "budget",
    "analysis",
    "innovation",
    "performance",
    "partnership",
];

/// Vocabulary words in first-occurrence order, each once, at most `SUMMARY_LIMIT`.
pub fn keyword_summary(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut summary = Vec::new();

    for word in normalize_words(text) {
        if summary.len() >= SUMMARY_LIMIT {
            break;
        }
        if BUSINESS_KEYWORDS.contains(&word.as_str()) && seen.insert(word.clone()) {
            summary.push(word);
        }
    }

    summary
}
