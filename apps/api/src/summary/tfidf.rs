//! Single-document TF-IDF ranking.
//!
//! The document is its own corpus, so smoothed idf = ln((1+1)/(1+1)) + 1 = 1 for
//! every term and the ranking reduces to L2-normalized term frequency.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use super::stopwords::is_stop_word;
use super::{normalize_words, SUMMARY_LIMIT};

/// Terms kept before scoring, most frequent first.
pub const MAX_VOCABULARY: usize = 1000;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermScore {
    pub term: String,
    pub score: f64,
}

/// Scores every eligible term. Sorted by descending score, ties by term text.
pub fn score_terms(text: &str) -> Vec<TermScore> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for word in normalize_words(text) {
        if word.chars().count() < 2 || is_stop_word(&word) {
            continue;
        }
        *counts.entry(word).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(MAX_VOCABULARY);

    let idf = smoothed_idf(1, 1);
    let raw: Vec<(String, f64)> = ranked
        .into_iter()
        .map(|(term, tf)| (term, tf as f64 * idf))
        .collect();

    let norm = raw.iter().map(|(_, s)| s * s).sum::<f64>().sqrt();

    let mut scores: Vec<TermScore> = raw
        .into_iter()
        .map(|(term, s)| TermScore {
            term,
            score: if norm > 0.0 { s / norm } else { 0.0 },
        })
        .collect();
    scores.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.term.cmp(&b.term))
    });
    scores
}

pub fn tfidf_summary(text: &str) -> Vec<String> {
    score_terms(text)
        .into_iter()
        .take(SUMMARY_LIMIT)
        .map(|s| s.term)
        .collect()
}

fn smoothed_idf(n_docs: usize, doc_freq: usize) -> f64 {
    ((1 + n_docs) as f64 / (1 + doc_freq) as f64).ln() + 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::stopwords::ENGLISH_STOP_WORDS;

    #[test]
    fn test_ranks_by_frequency() {
        let summary = tfidf_summary("rust rust rust kafka kafka postgres");
        assert_eq!(summary, vec!["rust", "kafka", "postgres"]);
    }

    #[test]
    fn test_excludes_stop_words_and_single_chars() {
        let summary = tfidf_summary("The team and I built a x platform with the team");
        assert!(summary
            .iter()
            .all(|t| !ENGLISH_STOP_WORDS.contains(&t.as_str())));
        assert!(!summary.contains(&"x".to_string()));
        assert_eq!(summary[0], "team");
    }

    #[test]
    fn test_ties_break_alphabetically() {
        assert_eq!(tfidf_summary("zeta alpha mid"), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_never_exceeds_limit() {
        let text: String = (0..100).map(|i| format!("term{i} ")).collect();
        assert_eq!(tfidf_summary(&text).len(), SUMMARY_LIMIT);
    }

    #[test]
    fn test_scores_are_l2_normalized() {
        let scores = score_terms("alpha alpha beta");
        let norm: f64 = scores.iter().map(|s| s.score * s.score).sum();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_idf_is_uniform_for_single_document() {
        assert!((smoothed_idf(1, 1) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_text() {
        assert!(tfidf_summary("").is_empty());
        assert!(tfidf_summary("the and of").is_empty());
    }
}
