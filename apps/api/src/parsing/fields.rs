//! Field extraction: email, phone and noun-chunk "skills" from resume text.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::resume::ExtractedFields;
use crate::nlp::{AnalyzedText, LanguagePipeline, NlpError};

/// Chunks with this many words or more are not kept as skills.
pub const MAX_SKILL_WORDS: usize = 4;

// Both patterns are anchored at the token start only: a token that begins with
// a match is taken whole.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b")
        .expect("email pattern is valid")
});
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\b\d{10}\b").expect("phone pattern is valid"));

/// Runs `text` through the language pipeline and pulls out contact fields and skills.
pub async fn extract_fields(
    text: &str,
    pipeline: &dyn LanguagePipeline,
) -> Result<ExtractedFields, NlpError> {
    let analyzed = pipeline.analyze(text).await?;
    Ok(fields_from_analysis(&analyzed))
}

/// Email and phone: the last matching token wins.
pub fn fields_from_analysis(analyzed: &AnalyzedText) -> ExtractedFields {
    let mut fields = ExtractedFields::default();

    for token in &analyzed.tokens {
        if EMAIL_RE.is_match(token) {
            fields.email = token.clone();
        }
        if PHONE_RE.is_match(token) {
            fields.phone = token.clone();
        }
    }

    fields.skills = analyzed
        .noun_chunks
        .iter()
        .filter(|chunk| chunk.split_whitespace().count() < MAX_SKILL_WORDS)
        .cloned()
        .collect();

    fields
}
