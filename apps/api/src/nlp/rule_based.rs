//! Rule-based language pipeline: pure-Rust tokenizer and noun chunker.
//!
//! Tokenization: whitespace split, then leading/trailing punctuation peeled off
//! into separate tokens. Email addresses and digit runs stay whole.
//!
//! Chunking, per line:
//! 1. Personal pronouns are chunks on their own ("I", "we").
//! 2. A determiner or possessive opens a chunk ("the", "our").
//! 3. Content words extend the open chunk.
//! 4. Punctuation, function words, auxiliaries, common resume verbs and
//!    `-ed` forms close it.
//!
//! Chunks never span lines. Long runs are kept as-is; the field extractor
//! applies its own word-count limit.

use async_trait::async_trait;

use super::{AnalyzedText, LanguagePipeline, NlpError};

const PREFIX_CHARS: &[char] = &['"', '\'', '(', '[', '{', '<', '“', '‘', '«', '•', '*'];
const SUFFIX_CHARS: &[char] = &[
    '"', '\'', ')', ']', '}', '>', '.', ',', ';', ':', '!', '?', '”', '’', '»', '…',
];

const PRONOUNS: &[&str] = &[
    "i", "me", "we", "us", "you", "he", "him", "she", "her", "it", "they", "them", "myself",
    "ourselves", "yourself", "himself", "herself", "itself", "themselves", "who", "whom",
    "what", "something", "someone", "anything", "anyone", "everything", "everyone",
];

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "my", "our", "your", "his", "its",
    "their", "some", "any", "each", "every", "no", "all", "both", "several", "many", "few",
    "various", "multiple",
];

const FUNCTION_WORDS: &[&str] = &[
    // prepositions
    "about", "above", "across", "after", "against", "along", "among", "around", "as", "at",
    "before", "behind", "below", "beneath", "beside", "between", "beyond", "by", "during",
    "except", "for", "from", "in", "inside", "into", "like", "near", "of", "off", "on",
    "onto", "out", "outside", "over", "per", "since", "than", "through", "throughout", "to",
    "toward", "towards", "under", "until", "up", "upon", "via", "with", "within", "without",
    // conjunctions
    "and", "or", "but", "nor", "so", "yet", "if", "because", "while", "whereas", "although",
    "though", "unless", "whether", "then", "also",
    // auxiliaries and modals
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "having",
    "do", "does", "did", "will", "would", "shall", "should", "can", "could", "may", "might",
    "must", "not",
    // adverbs and wh-words
    "again", "already", "always", "currently", "very", "too", "just", "only", "really",
    "here", "there", "when", "where", "why", "how", "which", "whose", "more", "most", "less",
    "well", "now", "often", "never", "ever", "still", "even", "highly", "successfully",
];

const COMMON_VERBS: &[&str] = &[
    "manage", "lead", "build", "develop", "drive", "design", "create", "deliver", "work",
    "use", "improve", "increase", "reduce", "own", "support", "help", "run", "make", "write",
    "maintain", "implement", "handle", "oversee", "coordinate", "plan", "achieve", "ensure",
    "collaborate", "analyze", "provide", "seek", "seeking", "looking", "get", "got", "go",
    "see", "know", "want", "need", "include", "includes", "including", "join", "grow",
    "launch", "ship", "define", "mentor", "partner", "execute", "optimize", "automate",
];

/// In-process tokenizer and noun chunker. Stateless and cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedPipeline;

impl RuleBasedPipeline {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LanguagePipeline for RuleBasedPipeline {
    async fn analyze(&self, text: &str) -> Result<AnalyzedText, NlpError> {
        Ok(analyze_text(text))
    }

    fn name(&self) -> &str {
        "rules"
    }
}

pub fn analyze_text(text: &str) -> AnalyzedText {
    let mut tokens = Vec::new();
    let mut noun_chunks = Vec::new();

    for line in text.lines() {
        let line_tokens = tokenize(line);
        noun_chunks.extend(chunk_line(&line_tokens));
        tokens.extend(line_tokens);
    }

    AnalyzedText {
        tokens,
        noun_chunks,
    }
}

pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for piece in text.split_whitespace() {
        split_piece(piece, &mut tokens);
    }
    tokens
}

fn split_piece(piece: &str, out: &mut Vec<String>) {
    let mut start = 0;
    let mut end = piece.len();

    let mut prefixes = Vec::new();
    while let Some(c) = piece[start..end].chars().next() {
        if !PREFIX_CHARS.contains(&c) {
            break;
        }
        prefixes.push(c);
        start += c.len_utf8();
    }

    let mut suffixes = Vec::new();
    while let Some(c) = piece[start..end].chars().next_back() {
        if !SUFFIX_CHARS.contains(&c) {
            break;
        }
        suffixes.push(c);
        end -= c.len_utf8();
    }

    out.extend(prefixes.into_iter().map(String::from));
    if start < end {
        out.push(piece[start..end].to_string());
    }
    out.extend(suffixes.into_iter().rev().map(String::from));
}

#[derive(Debug, PartialEq)]
enum TokenRole {
    Boundary,
    Pronoun,
    Determiner,
    Content,
}

fn classify(token: &str) -> TokenRole {
    if !token.chars().any(char::is_alphanumeric) {
        return TokenRole::Boundary;
    }

    let lower = token.to_lowercase();
    let word = lower.as_str();

    if PRONOUNS.contains(&word) {
        TokenRole::Pronoun
    } else if DETERMINERS.contains(&word) {
        TokenRole::Determiner
    } else if FUNCTION_WORDS.contains(&word) || is_verb_like(word) {
        TokenRole::Boundary
    } else {
        TokenRole::Content
    }
}

fn is_verb_like(word: &str) -> bool {
    if COMMON_VERBS.contains(&word) {
        return true;
    }
    if let Some(stem) = word.strip_suffix('s') {
        if COMMON_VERBS.contains(&stem) {
            return true;
        }
    }
    word.len() > 4 && word.ends_with("ed") && word.chars().all(char::is_alphabetic)
}

fn flush(current: &mut Vec<&str>, has_content: &mut bool, chunks: &mut Vec<String>) {
    if *has_content {
        chunks.push(current.join(" "));
    }
    current.clear();
    *has_content = false;
}

fn chunk_line(tokens: &[String]) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut has_content = false;

    for token in tokens {
        match classify(token) {
            TokenRole::Boundary => flush(&mut current, &mut has_content, &mut chunks),
            TokenRole::Pronoun => {
                flush(&mut current, &mut has_content, &mut chunks);
                chunks.push(token.clone());
            }
            TokenRole::Determiner => {
                flush(&mut current, &mut has_content, &mut chunks);
                current.push(token);
            }
            TokenRole::Content => {
                current.push(token);
                has_content = true;
            }
        }
    }
    flush(&mut current, &mut has_content, &mut chunks);

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_peels_punctuation() {
        let tokens = tokenize("Contact: (jane.doe@example.com), thanks!");
        assert_eq!(
            tokens,
            vec!["Contact", ":", "(", "jane.doe@example.com", ")", ",", "thanks", "!"]
        );
    }

    #[test]
    fn test_tokenize_keeps_digit_runs_whole() {
        let tokens = tokenize("Phone 5551234567.");
        assert_eq!(tokens, vec!["Phone", "5551234567", "."]);
    }

    #[test]
    fn test_tokenize_all_punctuation_piece() {
        let tokens = tokenize("...");
        assert_eq!(tokens, vec![".", ".", "."]);
    }

    #[test]
    fn test_chunks_with_determiner_and_pronoun() {
        let analyzed = analyze_text("I manage the marketing team.");
        assert_eq!(analyzed.noun_chunks, vec!["I", "the marketing team"]);
    }

    #[test]
    fn test_chunks_split_on_function_words() {
        let analyzed = analyze_text("We drive growth through strategy and strategy again");
        assert_eq!(
            analyzed.noun_chunks,
            vec!["We", "growth", "strategy", "strategy"]
        );
    }

    #[test]
    fn test_chunks_do_not_span_lines() {
        let analyzed = analyze_text("Python\nProject Management");
        assert_eq!(analyzed.noun_chunks, vec!["Python", "Project Management"]);
    }

    #[test]
    fn test_past_tense_verbs_close_chunks() {
        let analyzed = analyze_text("Kubernetes migrated workloads");
        assert_eq!(analyzed.noun_chunks, vec!["Kubernetes", "workloads"]);
    }

    #[test]
    fn test_lonely_determiner_is_dropped() {
        let analyzed = analyze_text("the , a");
        assert!(analyzed.noun_chunks.is_empty());
    }

    #[tokio::test]
    async fn test_pipeline_analyze_matches_free_function() {
        let pipeline = RuleBasedPipeline::new();
        let text = "Senior engineer at Acme";
        assert_eq!(pipeline.analyze(text).await.unwrap(), analyze_text(text));
        assert!(pipeline.ready().await.is_ok());
    }
}
