use std::sync::Arc;

use crate::config::Config;
use crate::nlp::LanguagePipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable tokenizer / noun chunker. Default: `RuleBasedPipeline`.
    /// Swap via NLP_BACKEND=remote.
    pub pipeline: Arc<dyn LanguagePipeline>,
}
