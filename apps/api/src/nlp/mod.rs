//! Language pipeline: pluggable tokenization and noun-chunk segmentation.
//!
//! Default: `RuleBasedPipeline` (in-process, deterministic, no model files).
//! Alternative: `RemotePipeline` (HTTP client to an external model server).
//!
//! `AppState` holds an `Arc<dyn LanguagePipeline>`, chosen at startup via config.

pub mod remote;
pub mod rule_based;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{Config, NlpBackend};

pub use remote::RemotePipeline;
pub use rule_based::RuleBasedPipeline;

#[derive(Debug, Error)]
pub enum NlpError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Model server error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Model server unavailable: {0}")]
    Unavailable(String),

    #[error("Gave up after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },
}

/// Output of one pipeline pass over a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedText {
    /// Token surface strings in document order.
    pub tokens: Vec<String>,
    /// Noun-chunk surface strings in document order. May repeat.
    pub noun_chunks: Vec<String>,
}

/// Tokenizer + noun chunker. Implement this to swap backends without touching
/// the field extractor, batch aggregator, or handlers.
#[async_trait]
pub trait LanguagePipeline: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<AnalyzedText, NlpError>;

    /// Confirms the backing model is loaded. Called once before serving.
    async fn ready(&self) -> Result<(), NlpError> {
        Ok(())
    }

    fn name(&self) -> &str;
}

/// Builds the pipeline selected by `config.nlp_backend`.
pub fn build_pipeline(config: &Config) -> anyhow::Result<Arc<dyn LanguagePipeline>> {
    match config.nlp_backend {
        NlpBackend::Rules => Ok(Arc::new(RuleBasedPipeline::new())),
        NlpBackend::Remote => {
            let url = config
                .nlp_service_url
                .clone()
                .ok_or_else(|| anyhow::anyhow!("NLP_SERVICE_URL is required for the remote backend"))?;
            let pipeline =
                RemotePipeline::new(url, Duration::from_secs(config.nlp_timeout_secs))?;
            Ok(Arc::new(pipeline))
        }
    }
}
