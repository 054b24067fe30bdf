//! Remote language pipeline: client for an external model server.
//!
//! The server exposes two endpoints:
//! - `GET  {base}/health`  → 2xx once the model is loaded
//! - `POST {base}/analyze` with `{"text": "..."}` → `{"tokens": [...], "noun_chunks": [...]}`
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{AnalyzedText, LanguagePipeline, NlpError};

const MAX_RETRIES: u32 = 3;

#[derive(Debug, Serialize)]
struct AnalyzeRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ModelServerError {
    error: String,
}

#[derive(Clone)]
pub struct RemotePipeline {
    client: Client,
    base_url: String,
}

impl RemotePipeline {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, NlpError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl LanguagePipeline for RemotePipeline {
    /// Retries on 429 and 5xx with exponential backoff.
    async fn analyze(&self, text: &str) -> Result<AnalyzedText, NlpError> {
        let url = self.endpoint("analyze");
        let body = AnalyzeRequest { text };
        let mut last_error = String::new();

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // 500ms, 1s
                let delay = Duration::from_millis(500 * (1 << (attempt - 1)));
                warn!(
                    "Model server attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.post(&url).json(&body).send().await {
                Ok(r) => r,
                Err(e) => {
                    warn!("Model server request failed: {}", e);
                    last_error = e.to_string();
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let message = response.text().await.unwrap_or_default();
                warn!("Model server returned {}: {}", status, message);
                last_error = format!("status {}: {}", status.as_u16(), message);
                continue;
            }

            if !status.is_success() {
                let raw = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ModelServerError>(&raw)
                    .map(|e| e.error)
                    .unwrap_or(raw);
                return Err(NlpError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let analyzed: AnalyzedText = response.json().await?;
            debug!(
                tokens = analyzed.tokens.len(),
                noun_chunks = analyzed.noun_chunks.len(),
                "Model server analysis succeeded"
            );
            return Ok(analyzed);
        }

        Err(NlpError::RetriesExhausted {
            attempts: MAX_RETRIES,
            last_error,
        })
    }

    async fn ready(&self) -> Result<(), NlpError> {
        let response = self
            .client
            .get(self.endpoint("health"))
            .send()
            .await
            .map_err(|e| NlpError::Unavailable(format!("{}: {e}", self.base_url)))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(NlpError::Unavailable(format!(
                "{} reported status {}",
                self.base_url,
                response.status()
            )))
        }
    }

    fn name(&self) -> &str {
        "remote"
    }
}
