use anyhow::{bail, Context, Result};

/// Which language pipeline backs tokenization and noun-chunking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NlpBackend {
    /// In-process rule-based tokenizer and chunker. Needs no model files.
    Rules,
    /// External model server reached over HTTP (see `nlp::remote`).
    Remote,
}

impl NlpBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            NlpBackend::Rules => "rules",
            NlpBackend::Remote => "remote",
        }
    }
}

impl std::str::FromStr for NlpBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rules" | "rule" | "rule_based" => Ok(NlpBackend::Rules),
            "remote" | "http" => Ok(NlpBackend::Remote),
            other => bail!("NLP_BACKEND must be 'rules' or 'remote', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Fails at startup if a required variable is missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub nlp_backend: NlpBackend,
    /// Base URL of the model server. Only set when `nlp_backend` is `Remote`.
    pub nlp_service_url: Option<String>,
    pub nlp_timeout_secs: u64,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            nlp_backend: NlpBackend::Rules,
            nlp_service_url: None,
            nlp_timeout_secs: 30,
            max_upload_bytes: 25 * 1024 * 1024,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        let nlp_backend: NlpBackend = match std::env::var("NLP_BACKEND") {
            Ok(v) => v.parse()?,
            Err(_) => defaults.nlp_backend,
        };

        let nlp_service_url = match nlp_backend {
            NlpBackend::Remote => Some(require_env("NLP_SERVICE_URL")?),
            NlpBackend::Rules => None,
        };

        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            nlp_backend,
            nlp_service_url,
            nlp_timeout_secs: parse_env("NLP_TIMEOUT_SECS", defaults.nlp_timeout_secs)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parses_known_names() {
        assert_eq!("rules".parse::<NlpBackend>().unwrap(), NlpBackend::Rules);
        assert_eq!("Remote".parse::<NlpBackend>().unwrap(), NlpBackend::Remote);
        assert_eq!(" http ".parse::<NlpBackend>().unwrap(), NlpBackend::Remote);
    }

    #[test]
    fn test_backend_rejects_unknown_name() {
        assert!("transformer".parse::<NlpBackend>().is_err());
    }

    #[test]
    fn test_default_config_uses_rule_backend() {
        let config = Config::default();
        assert_eq!(config.nlp_backend, NlpBackend::Rules);
        assert!(config.nlp_service_url.is_none());
        assert_eq!(config.port, 8080);
    }
}
