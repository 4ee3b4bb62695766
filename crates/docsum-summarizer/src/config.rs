//! Summarization service configuration.
//!
//! Defaults target the public chat-completions endpoint. Override via
//! environment variables or explicit construction for staging and tests.

use url::Url;
use zeroize::Zeroizing;

/// Default base URL of the chat-completions service.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
/// Default model name.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the summarization client.
///
/// Custom `Debug` redacts the API key. The key is zeroized on drop.
#[derive(Clone)]
pub struct SummarizerConfig {
    /// Base URL; `/v1/chat/completions` is appended.
    pub base_url: Url,
    /// Bearer credential for the upstream service.
    pub api_key: Zeroizing<String>,
    /// Model name sent with every request.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for SummarizerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummarizerConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl SummarizerConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `SUMMARIZER_API_KEY` (required)
    /// - `SUMMARIZER_BASE_URL` (default: `https://api.openai.com`)
    /// - `SUMMARIZER_MODEL` (default: `gpt-4o-mini`)
    /// - `SUMMARIZER_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("SUMMARIZER_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self {
            base_url: env_url("SUMMARIZER_BASE_URL", DEFAULT_BASE_URL)?,
            api_key: Zeroizing::new(api_key),
            model: std::env::var("SUMMARIZER_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            timeout_secs: std::env::var("SUMMARIZER_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|&secs| secs > 0)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Configuration pointing at a local mock server.
    pub fn local_mock(base_url: &str, api_key: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: Url::parse(base_url)
                .map_err(|e| ConfigError::InvalidUrl(base_url.to_string(), e.to_string()))?,
            api_key: Zeroizing::new(api_key.to_string()),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: 5,
        })
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No API key was configured.
    #[error("SUMMARIZER_API_KEY environment variable is required")]
    MissingApiKey,
    /// A URL variable did not parse.
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}
