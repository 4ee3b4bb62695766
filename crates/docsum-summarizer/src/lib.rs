//! # docsum-summarizer: Typed Client for the Summarization Service
//!
//! Calls a chat-completions endpoint to turn document content into a
//! summary in one of the supported [`SummaryStyle`]s.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST | `/v1/chat/completions` | Generate a summary |
//!
//! [`SummarizerClient`] implements [`docsum_lifecycle::Summarizer`], which is
//! the only way the rest of the workspace reaches the service.

pub mod completions;
pub mod config;
pub mod error;
pub(crate) mod retry;

pub use config::{ConfigError, SummarizerConfig};
pub use error::SummarizerError;

use std::time::Duration;

use async_trait::async_trait;
use completions::{ChatCompletionRequest, ChatCompletionResponse, CHAT_COMPLETIONS_PATH};
use docsum_core::SummaryStyle;
use docsum_lifecycle::{SummarizeError, Summarizer};
use zeroize::Zeroizing;

/// Client for the chat-completions summarization service.
#[derive(Debug, Clone)]
pub struct SummarizerClient {
    http: reqwest::Client,
    endpoint_url: String,
    model: String,
}

impl SummarizerClient {
    /// Create a client from configuration.
    pub fn new(config: SummarizerConfig) -> Result<Self, SummarizerError> {
        let bearer = Zeroizing::new(format!("Bearer {}", config.api_key.as_str()));
        let mut auth = reqwest::header::HeaderValue::from_str(bearer.as_str())
            .map_err(|_| SummarizerError::Config(ConfigError::MissingApiKey))?;
        auth.set_sensitive(true);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(reqwest::header::AUTHORIZATION, auth);
                headers
            })
            .build()
            .map_err(|e| SummarizerError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            endpoint_url: format!(
                "{}/{CHAT_COMPLETIONS_PATH}",
                config.base_url.as_str().trim_end_matches('/')
            ),
            model: config.model,
        })
    }

    /// Generate a summary of `content`.
    ///
    /// Calls `POST {base_url}/v1/chat/completions` and returns the trimmed
    /// text of the first choice. A blank completion is an error.
    pub async fn summarize(
        &self,
        content: &str,
        style: SummaryStyle,
    ) -> Result<String, SummarizerError> {
        let endpoint = "POST /v1/chat/completions";
        let body = ChatCompletionRequest::summarize(&self.model, content, style);

        let resp = retry::retry_send(|| self.http.post(&self.endpoint_url).json(&body).send())
            .await
            .map_err(|e| SummarizerError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(SummarizerError::ApiError {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }

        let completion: ChatCompletionResponse =
            resp.json()
                .await
                .map_err(|e| SummarizerError::Deserialization {
                    endpoint: endpoint.into(),
                    source: e,
                })?;

        completion
            .first_text()
            .ok_or(SummarizerError::EmptyCompletion)
    }
}

#[async_trait]
impl Summarizer for SummarizerClient {
    async fn summarize(&self, content: &str, style: SummaryStyle) -> Result<String, SummarizeError> {
        SummarizerClient::summarize(self, content, style)
            .await
            .map_err(|e| SummarizeError::new(e.to_string()))
    }
}
