//! Summarization client error types.

/// Errors from summarization service calls.
#[derive(Debug, thiserror::Error)]
pub enum SummarizerError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        /// The logical endpoint being called.
        endpoint: String,
        /// Underlying transport failure.
        source: reqwest::Error,
    },
    /// The service returned a non-2xx status.
    #[error("summarizer {endpoint} returned {status}: {body}")]
    ApiError {
        /// The logical endpoint being called.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body, as returned.
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        /// The logical endpoint being called.
        endpoint: String,
        /// Underlying decode failure.
        source: reqwest::Error,
    },
    /// The service answered but produced no text.
    #[error("summarizer returned an empty completion")]
    EmptyCompletion,
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}
