//! The summarization service seam.

use async_trait::async_trait;
use docsum_core::SummaryStyle;

/// The summarization service failed to produce text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct SummarizeError(pub String);

impl SummarizeError {
    /// Wrap any displayable failure.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// An opaque text-summarization service.
///
/// Implementations return the generated summary text. The caller bounds
/// every call with a timeout; implementations need not.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize `content` in the given style.
    async fn summarize(&self, content: &str, style: SummaryStyle) -> Result<String, SummarizeError>;
}
