//! Lifecycle and store error types.

use docsum_core::{IdError, ModelError};

/// Errors reported by a [`ResourceStore`](crate::ResourceStore) or
/// [`IdentityStore`](crate::IdentityStore) implementation.
///
/// The message carried by `Backend` is operator-facing only. It is logged,
/// never returned to a client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness or referential constraint rejected the write.
    #[error("store conflict: {0}")]
    Conflict(String),
    /// The backing store failed or is unreachable.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Which resource a lookup missed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// A stored document.
    Document,
    /// A generated summary.
    Summary,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Document => "Document",
            Self::Summary => "Summary",
        })
    }
}

/// Errors from the document and summary lifecycle managers.
#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    /// The resource does not exist (or its parent document is gone).
    #[error("{0} not found")]
    NotFound(ResourceKind),

    /// The caller does not own the document the operation targets.
    #[error("Access denied. You do not have permission to {action}")]
    Forbidden {
        /// What the caller attempted, phrased for the error message.
        action: &'static str,
    },

    /// A path or body identifier was not well formed.
    #[error(transparent)]
    InvalidIdentifier(#[from] IdError),

    /// A domain invariant rejected the input.
    #[error(transparent)]
    InvalidInput(#[from] ModelError),

    /// The summarization service failed or timed out. Nothing was persisted.
    #[error("summarization unavailable: {0}")]
    SummarizationUnavailable(String),

    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
