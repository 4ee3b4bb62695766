//! # Error Types
//!
//! Errors raised while constructing core domain values. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// An identifier string could not be parsed.
///
/// Kept distinct from any lookup failure: a malformed identifier is a
/// client error even when no record would have matched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind} identifier: {value:?}")]
pub struct IdError {
    /// Which identifier kind was being parsed ("document", "summary", "user").
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// A domain value violated one of its construction invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Document content must contain at least one character.
    #[error("document content must not be empty")]
    EmptyDocumentContent,

    /// Summary content must contain at least one non-whitespace character.
    #[error("summary content must not be empty")]
    EmptySummaryContent,

    /// The style tag is not one of the supported summary styles.
    #[error("unknown summary style: {0:?}")]
    UnknownStyle(String),
}
