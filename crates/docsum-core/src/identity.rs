//! # Identity Newtypes
//!
//! UUID-backed identifiers for each persisted resource kind. Each is a
//! distinct type, serialized as the lowercase hyphenated UUID string.
//!
//! ## Validation
//!
//! Identifiers minted by this crate are always valid. Identifiers coming
//! from request paths or bodies go through `parse`, which rejects anything
//! that is not a UUID with an [`IdError`].

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::IdError;

/// Unique identifier of a registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Create a new random user identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a user identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Parse a user identifier from untrusted input.
    pub fn parse(raw: &str) -> Result<Self, IdError> {
        parse_uuid("user", raw).map(Self)
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Unique identifier of a stored document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Create a new random document identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a document identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Parse a document identifier from untrusted input.
    pub fn parse(raw: &str) -> Result<Self, IdError> {
        parse_uuid("document", raw).map(Self)
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DocumentId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Unique identifier of a generated summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SummaryId(Uuid);

impl SummaryId {
    /// Create a new random summary identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a summary identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Parse a summary identifier from untrusted input.
    pub fn parse(raw: &str) -> Result<Self, IdError> {
        parse_uuid("summary", raw).map(Self)
    }
}

impl Default for SummaryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SummaryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SummaryId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_uuid(kind: &'static str, raw: &str) -> Result<Uuid, IdError> {
    Uuid::parse_str(raw.trim()).map_err(|_| IdError {
        kind,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(DocumentId::new(), DocumentId::new());
        assert_ne!(SummaryId::new(), SummaryId::new());
        assert_ne!(UserId::new(), UserId::new());
    }

    #[test]
    fn parse_accepts_display_output() {
        let id = DocumentId::new();
        let parsed = DocumentId::parse(&id.to_string()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn parse_rejects_malformed_input() {
        let err = DocumentId::parse("not-a-uuid").unwrap_err();
        assert_eq!(err.kind, "document");
        assert_eq!(err.value, "not-a-uuid");

        assert!(SummaryId::parse("").is_err());
        assert!(UserId::parse("507f1f77bcf86cd799439011").is_err());
    }

    #[test]
    fn from_str_delegates_to_parse() {
        let id: SummaryId = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
        assert_eq!(id.to_string(), "550e8400-e29b-41d4-a716-446655440000");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = UserId::from_uuid(Uuid::nil());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000000\"");
    }
}
