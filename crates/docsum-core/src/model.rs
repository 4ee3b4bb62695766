//! # Domain Model
//!
//! The three persisted record kinds and the invariants they carry:
//!
//! - [`User`] owns zero or more documents. Never mutated after registration.
//! - [`Document`] has exactly one owner and never-empty content.
//! - [`Summary`] belongs to exactly one document and is immutable. It has
//!   no owner field: access is always resolved through its document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::identity::{DocumentId, SummaryId, UserId};
use crate::style::SummaryStyle;

/// A registered user.
///
/// `password_hash` is a PHC string produced by the credential verifier.
/// It is never part of any outward-facing view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: UserId,
    /// Normalized (trimmed, lowercased) email, unique across users.
    pub email: String,
    /// Credential hash.
    pub password_hash: String,
    /// Optional display name.
    pub name: Option<String>,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a new user record with a fresh identifier.
    ///
    /// The email is normalized and an empty-after-trim name is dropped.
    pub fn new(email: &str, password_hash: String, name: Option<String>) -> Self {
        Self {
            id: UserId::new(),
            email: normalize_email(email),
            password_hash,
            name: name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            created_at: Utc::now(),
        }
    }
}

/// Normalize an email address for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// A stored text document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier.
    pub id: DocumentId,
    /// Optional trimmed title.
    pub title: Option<String>,
    /// Document body. Never empty.
    pub content: String,
    /// The owning user.
    pub owner_id: UserId,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Build a new document owned by `owner_id`.
    ///
    /// An absent or empty-after-trim title is stored as no title.
    pub fn new(
        owner_id: UserId,
        title: Option<String>,
        content: String,
    ) -> Result<Self, ModelError> {
        if content.is_empty() {
            return Err(ModelError::EmptyDocumentContent);
        }
        let now = Utc::now();
        Ok(Self {
            id: DocumentId::new(),
            title: title
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            content,
            owner_id,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace the title. An explicitly provided title is applied even when
    /// it trims to the empty string.
    pub fn set_title(&mut self, title: &str) {
        self.title = Some(title.trim().to_string());
        self.updated_at = Utc::now();
    }

    /// Replace the content, preserving the non-empty invariant.
    pub fn set_content(&mut self, content: String) -> Result<(), ModelError> {
        if content.is_empty() {
            return Err(ModelError::EmptyDocumentContent);
        }
        self.content = content;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// A generated summary of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Unique identifier.
    pub id: SummaryId,
    /// Generated text. Never empty.
    pub content: String,
    /// The style the summary was generated in.
    pub style: SummaryStyle,
    /// The document this summary was generated from.
    pub document_id: DocumentId,
    /// Creation time. Summaries are never updated.
    pub created_at: DateTime<Utc>,
}

impl Summary {
    /// Build a new summary of `document_id`.
    pub fn new(
        document_id: DocumentId,
        style: SummaryStyle,
        content: String,
    ) -> Result<Self, ModelError> {
        if content.trim().is_empty() {
            return Err(ModelError::EmptySummaryContent);
        }
        Ok(Self {
            id: SummaryId::new(),
            content,
            style,
            document_id,
            created_at: Utc::now(),
        })
    }
}
