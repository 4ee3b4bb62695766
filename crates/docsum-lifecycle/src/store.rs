//! # Store Contracts
//!
//! The persistence seams the lifecycle managers are written against. Two
//! implementations ship with the workspace: [`MemoryStore`](crate::MemoryStore)
//! here and the Postgres store in `docsum-api`.
//!
//! Listing methods return records newest first. Records created within the
//! same timestamp tick are ordered by insertion, newest first, so paging is
//! stable.

use async_trait::async_trait;
use docsum_core::{Document, DocumentId, Summary, SummaryId, User, UserId};

use crate::error::StoreError;

/// Users and their credentials.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Persist a new user. Fails with [`StoreError::Conflict`] when the
    /// (normalized) email is already registered.
    async fn insert_user(&self, user: &User) -> Result<(), StoreError>;

    /// Look up a user by normalized email.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Look up a user by id.
    async fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError>;
}

/// Documents and summaries.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Persist a new document.
    async fn insert_document(&self, document: &Document) -> Result<(), StoreError>;

    /// Fetch a document by id.
    async fn get_document(&self, id: DocumentId) -> Result<Option<Document>, StoreError>;

    /// One page of `owner`'s documents, newest first.
    async fn list_documents(
        &self,
        owner: UserId,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<Document>, StoreError>;

    /// Total number of documents owned by `owner`.
    async fn count_documents(&self, owner: UserId) -> Result<u64, StoreError>;

    /// Overwrite the title, content and `updated_at` of an existing document.
    /// Returns `false` if the document no longer exists.
    async fn update_document(&self, document: &Document) -> Result<bool, StoreError>;

    /// Delete a document. Fails with [`StoreError::Conflict`] while summaries
    /// still reference it. Returns `false` if it did not exist.
    async fn delete_document(&self, id: DocumentId) -> Result<bool, StoreError>;

    /// Persist a new summary. Fails with [`StoreError::Conflict`] if the
    /// referenced document does not exist.
    async fn insert_summary(&self, summary: &Summary) -> Result<(), StoreError>;

    /// Fetch a summary by id.
    async fn get_summary(&self, id: SummaryId) -> Result<Option<Summary>, StoreError>;

    /// All summaries of a document, newest first.
    async fn list_summaries(&self, document: DocumentId) -> Result<Vec<Summary>, StoreError>;

    /// Number of summaries of a document.
    async fn count_summaries(&self, document: DocumentId) -> Result<u64, StoreError>;

    /// Delete every summary of a document, returning how many were removed.
    async fn delete_summaries_for(&self, document: DocumentId) -> Result<u64, StoreError>;

    /// Delete one summary. Returns `false` if it did not exist.
    async fn delete_summary(&self, id: SummaryId) -> Result<bool, StoreError>;

    /// Cheap reachability probe used by readiness checks.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
