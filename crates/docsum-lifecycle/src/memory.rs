//! In-memory implementation of both store contracts.
//!
//! Used when no database is configured and throughout the test suites. It
//! enforces the same constraints as the Postgres schema: unique emails, no
//! summary without its document, no document delete while summaries remain.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use docsum_core::{Document, DocumentId, Summary, SummaryId, User, UserId};
use parking_lot::RwLock;

use crate::error::StoreError;
use crate::store::{IdentityStore, ResourceStore};

/// A record tagged with its insertion sequence number.
#[derive(Debug, Clone)]
struct Sequenced<T> {
    seq: u64,
    value: T,
}

#[derive(Debug, Default)]
struct Tables {
    next_seq: u64,
    users: HashMap<UserId, User>,
    documents: HashMap<DocumentId, Sequenced<Document>>,
    summaries: HashMap<SummaryId, Sequenced<Summary>>,
}

impl Tables {
    fn bump(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }
}

/// Thread-safe, cloneable in-memory store.
///
/// The lock is `parking_lot` and is never held across an `.await`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Newest first: `created_at` descending, then insertion order descending.
fn newest_first<T>(records: &mut [&Sequenced<T>], created_at: impl Fn(&T) -> DateTime<Utc>) {
    records.sort_by(|a, b| (created_at(&b.value), b.seq).cmp(&(created_at(&a.value), a.seq)));
}

#[async_trait]
impl IdentityStore for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        let mut tables = self.tables.write();
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict(format!(
                "email already registered: {}",
                user.email
            )));
        }
        tables.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .tables
            .read()
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.tables.read().users.get(&id).cloned())
    }
}

#[async_trait]
impl ResourceStore for MemoryStore {
    async fn insert_document(&self, document: &Document) -> Result<(), StoreError> {
        let mut tables = self.tables.write();
        if tables.documents.contains_key(&document.id) {
            return Err(StoreError::Conflict(format!(
                "document {} already exists",
                document.id
            )));
        }
        let seq = tables.bump();
        tables.documents.insert(
            document.id,
            Sequenced {
                seq,
                value: document.clone(),
            },
        );
        Ok(())
    }

    async fn get_document(&self, id: DocumentId) -> Result<Option<Document>, StoreError> {
        Ok(self
            .tables
            .read()
            .documents
            .get(&id)
            .map(|d| d.value.clone()))
    }

    async fn list_documents(
        &self,
        owner: UserId,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<Document>, StoreError> {
        let tables = self.tables.read();
        let mut owned: Vec<&Sequenced<Document>> = tables
            .documents
            .values()
            .filter(|d| d.value.owner_id == owner)
            .collect();
        newest_first(&mut owned, |d| d.created_at);
        Ok(owned
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(limit as usize)
            .map(|d| d.value.clone())
            .collect())
    }

    async fn count_documents(&self, owner: UserId) -> Result<u64, StoreError> {
        Ok(self
            .tables
            .read()
            .documents
            .values()
            .filter(|d| d.value.owner_id == owner)
            .count() as u64)
    }

    async fn update_document(&self, document: &Document) -> Result<bool, StoreError> {
        let mut tables = self.tables.write();
        match tables.documents.get_mut(&document.id) {
            Some(entry) => {
                entry.value.title = document.title.clone();
                entry.value.content = document.content.clone();
                entry.value.updated_at = document.updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_document(&self, id: DocumentId) -> Result<bool, StoreError> {
        let mut tables = self.tables.write();
        if tables.summaries.values().any(|s| s.value.document_id == id) {
            return Err(StoreError::Conflict(format!(
                "document {id} still has summaries"
            )));
        }
        Ok(tables.documents.remove(&id).is_some())
    }

    async fn insert_summary(&self, summary: &Summary) -> Result<(), StoreError> {
        let mut tables = self.tables.write();
        if !tables.documents.contains_key(&summary.document_id) {
            return Err(StoreError::Conflict(format!(
                "summary references missing document {}",
                summary.document_id
            )));
        }
        let seq = tables.bump();
        tables.summaries.insert(
            summary.id,
            Sequenced {
                seq,
                value: summary.clone(),
            },
        );
        Ok(())
    }

    async fn get_summary(&self, id: SummaryId) -> Result<Option<Summary>, StoreError> {
        Ok(self
            .tables
            .read()
            .summaries
            .get(&id)
            .map(|s| s.value.clone()))
    }

    async fn list_summaries(&self, document: DocumentId) -> Result<Vec<Summary>, StoreError> {
        let tables = self.tables.read();
        let mut matching: Vec<&Sequenced<Summary>> = tables
            .summaries
            .values()
            .filter(|s| s.value.document_id == document)
            .collect();
        newest_first(&mut matching, |s| s.created_at);
        Ok(matching.into_iter().map(|s| s.value.clone()).collect())
    }

    async fn count_summaries(&self, document: DocumentId) -> Result<u64, StoreError> {
        Ok(self
            .tables
            .read()
            .summaries
            .values()
            .filter(|s| s.value.document_id == document)
            .count() as u64)
    }

    async fn delete_summaries_for(&self, document: DocumentId) -> Result<u64, StoreError> {
        let mut tables = self.tables.write();
        let before = tables.summaries.len();
        tables
            .summaries
            .retain(|_, s| s.value.document_id != document);
        Ok((before - tables.summaries.len()) as u64)
    }

    async fn delete_summary(&self, id: SummaryId) -> Result<bool, StoreError> {
        Ok(self.tables.write().summaries.remove(&id).is_some())
    }
}
