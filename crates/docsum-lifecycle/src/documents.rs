//! # Document Lifecycle
//!
//! Create, list, get, update and delete documents on behalf of a caller.
//!
//! Every operation that targets one document resolves it in the same order:
//! parse the id, look it up, then check ownership. A missing document is
//! reported before a foreign one.
//!
//! Content changes and deletes invalidate the document's summaries first.
//! If invalidation fails, the document is left as it was.

use std::sync::Arc;

use docsum_core::{Document, DocumentId, PageInfo, PageRequest, UserId};

use crate::error::{LifecycleError, ResourceKind};
use crate::locks::DocumentLocks;
use crate::ownership::load_owned_document;
use crate::store::ResourceStore;

/// A partial update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentChanges {
    /// New title, applied even when it trims to empty.
    pub title: Option<String>,
    /// New content. Must be non-empty.
    pub content: Option<String>,
}

/// Result of a successful update.
#[derive(Debug, Clone)]
pub struct DocumentUpdate {
    /// The document as stored after the update.
    pub document: Document,
    /// Whether the content changed, which invalidates all summaries.
    pub content_changed: bool,
    /// How many summaries were deleted by the invalidation.
    pub summaries_invalidated: u64,
}

/// One page of a caller's documents.
#[derive(Debug, Clone)]
pub struct DocumentPage {
    /// Documents on this page, newest first.
    pub documents: Vec<Document>,
    /// Pagination metadata.
    pub page: PageInfo,
}

/// Owner-scoped document operations.
#[derive(Clone)]
pub struct DocumentManager {
    store: Arc<dyn ResourceStore>,
    locks: DocumentLocks,
}

impl std::fmt::Debug for DocumentManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentManager")
            .field("locks", &self.locks.len())
            .finish_non_exhaustive()
    }
}

impl DocumentManager {
    /// Build a manager over `store`, sharing `locks` with the summary manager.
    pub fn new(store: Arc<dyn ResourceStore>, locks: DocumentLocks) -> Self {
        Self { store, locks }
    }

    /// Persist a new document owned by `caller`.
    pub async fn create(
        &self,
        caller: UserId,
        title: Option<String>,
        content: String,
    ) -> Result<Document, LifecycleError> {
        let document = Document::new(caller, title, content)?;
        self.store.insert_document(&document).await?;
        tracing::info!(document_id = %document.id, owner = %caller, "document created");
        Ok(document)
    }

    /// One page of the caller's documents, newest first.
    pub async fn list(
        &self,
        caller: UserId,
        request: PageRequest,
    ) -> Result<DocumentPage, LifecycleError> {
        let total = self.store.count_documents(caller).await?;
        let documents = self
            .store
            .list_documents(caller, request.offset(), request.limit)
            .await?;
        Ok(DocumentPage {
            documents,
            page: PageInfo::new(request, total),
        })
    }

    /// Fetch one of the caller's documents.
    pub async fn get(&self, caller: UserId, id: &str) -> Result<Document, LifecycleError> {
        let id = DocumentId::parse(id)?;
        load_owned_document(self.store.as_ref(), id, caller, "access this document").await
    }

    /// Apply a partial update.
    ///
    /// When the content changes, every summary of the document is deleted
    /// before the new content is written.
    pub async fn update(
        &self,
        caller: UserId,
        id: &str,
        changes: DocumentChanges,
    ) -> Result<DocumentUpdate, LifecycleError> {
        let id = DocumentId::parse(id)?;
        let _guard = self.locks.acquire(id).await;
        let mut document =
            load_owned_document(self.store.as_ref(), id, caller, "update this document").await?;

        let mut content_changed = false;
        let mut summaries_invalidated = 0;
        if let Some(content) = changes.content {
            if content.is_empty() {
                return Err(docsum_core::ModelError::EmptyDocumentContent.into());
            }
            if content != document.content {
                summaries_invalidated = self.store.delete_summaries_for(id).await?;
                tracing::info!(
                    document_id = %id,
                    summaries_invalidated,
                    "content changed, summaries invalidated"
                );
                document.set_content(content)?;
                content_changed = true;
            }
        }
        if let Some(title) = changes.title {
            document.set_title(&title);
        }

        if !self.store.update_document(&document).await? {
            return Err(LifecycleError::NotFound(ResourceKind::Document));
        }
        Ok(DocumentUpdate {
            document,
            content_changed,
            summaries_invalidated,
        })
    }

    /// Delete a document and all of its summaries.
    ///
    /// Returns how many summaries were removed.
    pub async fn delete(&self, caller: UserId, id: &str) -> Result<u64, LifecycleError> {
        let id = DocumentId::parse(id)?;
        let guard = self.locks.acquire(id).await;
        load_owned_document(self.store.as_ref(), id, caller, "delete this document").await?;

        let summaries_deleted = self.store.delete_summaries_for(id).await?;
        if !self.store.delete_document(id).await? {
            return Err(LifecycleError::NotFound(ResourceKind::Document));
        }
        drop(guard);
        self.locks.forget(id);

        tracing::info!(document_id = %id, summaries_deleted, "document deleted");
        Ok(summaries_deleted)
    }
}
