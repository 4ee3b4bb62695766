//! Store wrapper with switchable failures, for exercising error paths.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use docsum_core::{Document, DocumentId, Summary, SummaryId, UserId};

use crate::error::StoreError;
use crate::memory::MemoryStore;
use crate::store::ResourceStore;

#[derive(Debug, Default)]
pub(crate) struct FaultyStore {
    inner: MemoryStore,
    fail_summary_deletes: AtomicBool,
}

impl FaultyStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail_summary_deletes(&self, fail: bool) {
        self.fail_summary_deletes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ResourceStore for FaultyStore {
    async fn insert_document(&self, document: &Document) -> Result<(), StoreError> {
        self.inner.insert_document(document).await
    }

    async fn get_document(&self, id: DocumentId) -> Result<Option<Document>, StoreError> {
        self.inner.get_document(id).await
    }

    async fn list_documents(
        &self,
        owner: UserId,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<Document>, StoreError> {
        self.inner.list_documents(owner, offset, limit).await
    }

    async fn count_documents(&self, owner: UserId) -> Result<u64, StoreError> {
        self.inner.count_documents(owner).await
    }

    async fn update_document(&self, document: &Document) -> Result<bool, StoreError> {
        self.inner.update_document(document).await
    }

    async fn delete_document(&self, id: DocumentId) -> Result<bool, StoreError> {
        self.inner.delete_document(id).await
    }

    async fn insert_summary(&self, summary: &Summary) -> Result<(), StoreError> {
        self.inner.insert_summary(summary).await
    }

    async fn get_summary(&self, id: SummaryId) -> Result<Option<Summary>, StoreError> {
        self.inner.get_summary(id).await
    }

    async fn list_summaries(&self, document: DocumentId) -> Result<Vec<Summary>, StoreError> {
        self.inner.list_summaries(document).await
    }

    async fn count_summaries(&self, document: DocumentId) -> Result<u64, StoreError> {
        self.inner.count_summaries(document).await
    }

    async fn delete_summaries_for(&self, document: DocumentId) -> Result<u64, StoreError> {
        if self.fail_summary_deletes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected summary delete failure".into()));
        }
        self.inner.delete_summaries_for(document).await
    }

    async fn delete_summary(&self, id: SummaryId) -> Result<bool, StoreError> {
        if self.fail_summary_deletes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected summary delete failure".into()));
        }
        self.inner.delete_summary(id).await
    }
}
