//! # Summary Lifecycle
//!
//! Summaries are derived from a document's content and authorized through
//! the document's owner. They are never updated, only created and deleted.
//!
//! ## Generation window
//!
//! The summarizer call runs without holding the document's lock. After it
//! returns, the lock is taken only to re-check that the document still
//! exists before the summary is written. A content change that lands while
//! generation is in flight does not stop the write: the new summary may
//! reflect the previous content.

use std::sync::Arc;
use std::time::Duration;

use docsum_core::{Document, DocumentId, Summary, SummaryId, SummaryStyle, UserId};

use crate::error::{LifecycleError, ResourceKind};
use crate::locks::DocumentLocks;
use crate::ownership::{ensure_owner, load_owned_document};
use crate::store::ResourceStore;
use crate::summarizer::Summarizer;

/// Default bound on a single summarizer call.
pub const DEFAULT_SUMMARIZE_TIMEOUT: Duration = Duration::from_secs(30);

/// A document together with its summaries.
#[derive(Debug, Clone)]
pub struct DocumentSummaries {
    /// The parent document.
    pub document: Document,
    /// Its summaries, newest first.
    pub summaries: Vec<Summary>,
}

/// Summary operations, authorized through the parent document.
#[derive(Clone)]
pub struct SummaryManager {
    store: Arc<dyn ResourceStore>,
    summarizer: Arc<dyn Summarizer>,
    locks: DocumentLocks,
    timeout: Duration,
}

impl std::fmt::Debug for SummaryManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummaryManager")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl SummaryManager {
    /// Build a manager. `locks` must be shared with the document manager.
    pub fn new(
        store: Arc<dyn ResourceStore>,
        summarizer: Arc<dyn Summarizer>,
        locks: DocumentLocks,
        timeout: Duration,
    ) -> Self {
        Self {
            store,
            summarizer,
            locks,
            timeout,
        }
    }

    /// Generate and persist a summary of one of the caller's documents.
    ///
    /// Nothing is persisted when the summarizer fails, times out or returns
    /// blank text.
    pub async fn create(
        &self,
        caller: UserId,
        document_id: &str,
        style: SummaryStyle,
    ) -> Result<Summary, LifecycleError> {
        let id = DocumentId::parse(document_id)?;
        let document =
            load_owned_document(self.store.as_ref(), id, caller, "summarize this document").await?;

        let generation = tokio::time::timeout(
            self.timeout,
            self.summarizer.summarize(&document.content, style),
        );
        let generated = match generation.await {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                tracing::warn!(document_id = %id, %style, error = %e, "summarizer failed");
                return Err(LifecycleError::SummarizationUnavailable(e.to_string()));
            }
            Err(_) => {
                tracing::warn!(
                    document_id = %id,
                    %style,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "summarizer timed out"
                );
                return Err(LifecycleError::SummarizationUnavailable(format!(
                    "timed out after {:?}",
                    self.timeout
                )));
            }
        };

        let summary = Summary::new(id, style, generated.trim().to_string()).map_err(|_| {
            tracing::warn!(document_id = %id, %style, "summarizer returned blank text");
            LifecycleError::SummarizationUnavailable("empty summary".into())
        })?;

        {
            let _guard = self.locks.acquire(id).await;
            if self.store.get_document(id).await?.is_none() {
                tracing::info!(document_id = %id, "document deleted during generation, summary dropped");
                return Err(LifecycleError::NotFound(ResourceKind::Document));
            }
            self.store.insert_summary(&summary).await?;
        }

        tracing::info!(summary_id = %summary.id, document_id = %id, %style, "summary created");
        Ok(summary)
    }

    /// All summaries of one of the caller's documents, newest first.
    pub async fn list_for_document(
        &self,
        caller: UserId,
        document_id: &str,
    ) -> Result<DocumentSummaries, LifecycleError> {
        let id = DocumentId::parse(document_id)?;
        let document = load_owned_document(
            self.store.as_ref(),
            id,
            caller,
            "view summaries for this document",
        )
        .await?;
        let summaries = self.store.list_summaries(id).await?;
        Ok(DocumentSummaries {
            document,
            summaries,
        })
    }

    /// Delete a single summary of one of the caller's documents.
    pub async fn delete(&self, caller: UserId, summary_id: &str) -> Result<(), LifecycleError> {
        let id = SummaryId::parse(summary_id)?;
        let summary = self
            .store
            .get_summary(id)
            .await?
            .ok_or(LifecycleError::NotFound(ResourceKind::Summary))?;
        let document = self
            .store
            .get_document(summary.document_id)
            .await?
            .ok_or(LifecycleError::NotFound(ResourceKind::Summary))?;
        ensure_owner(&document, &caller, "delete this summary")?;

        if !self.store.delete_summary(id).await? {
            return Err(LifecycleError::NotFound(ResourceKind::Summary));
        }
        tracing::info!(summary_id = %id, document_id = %document.id, "summary deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::{DocumentChanges, DocumentManager};
    use crate::summarizer::SummarizeError;
    use crate::testing::FaultyStore;
    use crate::MemoryStore;
    use async_trait::async_trait;
    use tokio::sync::Notify;

    struct Echo;

    #[async_trait]
    impl Summarizer for Echo {
        async fn summarize(&self, content: &str, style: SummaryStyle) -> Result<String, SummarizeError> {
            Ok(format!("  {style}: {content}  "))
        }
    }

    struct Failing;

    #[async_trait]
    impl Summarizer for Failing {
        async fn summarize(&self, _: &str, _: SummaryStyle) -> Result<String, SummarizeError> {
            Err(SummarizeError::new("upstream 500"))
        }
    }

    struct Blank;

    #[async_trait]
    impl Summarizer for Blank {
        async fn summarize(&self, _: &str, _: SummaryStyle) -> Result<String, SummarizeError> {
            Ok("   ".into())
        }
    }

    struct Stalled;

    #[async_trait]
    impl Summarizer for Stalled {
        async fn summarize(&self, _: &str, _: SummaryStyle) -> Result<String, SummarizeError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("too late".into())
        }
    }

    /// Signals when generation starts and waits to be released.
    #[derive(Default)]
    struct Gated {
        started: Notify,
        release: Notify,
    }

    #[async_trait]
    impl Summarizer for Gated {
        async fn summarize(&self, content: &str, _: SummaryStyle) -> Result<String, SummarizeError> {
            self.started.notify_one();
            self.release.notified().await;
            Ok(format!("summary of {content}"))
        }
    }

    struct Fixture {
        store: Arc<dyn ResourceStore>,
        docs: DocumentManager,
        summaries: SummaryManager,
    }

    fn fixture_with(
        store: Arc<dyn ResourceStore>,
        summarizer: Arc<dyn Summarizer>,
        timeout: Duration,
    ) -> Fixture {
        let locks = DocumentLocks::new();
        Fixture {
            docs: DocumentManager::new(store.clone(), locks.clone()),
            summaries: SummaryManager::new(store.clone(), summarizer, locks, timeout),
            store,
        }
    }

    fn fixture(summarizer: Arc<dyn Summarizer>) -> Fixture {
        fixture_with(Arc::new(MemoryStore::new()), summarizer, DEFAULT_SUMMARIZE_TIMEOUT)
    }

    #[tokio::test]
    async fn create_persists_trimmed_summary() {
        let f = fixture(Arc::new(Echo));
        let owner = UserId::new();
        let doc = f.docs.create(owner, None, "the text".into()).await.unwrap();

        let summary = f
            .summaries
            .create(owner, &doc.id.to_string(), SummaryStyle::BulletPoints)
            .await
            .unwrap();
        assert_eq!(summary.content, "bullet-points: the text");
        assert_eq!(summary.document_id, doc.id);
        assert_eq!(f.store.count_summaries(doc.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn create_checks_existence_then_ownership() {
        let f = fixture(Arc::new(Echo));
        let owner = UserId::new();
        let doc = f.docs.create(owner, None, "private".into()).await.unwrap();

        assert!(matches!(
            f.summaries
                .create(UserId::new(), &doc.id.to_string(), SummaryStyle::Brief)
                .await,
            Err(LifecycleError::Forbidden { .. })
        ));
        assert!(matches!(
            f.summaries
                .create(owner, &DocumentId::new().to_string(), SummaryStyle::Brief)
                .await,
            Err(LifecycleError::NotFound(ResourceKind::Document))
        ));
        assert!(matches!(
            f.summaries.create(owner, "bogus", SummaryStyle::Brief).await,
            Err(LifecycleError::InvalidIdentifier(_))
        ));
        assert_eq!(f.store.count_summaries(doc.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn summarizer_failure_persists_nothing() {
        for summarizer in [Arc::new(Failing) as Arc<dyn Summarizer>, Arc::new(Blank)] {
            let f = fixture(summarizer);
            let owner = UserId::new();
            let doc = f.docs.create(owner, None, "text".into()).await.unwrap();
            let err = f
                .summaries
                .create(owner, &doc.id.to_string(), SummaryStyle::Detailed)
                .await
                .unwrap_err();
            assert!(matches!(err, LifecycleError::SummarizationUnavailable(_)));
            assert_eq!(f.store.count_summaries(doc.id).await.unwrap(), 0);
        }
    }

    #[tokio::test]
    async fn summarizer_timeout_persists_nothing() {
        let f = fixture_with(
            Arc::new(MemoryStore::new()),
            Arc::new(Stalled),
            Duration::from_millis(50),
        );
        let owner = UserId::new();
        let doc = f.docs.create(owner, None, "text".into()).await.unwrap();

        let err = f
            .summaries
            .create(owner, &doc.id.to_string(), SummaryStyle::Brief)
            .await
            .unwrap_err();
        assert!(matches!(err, LifecycleError::SummarizationUnavailable(_)));
        assert_eq!(f.store.count_summaries(doc.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn list_returns_document_and_newest_first() {
        let f = fixture(Arc::new(Echo));
        let owner = UserId::new();
        let doc = f.docs.create(owner, Some("T".into()), "body".into()).await.unwrap();
        let id = doc.id.to_string();
        let first = f.summaries.create(owner, &id, SummaryStyle::Brief).await.unwrap();
        let second = f.summaries.create(owner, &id, SummaryStyle::Detailed).await.unwrap();

        let listed = f.summaries.list_for_document(owner, &id).await.unwrap();
        assert_eq!(listed.document.id, doc.id);
        let ids: Vec<SummaryId> = listed.summaries.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);

        assert!(matches!(
            f.summaries.list_for_document(UserId::new(), &id).await,
            Err(LifecycleError::Forbidden { .. })
        ));
    }

    #[tokio::test]
    async fn delete_one_is_transitively_authorized() {
        let f = fixture(Arc::new(Echo));
        let owner = UserId::new();
        let doc = f.docs.create(owner, None, "body".into()).await.unwrap();
        let id = doc.id.to_string();
        let keep = f.summaries.create(owner, &id, SummaryStyle::Brief).await.unwrap();
        let drop_me = f.summaries.create(owner, &id, SummaryStyle::Brief).await.unwrap();

        assert!(matches!(
            f.summaries.delete(UserId::new(), &drop_me.id.to_string()).await,
            Err(LifecycleError::Forbidden { .. })
        ));
        f.summaries.delete(owner, &drop_me.id.to_string()).await.unwrap();
        assert!(matches!(
            f.summaries.delete(owner, &drop_me.id.to_string()).await,
            Err(LifecycleError::NotFound(ResourceKind::Summary))
        ));

        let remaining = f.summaries.list_for_document(owner, &id).await.unwrap();
        assert_eq!(remaining.summaries.len(), 1);
        assert_eq!(remaining.summaries[0].id, keep.id);
    }

    #[tokio::test]
    async fn delete_one_surfaces_store_failure() {
        let store = Arc::new(FaultyStore::new());
        let f = fixture_with(store.clone(), Arc::new(Echo), DEFAULT_SUMMARIZE_TIMEOUT);
        let owner = UserId::new();
        let doc = f.docs.create(owner, None, "body".into()).await.unwrap();
        let s = f
            .summaries
            .create(owner, &doc.id.to_string(), SummaryStyle::Brief)
            .await
            .unwrap();
        store.fail_summary_deletes(true);

        assert!(matches!(
            f.summaries.delete(owner, &s.id.to_string()).await,
            Err(LifecycleError::Store(_))
        ));
        assert_eq!(f.store.count_summaries(doc.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn document_deleted_mid_generation_drops_summary() {
        let gate = Arc::new(Gated::default());
        let f = fixture(gate.clone());
        let owner = UserId::new();
        let doc = f.docs.create(owner, None, "v1".into()).await.unwrap();
        let id = doc.id.to_string();

        let pending = {
            let summaries = f.summaries.clone();
            let id = id.clone();
            tokio::spawn(async move { summaries.create(owner, &id, SummaryStyle::Brief).await })
        };
        gate.started.notified().await;
        f.docs.delete(owner, &id).await.unwrap();
        gate.release.notify_one();

        assert!(matches!(
            pending.await.unwrap(),
            Err(LifecycleError::NotFound(ResourceKind::Document))
        ));
        assert_eq!(f.store.count_summaries(doc.id).await.unwrap(), 0);
    }

    // Content replaced while generation is in flight: the summary of the old
    // content is still written. This pins the accepted behavior.
    #[tokio::test]
    async fn content_replaced_mid_generation_keeps_stale_summary() {
        let gate = Arc::new(Gated::default());
        let f = fixture(gate.clone());
        let owner = UserId::new();
        let doc = f.docs.create(owner, None, "v1".into()).await.unwrap();
        let id = doc.id.to_string();

        let pending = {
            let summaries = f.summaries.clone();
            let id = id.clone();
            tokio::spawn(async move { summaries.create(owner, &id, SummaryStyle::Brief).await })
        };
        gate.started.notified().await;
        let update = f
            .docs
            .update(
                owner,
                &id,
                DocumentChanges {
                    content: Some("v2".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(update.summaries_invalidated, 0);
        gate.release.notify_one();

        let summary = pending.await.unwrap().unwrap();
        assert_eq!(summary.content, "summary of v1");
        assert_eq!(f.docs.get(owner, &id).await.unwrap().content, "v2");
        assert_eq!(f.store.count_summaries(doc.id).await.unwrap(), 1);
    }
}
