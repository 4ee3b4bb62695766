//! The single ownership predicate shared by every document and summary
//! operation, and the resolve-then-authorize path built on it.

use docsum_core::{Document, DocumentId, UserId};

use crate::error::{LifecycleError, ResourceKind};
use crate::store::ResourceStore;

/// Succeed only when `caller` owns `document`.
///
/// `action` completes the sentence "You do not have permission to ..." in
/// the resulting error.
pub fn ensure_owner(
    document: &Document,
    caller: &UserId,
    action: &'static str,
) -> Result<(), LifecycleError> {
    if document.owner_id == *caller {
        Ok(())
    } else {
        tracing::warn!(
            document_id = %document.id,
            caller = %caller,
            action,
            "ownership check failed"
        );
        Err(LifecycleError::Forbidden { action })
    }
}

/// Load document `id` and check that `caller` owns it.
///
/// Existence is checked first, so a missing document is `NotFound` for
/// every caller.
pub async fn load_owned_document(
    store: &dyn ResourceStore,
    id: DocumentId,
    caller: UserId,
    action: &'static str,
) -> Result<Document, LifecycleError> {
    let document = store
        .get_document(id)
        .await?
        .ok_or(LifecycleError::NotFound(ResourceKind::Document))?;
    ensure_owner(&document, &caller, action)?;
    Ok(document)
}
