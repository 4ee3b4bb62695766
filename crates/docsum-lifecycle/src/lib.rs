#![deny(missing_docs)]

//! # docsum-lifecycle: Document and Summary Lifecycle
//!
//! The authorization-scoped lifecycle engine: who may touch a document, and
//! what happens to its summaries when it changes or disappears.
//!
//! ## Contracts
//!
//! - [`ResourceStore`] / [`IdentityStore`]: persistence seams. [`MemoryStore`]
//!   implements both; the Postgres store lives in `docsum-api`.
//! - [`Summarizer`]: the opaque summarization service.
//!
//! ## Rules enforced here
//!
//! - One ownership predicate, [`ensure_owner`], gates every operation.
//!   Existence is checked before ownership, in [`load_owned_document`].
//! - A content change deletes the document's summaries before the new
//!   content is written. A document delete removes summaries first and
//!   leaves the document in place if that fails.
//! - Update and delete of one document are serialized through
//!   [`DocumentLocks`]. Summary generation runs outside the lock.

pub mod documents;
pub mod error;
pub mod locks;
pub mod memory;
pub mod ownership;
pub mod store;
pub mod summaries;
pub mod summarizer;

#[cfg(test)]
pub(crate) mod testing;

pub use documents::{DocumentChanges, DocumentManager, DocumentPage, DocumentUpdate};
pub use error::{LifecycleError, ResourceKind, StoreError};
pub use locks::DocumentLocks;
pub use memory::MemoryStore;
pub use ownership::{ensure_owner, load_owned_document};
pub use store::{IdentityStore, ResourceStore};
pub use summaries::{DocumentSummaries, SummaryManager, DEFAULT_SUMMARIZE_TIMEOUT};
pub use summarizer::{SummarizeError, Summarizer};
