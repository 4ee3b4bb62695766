#![deny(missing_docs)]

//! # docsum-core: Foundational Types for docsum
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies, only `serde`, `thiserror`,
//! `chrono` and `uuid` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** You cannot pass a [`SummaryId`]
//!    where a [`DocumentId`] is expected. Parsing untrusted input yields
//!    either the newtype or an [`IdError`], never a lookup miss.
//!
//! 2. **Invariants at construction.** A [`Document`] or [`Summary`] with
//!    empty content cannot be built.
//!
//! 3. **Single [`SummaryStyle`] enum.** One definition of the style set,
//!    exhaustive `match` everywhere.

pub mod error;
pub mod identity;
pub mod model;
pub mod pagination;
pub mod style;

pub use error::{IdError, ModelError};
pub use identity::{DocumentId, SummaryId, UserId};
pub use model::{Document, Summary, User};
pub use pagination::{PageInfo, PageRequest};
pub use style::SummaryStyle;
