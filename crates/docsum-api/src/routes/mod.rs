//! # API Route Modules
//!
//! - `auth`: registration, login and the caller's own account.
//! - `documents`: owner-scoped document CRUD with paging.
//! - `summaries`: summary generation, listing per document, deletion.
//! - `health`: unauthenticated liveness and readiness probes.

pub mod auth;
pub mod documents;
pub mod health;
pub mod summaries;
