//! # docsum-api: Axum API Service
//!
//! HTTP surface for docsum: accounts, owner-scoped documents and
//! AI-generated summaries that are invalidated when their document changes.
//!
//! ## API Surface
//!
//! | Prefix                | Module                  | Auth     |
//! |-----------------------|-------------------------|----------|
//! | `/auth/register`, `/auth/login` | [`routes::auth`] | public |
//! | `/auth/me`            | [`routes::auth`]        | required |
//! | `/documents/*`        | [`routes::documents`]   | required |
//! | `/summaries/*`        | [`routes::summaries`]   | required |
//! | `/openapi.json`       | [`openapi`]             | required |
//! | `/health/*`           | [`routes::health`]      | public   |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → AuthMiddleware → Handler
//! ```
//!
//! ## Crate Policy
//!
//! - No business logic in route handlers. Ownership, invalidation and
//!   locking live in `docsum-lifecycle`.
//! - All errors map to structured HTTP responses via [`AppError`].

pub mod auth;
pub mod db;
pub mod error;
pub mod extractors;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::Router;
use tower_http::trace::TraceLayer;

pub use error::AppError;
pub use state::AppState;

/// Request body ceiling. Documents are plain text.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes, registration and login are mounted outside the auth guard.
pub fn app(state: AppState) -> Router {
    let protected = Router::new()
        .merge(routes::auth::router())
        .merge(routes::documents::router())
        .merge(routes::summaries::router())
        .merge(openapi::router())
        .layer(from_fn_with_state(state.clone(), auth::auth_middleware));

    let public = Router::new()
        .merge(routes::health::router())
        .merge(routes::auth::public_router());

    Router::new()
        .merge(public)
        .merge(protected)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
