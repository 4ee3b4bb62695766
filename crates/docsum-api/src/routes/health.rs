//! # Health Probes
//!
//! Unauthenticated.
//!
//! - `GET /health`          : liveness, with a timestamp
//! - `GET /health/readiness`: 200 "ready" once the store answers, else 503

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

/// Assemble the health router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/readiness", get(readiness))
}

/// Liveness body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is running", body = HealthResponse)),
    security(()),
    tag = "health"
)]
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        message: "Summary API is running".into(),
        timestamp: Utc::now(),
    })
}

/// Readiness probe. Pings the resource store, which is the database when
/// one is configured.
#[utoipa::path(
    get,
    path = "/health/readiness",
    responses(
        (status = 200, description = "Ready to serve traffic"),
        (status = 503, description = "Store unreachable"),
    ),
    security(()),
    tag = "health"
)]
async fn readiness(State(state): State<AppState>) -> Response {
    if let Err(e) = state.resources.ping().await {
        tracing::warn!(error = %e, "readiness check failed");
        return (StatusCode::SERVICE_UNAVAILABLE, "store unreachable").into_response();
    }
    (StatusCode::OK, "ready").into_response()
}
