//! # OpenAPI Specification Assembly
//!
//! Collects every utoipa-documented route into one OpenAPI document, served
//! at `/openapi.json` behind the auth guard.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::state::AppState;

/// Adds the Bearer JWT security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Session token from POST /auth/login."))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI document for the whole API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "docsum API",
        description = "Owner-scoped documents with AI-generated summaries.\n\nAuthentication: `Authorization: Bearer <token>` from `POST /auth/login`. Health probes, registration and login are public."
    ),
    security(
        ("bearer_auth" = [])
    ),
    paths(
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::me,
        crate::routes::documents::create_document,
        crate::routes::documents::list_documents,
        crate::routes::documents::get_document,
        crate::routes::documents::update_document,
        crate::routes::documents::delete_document,
        crate::routes::summaries::create_summary,
        crate::routes::summaries::list_summaries,
        crate::routes::summaries::delete_summary,
        crate::routes::health::health,
        crate::routes::health::readiness,
    ),
    components(
        schemas(
            crate::error::ErrorBody,
            crate::error::FieldIssue,
            crate::routes::auth::RegisterRequest,
            crate::routes::auth::LoginRequest,
            crate::routes::auth::UserView,
            crate::routes::auth::RegisterResponse,
            crate::routes::auth::LoginResponse,
            crate::routes::auth::MeResponse,
            crate::routes::documents::CreateDocumentRequest,
            crate::routes::documents::UpdateDocumentRequest,
            crate::routes::documents::DocumentView,
            crate::routes::documents::PaginationView,
            crate::routes::documents::DocumentResponse,
            crate::routes::documents::DocumentListResponse,
            crate::routes::documents::UpdateDocumentResponse,
            crate::routes::documents::DeleteDocumentResponse,
            crate::routes::summaries::CreateSummaryRequest,
            crate::routes::summaries::SummaryView,
            crate::routes::summaries::SummaryListItem,
            crate::routes::summaries::DocumentExcerpt,
            crate::routes::summaries::CreateSummaryResponse,
            crate::routes::summaries::DocumentSummariesResponse,
            crate::routes::summaries::DeleteSummaryResponse,
            crate::routes::health::HealthResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration, login and the current user"),
        (name = "documents", description = "Owner-scoped documents"),
        (name = "summaries", description = "Generated summaries of documents"),
        (name = "health", description = "Liveness and readiness probes"),
    )
)]
pub struct ApiDoc;

/// Router serving the OpenAPI document.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
