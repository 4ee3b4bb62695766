//! # Summary Routes
//!
//! - `POST   /summaries`                     : generate and store a summary
//! - `GET    /summaries/document/:documentId`: a document's summaries, newest first
//! - `DELETE /summaries/:id`                 : delete one summary
//!
//! Access to a summary is decided by its parent document's owner.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use docsum_core::{Summary, SummaryStyle};
use docsum_lifecycle::DocumentSummaries;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::error::{AppError, FieldIssue};
use crate::extractors::{extract_validated_json, BodyField, Validate};
use crate::state::AppState;

/// Validation message for an unknown or missing style.
pub const STYLE_MESSAGE: &str = "Style must be one of: brief, detailed, bullet-points";

/// Assemble the summary router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/summaries", post(create_summary))
        .route("/summaries/document/:document_id", get(list_summaries))
        .route("/summaries/:id", delete(delete_summary))
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Create-summary input.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSummaryRequest {
    #[serde(default)]
    #[schema(value_type = String)]
    pub document_id: BodyField<String>,
    /// One of `brief`, `detailed`, `bullet-points`.
    #[serde(default)]
    #[schema(value_type = String)]
    pub style: BodyField<String>,
}

impl CreateSummaryRequest {
    fn parsed_style(&self) -> Option<SummaryStyle> {
        self.style.as_deref().and_then(|s| s.parse().ok())
    }
}

impl Validate for CreateSummaryRequest {
    fn issues(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        if let Some(issue) = self.document_id.type_issue("documentId") {
            issues.push(issue);
        } else if self.document_id.as_deref().map_or(true, str::is_empty) {
            issues.push(FieldIssue::new("documentId", "Document ID is required"));
        }
        if self.parsed_style().is_none() {
            issues.push(FieldIssue::new("style", STYLE_MESSAGE));
        }
        issues
    }
}

/// Wire view of a summary.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryView {
    pub id: Uuid,
    pub content: String,
    pub style: String,
    pub document_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<Summary> for SummaryView {
    fn from(summary: Summary) -> Self {
        Self {
            id: *summary.id.as_uuid(),
            content: summary.content,
            style: summary.style.as_str().to_string(),
            document_id: *summary.document_id.as_uuid(),
            created_at: summary.created_at,
        }
    }
}

/// Summary as listed under its document.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryListItem {
    pub id: Uuid,
    pub content: String,
    pub style: String,
    pub created_at: DateTime<Utc>,
}

impl From<Summary> for SummaryListItem {
    fn from(summary: Summary) -> Self {
        Self {
            id: *summary.id.as_uuid(),
            content: summary.content,
            style: summary.style.as_str().to_string(),
            created_at: summary.created_at,
        }
    }
}

/// Trimmed document view shown above its summaries.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DocumentExcerpt {
    pub id: Uuid,
    pub title: Option<String>,
    pub content: String,
}

/// Creation result.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateSummaryResponse {
    pub message: String,
    pub summary: SummaryView,
}

/// A document with its summaries.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DocumentSummariesResponse {
    pub document: DocumentExcerpt,
    pub summaries: Vec<SummaryListItem>,
    pub count: usize,
}

impl From<DocumentSummaries> for DocumentSummariesResponse {
    fn from(listing: DocumentSummaries) -> Self {
        let summaries: Vec<SummaryListItem> =
            listing.summaries.into_iter().map(SummaryListItem::from).collect();
        Self {
            document: DocumentExcerpt {
                id: *listing.document.id.as_uuid(),
                title: listing.document.title,
                content: listing.document.content,
            },
            count: summaries.len(),
            summaries,
        }
    }
}

/// Delete confirmation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteSummaryResponse {
    pub message: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Generate a summary of one of the caller's documents.
#[utoipa::path(
    post,
    path = "/summaries",
    request_body = CreateSummaryRequest,
    responses(
        (status = 201, description = "Summary created", body = CreateSummaryResponse),
        (status = 400, description = "Validation failed or malformed id", body = crate::error::ErrorBody),
        (status = 403, description = "Document owned by another user", body = crate::error::ErrorBody),
        (status = 404, description = "Document not found", body = crate::error::ErrorBody),
        (status = 503, description = "Summarization service failed", body = crate::error::ErrorBody),
    ),
    tag = "summaries"
)]
async fn create_summary(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    body: Result<Json<CreateSummaryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateSummaryResponse>), AppError> {
    let req = extract_validated_json(body)?;
    let style = req
        .parsed_style()
        .ok_or_else(|| AppError::Validation(vec![FieldIssue::new("style", STYLE_MESSAGE)]))?;
    let document_id = req.document_id.into_option().unwrap_or_default();

    let summary = state
        .summaries
        .create(caller.id, &document_id, style)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateSummaryResponse {
            message: "Summary created successfully".into(),
            summary: summary.into(),
        }),
    ))
}

/// List a document's summaries, newest first.
#[utoipa::path(
    get,
    path = "/summaries/document/{documentId}",
    params(("documentId" = String, Path, description = "Document id")),
    responses(
        (status = 200, description = "Summaries of the document", body = DocumentSummariesResponse),
        (status = 400, description = "Malformed id", body = crate::error::ErrorBody),
        (status = 403, description = "Document owned by another user", body = crate::error::ErrorBody),
        (status = 404, description = "Document not found", body = crate::error::ErrorBody),
    ),
    tag = "summaries"
)]
async fn list_summaries(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    Path(document_id): Path<String>,
) -> Result<Json<DocumentSummariesResponse>, AppError> {
    let listing = state
        .summaries
        .list_for_document(caller.id, &document_id)
        .await?;
    Ok(Json(listing.into()))
}

/// Delete one summary of one of the caller's documents.
#[utoipa::path(
    delete,
    path = "/summaries/{id}",
    params(("id" = String, Path, description = "Summary id")),
    responses(
        (status = 200, description = "Summary deleted", body = DeleteSummaryResponse),
        (status = 400, description = "Malformed id", body = crate::error::ErrorBody),
        (status = 403, description = "Document owned by another user", body = crate::error::ErrorBody),
        (status = 404, description = "Summary not found", body = crate::error::ErrorBody),
    ),
    tag = "summaries"
)]
async fn delete_summary(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<DeleteSummaryResponse>, AppError> {
    state.summaries.delete(caller.id, &id).await?;
    Ok(Json(DeleteSummaryResponse {
        message: "Summary deleted successfully".into(),
    }))
}
