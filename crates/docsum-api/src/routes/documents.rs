//! # Document Routes
//!
//! - `POST   /documents`    : create a document owned by the caller
//! - `GET    /documents`    : the caller's documents, newest first, paged
//! - `GET    /documents/:id`: one document
//! - `PATCH  /documents/:id`: partial update; a content change invalidates summaries
//! - `DELETE /documents/:id`: delete a document and its summaries
//!
//! Ownership and existence checks live in [`DocumentManager`](docsum_lifecycle::DocumentManager);
//! handlers only validate input and shape views.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use docsum_core::{Document, PageInfo, PageRequest};
use docsum_lifecycle::DocumentChanges;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::error::{AppError, FieldIssue};
use crate::extractors::{extract_validated_json, BodyField, Validate};
use crate::state::AppState;

/// Assemble the document router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/documents", get(list_documents).post(create_document))
        .route(
            "/documents/:id",
            get(get_document)
                .patch(update_document)
                .delete(delete_document),
        )
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Create-document input.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateDocumentRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub title: BodyField<String>,
    #[serde(default)]
    #[schema(value_type = String)]
    pub content: BodyField<String>,
}

impl Validate for CreateDocumentRequest {
    fn issues(&self) -> Vec<FieldIssue> {
        let mut issues: Vec<FieldIssue> = self.title.type_issue("title").into_iter().collect();
        if let Some(issue) = self.content.type_issue("content") {
            issues.push(issue);
        } else if self.content.as_deref().map_or(true, str::is_empty) {
            issues.push(FieldIssue::new("content", "Content is required"));
        }
        issues
    }
}

/// Partial update. At least one field must be present.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateDocumentRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub title: BodyField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub content: BodyField<String>,
}

impl Validate for UpdateDocumentRequest {
    fn issues(&self) -> Vec<FieldIssue> {
        let mut issues = Vec::new();
        if self.title.is_missing() && self.content.is_missing() {
            issues.push(FieldIssue::new(
                "body",
                "At least one of title or content must be provided",
            ));
        }
        issues.extend(self.title.type_issue("title"));
        if let Some(issue) = self.content.type_issue("content") {
            issues.push(issue);
        } else if self.content.as_deref().is_some_and(str::is_empty) {
            issues.push(FieldIssue::new("content", "Content cannot be empty"));
        }
        issues
    }
}

/// Paging query. Non-numeric values fall back to the defaults.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// 1-based page number (default 1).
    pub page: Option<String>,
    /// Page size (default 10, at most 100).
    pub limit: Option<String>,
}

/// Wire view of a document.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentView {
    pub id: Uuid,
    pub title: Option<String>,
    pub content: String,
    /// Owning user.
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Document> for DocumentView {
    fn from(doc: Document) -> Self {
        Self {
            id: *doc.id.as_uuid(),
            title: doc.title,
            content: doc.content,
            user_id: *doc.owner_id.as_uuid(),
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

/// Pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationView {
    pub current_page: u32,
    pub total_pages: u64,
    pub total: u64,
    pub limit: u32,
}

impl From<PageInfo> for PaginationView {
    fn from(page: PageInfo) -> Self {
        Self {
            current_page: page.current_page,
            total_pages: page.total_pages,
            total: page.total,
            limit: page.limit,
        }
    }
}

/// A single document, with a message on create.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DocumentResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub document: DocumentView,
}

/// One page of documents.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentView>,
    pub pagination: PaginationView,
}

/// Update result.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocumentResponse {
    pub message: String,
    pub document: DocumentView,
    /// Whether the content change removed existing summaries.
    pub summaries_invalidated: bool,
    /// Number of summaries removed.
    pub invalidated_count: u64,
}

/// Delete confirmation.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteDocumentResponse {
    pub message: String,
    /// Number of summaries removed with the document.
    pub summaries_deleted: u64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Create a document owned by the caller.
#[utoipa::path(
    post,
    path = "/documents",
    request_body = CreateDocumentRequest,
    responses(
        (status = 201, description = "Document created", body = DocumentResponse),
        (status = 400, description = "Validation failed", body = crate::error::ErrorBody),
    ),
    tag = "documents"
)]
async fn create_document(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    body: Result<Json<CreateDocumentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DocumentResponse>), AppError> {
    let req = extract_validated_json(body)?;
    let document = state
        .documents
        .create(
            caller.id,
            req.title.into_option(),
            req.content.into_option().unwrap_or_default(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(DocumentResponse {
            message: Some("Document created successfully".into()),
            document: document.into(),
        }),
    ))
}

/// List the caller's documents, newest first.
#[utoipa::path(
    get,
    path = "/documents",
    params(ListQuery),
    responses(
        (status = 200, description = "One page of documents", body = DocumentListResponse),
    ),
    tag = "documents"
)]
async fn list_documents(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<DocumentListResponse>, AppError> {
    let request = PageRequest::from_query(query.page.as_deref(), query.limit.as_deref());
    let page = state.documents.list(caller.id, request).await?;

    Ok(Json(DocumentListResponse {
        documents: page.documents.into_iter().map(DocumentView::from).collect(),
        pagination: page.page.into(),
    }))
}

/// Fetch one of the caller's documents.
#[utoipa::path(
    get,
    path = "/documents/{id}",
    params(("id" = String, Path, description = "Document id")),
    responses(
        (status = 200, description = "Document", body = DocumentResponse),
        (status = 400, description = "Malformed id", body = crate::error::ErrorBody),
        (status = 403, description = "Owned by another user", body = crate::error::ErrorBody),
        (status = 404, description = "Document not found", body = crate::error::ErrorBody),
    ),
    tag = "documents"
)]
async fn get_document(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<DocumentResponse>, AppError> {
    let document = state.documents.get(caller.id, &id).await?;
    Ok(Json(DocumentResponse {
        message: None,
        document: document.into(),
    }))
}

/// Update title and/or content. A content change deletes the document's
/// summaries first.
#[utoipa::path(
    patch,
    path = "/documents/{id}",
    params(("id" = String, Path, description = "Document id")),
    request_body = UpdateDocumentRequest,
    responses(
        (status = 200, description = "Document updated", body = UpdateDocumentResponse),
        (status = 400, description = "Validation failed or malformed id", body = crate::error::ErrorBody),
        (status = 403, description = "Owned by another user", body = crate::error::ErrorBody),
        (status = 404, description = "Document not found", body = crate::error::ErrorBody),
    ),
    tag = "documents"
)]
async fn update_document(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    Path(id): Path<String>,
    body: Result<Json<UpdateDocumentRequest>, JsonRejection>,
) -> Result<Json<UpdateDocumentResponse>, AppError> {
    let req = extract_validated_json(body)?;
    let changes = DocumentChanges {
        title: req.title.into_option(),
        content: req.content.into_option(),
    };
    let update = state.documents.update(caller.id, &id, changes).await?;

    let message = if update.content_changed {
        "Document updated successfully. Existing summaries were invalidated because the content changed."
    } else {
        "Document updated successfully"
    };

    Ok(Json(UpdateDocumentResponse {
        message: message.into(),
        document: update.document.into(),
        summaries_invalidated: update.content_changed,
        invalidated_count: update.summaries_invalidated,
    }))
}

/// Delete a document and every summary generated from it.
#[utoipa::path(
    delete,
    path = "/documents/{id}",
    params(("id" = String, Path, description = "Document id")),
    responses(
        (status = 200, description = "Document deleted", body = DeleteDocumentResponse),
        (status = 400, description = "Malformed id", body = crate::error::ErrorBody),
        (status = 403, description = "Owned by another user", body = crate::error::ErrorBody),
        (status = 404, description = "Document not found", body = crate::error::ErrorBody),
    ),
    tag = "documents"
)]
async fn delete_document(
    State(state): State<AppState>,
    caller: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<DeleteDocumentResponse>, AppError> {
    let summaries_deleted = state.documents.delete(caller.id, &id).await?;
    Ok(Json(DeleteDocumentResponse {
        message: "Document deleted successfully".into(),
        summaries_deleted,
    }))
}
