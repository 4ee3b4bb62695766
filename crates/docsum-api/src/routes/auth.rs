//! # Account Routes
//!
//! - `POST /auth/register`: create an account (public)
//! - `POST /auth/login`   : exchange credentials for a session token (public)
//! - `GET  /auth/me`      : the authenticated caller

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use docsum_core::model::normalize_email;
use docsum_core::User;
use docsum_lifecycle::StoreError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::password::{hash_password_blocking, verify_password_blocking};
use crate::auth::AuthenticatedUser;
use crate::error::{AppError, FieldIssue};
use crate::extractors::{extract_validated_json, is_valid_email, BodyField, Validate};
use crate::state::AppState;

const DUPLICATE_EMAIL: &str = "User with this email already exists";
const BAD_CREDENTIALS: &str = "Invalid email or password";

/// Routes reachable without a session token.
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

/// Routes behind the auth guard.
pub fn router() -> Router<AppState> {
    Router::new().route("/auth/me", get(me))
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Registration input.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    #[schema(value_type = String)]
    pub email: BodyField<String>,
    #[serde(default)]
    #[schema(value_type = String)]
    pub password: BodyField<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub name: BodyField<String>,
}

impl Validate for RegisterRequest {
    fn issues(&self) -> Vec<FieldIssue> {
        let mut issues = credential_issues(&self.email, &self.password);
        issues.extend(self.name.type_issue("name"));
        issues
    }
}

/// Login input.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(value_type = String)]
    pub email: BodyField<String>,
    #[serde(default)]
    #[schema(value_type = String)]
    pub password: BodyField<String>,
}

impl Validate for LoginRequest {
    fn issues(&self) -> Vec<FieldIssue> {
        credential_issues(&self.email, &self.password)
    }
}

fn credential_issues(email: &BodyField<String>, password: &BodyField<String>) -> Vec<FieldIssue> {
    let mut issues = Vec::new();
    if let Some(issue) = email.type_issue("email") {
        issues.push(issue);
    } else if !email.as_deref().is_some_and(is_valid_email) {
        issues.push(FieldIssue::new("email", "Invalid email address"));
    }
    if let Some(issue) = password.type_issue("password") {
        issues.push(issue);
    } else if password.as_deref().map_or(true, str::is_empty) {
        issues.push(FieldIssue::new("password", "Password is required"));
    }
    issues
}

/// Public view of a user. Never carries the credential hash.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: *user.id.as_uuid(),
            email: user.email.clone(),
            name: user.name.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<AuthenticatedUser> for UserView {
    fn from(user: AuthenticatedUser) -> Self {
        Self {
            id: *user.id.as_uuid(),
            email: user.email,
            name: user.name,
            created_at: user.created_at,
        }
    }
}

/// Registration result.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserView,
}

/// Login result.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub message: String,
    /// Bearer token for subsequent requests.
    pub token: String,
    pub user: UserView,
}

/// The authenticated caller.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MeResponse {
    pub user: UserView,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Register a new account.
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Validation failed", body = crate::error::ErrorBody),
        (status = 409, description = "Email already registered", body = crate::error::ErrorBody),
    ),
    security(()),
    tag = "auth"
)]
async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let req = extract_validated_json(body)?;
    let email = normalize_email(req.email.as_deref().unwrap_or_default());
    let password = req.password.into_option().unwrap_or_default();

    if state.identities.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict(DUPLICATE_EMAIL.into()));
    }

    let hash = hash_password_blocking(password)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let name = req.name.into_option().map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
    let user = User::new(&email, hash, name);

    match state.identities.insert_user(&user).await {
        Ok(()) => {}
        Err(StoreError::Conflict(_)) => return Err(AppError::Conflict(DUPLICATE_EMAIL.into())),
        Err(e) => return Err(e.into()),
    }

    tracing::info!(user_id = %user.id, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".into(),
            user: UserView::from(&user),
        }),
    ))
}

/// Exchange email and password for a session token.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Validation failed", body = crate::error::ErrorBody),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorBody),
    ),
    security(()),
    tag = "auth"
)]
async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let req = extract_validated_json(body)?;
    let email = normalize_email(req.email.as_deref().unwrap_or_default());
    let password = req.password.into_option().unwrap_or_default();

    let Some(user) = state.identities.find_user_by_email(&email).await? else {
        tracing::warn!("login for unknown email");
        return Err(AppError::Unauthorized(BAD_CREDENTIALS.into()));
    };
    if !verify_password_blocking(password, user.password_hash.clone()).await {
        tracing::warn!(user_id = %user.id, "login with wrong password");
        return Err(AppError::Unauthorized(BAD_CREDENTIALS.into()));
    }

    let token = state
        .tokens
        .issue(&user)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(LoginResponse {
        message: "Login successful".into(),
        token,
        user: UserView::from(&user),
    }))
}

/// The authenticated caller's account.
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Current user", body = MeResponse),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorBody),
    ),
    tag = "auth"
)]
async fn me(caller: AuthenticatedUser) -> Json<MeResponse> {
    Json(MeResponse {
        user: caller.into(),
    })
}
