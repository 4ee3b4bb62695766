//! # Authentication
//!
//! Bearer-token guard for every document and summary route.
//!
//! ## Flow
//!
//! ```text
//! Authorization: Bearer <jwt>
//!   → verify signature + expiry      (token::TokenKeys)
//!   → parse `sub` as a UserId
//!   → resolve the user in the IdentityStore
//!   → insert AuthenticatedUser into request extensions
//! ```
//!
//! Every failure in that chain produces the same opaque 401 body. The
//! specific reason is logged at `warn`.

pub mod password;
pub mod token;

use axum::extract::{Request, State};
use axum::http::header;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use docsum_core::{User, UserId};

use crate::error::AppError;
use crate::state::AppState;

/// Body of every guard rejection.
pub const UNAUTHENTICATED_MESSAGE: &str = "Invalid or missing authentication token";

/// The resolved caller, without the credential hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// User id.
    pub id: UserId,
    /// Normalized email.
    pub email: String,
    /// Optional display name.
    pub name: Option<String>,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl From<User> for AuthenticatedUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            created_at: user.created_at,
        }
    }
}

/// Extracts the identity the auth middleware injected into extensions.
/// Returns 401 if none is present (the route is not behind the guard).
#[axum::async_trait]
impl<S: Send + Sync> axum::extract::FromRequestParts<S> for AuthenticatedUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized(UNAUTHENTICATED_MESSAGE.into()))
    }
}

/// Why a request failed authentication. Logged only.
#[derive(Debug, thiserror::Error)]
enum Rejection {
    #[error("missing authorization header")]
    MissingHeader,
    #[error("authorization header is not a Bearer credential")]
    NotBearer,
    #[error("{0}")]
    BadToken(#[from] token::TokenError),
    #[error("token subject is not a user id: {0}")]
    BadSubject(#[from] docsum_core::IdError),
    #[error("token subject {0} no longer exists")]
    UnknownUser(UserId),
}

/// Verify the bearer token and attach the resolved [`AuthenticatedUser`].
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .map(|v| v.to_str().unwrap_or_default().to_string());

    match authenticate(&state, header_value.as_deref()).await {
        Ok(Ok(user)) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Ok(Err(reason)) => {
            tracing::warn!(%reason, "authentication failed");
            AppError::Unauthorized(UNAUTHENTICATED_MESSAGE.into()).into_response()
        }
        Err(store_error) => store_error.into_response(),
    }
}

/// Outer `Err` is an identity store failure, inner `Err` an auth rejection.
async fn authenticate(
    state: &AppState,
    header_value: Option<&str>,
) -> Result<Result<AuthenticatedUser, Rejection>, AppError> {
    let Some(header_value) = header_value else {
        return Ok(Err(Rejection::MissingHeader));
    };
    let Some(raw) = header_value.strip_prefix("Bearer ") else {
        return Ok(Err(Rejection::NotBearer));
    };

    let claims = match state.tokens.verify(raw.trim()) {
        Ok(claims) => claims,
        Err(e) => return Ok(Err(e.into())),
    };
    let user_id = match UserId::parse(&claims.sub) {
        Ok(id) => id,
        Err(e) => return Ok(Err(e.into())),
    };

    Ok(state
        .identities
        .get_user(user_id)
        .await?
        .map(AuthenticatedUser::from)
        .ok_or(Rejection::UnknownUser(user_id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::{Claims, TokenKeys, DEFAULT_TTL};
    use crate::state::{AppState, UnavailableSummarizer};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::middleware::from_fn_with_state;
    use axum::routing::get;
    use axum::Router;
    use docsum_lifecycle::IdentityStore;
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn whoami(user: AuthenticatedUser) -> String {
        user.email
    }

    fn test_state() -> AppState {
        AppState::in_memory(
            Arc::new(UnavailableSummarizer),
            TokenKeys::from_secret(b"guard-test-secret", DEFAULT_TTL),
        )
    }

    fn test_app(state: AppState) -> Router {
        Router::new()
            .route("/whoami", get(whoami))
            .layer(from_fn_with_state(state.clone(), auth_middleware))
            .with_state(state)
    }

    async fn call(app: Router, auth: Option<&str>) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().uri("/whoami");
        if let Some(value) = auth {
            builder = builder.header("authorization", value);
        }
        let response = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn valid_token_resolves_user() {
        let state = test_state();
        let user = User::new("me@x.com", "hash".into(), None);
        state.identities.insert_user(&user).await.unwrap();
        let token = state.tokens.issue(&user).unwrap();

        let (status, body) = call(test_app(state), Some(&format!("Bearer {token}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"me@x.com");
    }

    #[tokio::test]
    async fn every_failure_mode_has_identical_body() {
        let state = test_state();
        let ghost = User::new("ghost@x.com", "hash".into(), None);
        let ghost_token = state.tokens.issue(&ghost).unwrap();
        let foreign_token = TokenKeys::from_secret(b"other", DEFAULT_TTL)
            .issue(&ghost)
            .unwrap();
        let bad_subject = state
            .tokens
            .sign(&Claims {
                sub: "not-a-uuid".into(),
                email: "x@x.com".into(),
                iat: 0,
                exp: u64::MAX / 2,
            })
            .unwrap();
        let expired = state
            .tokens
            .sign(&Claims {
                sub: ghost.id.to_string(),
                email: "x@x.com".into(),
                iat: 0,
                exp: 1,
            })
            .unwrap();

        let headers = [
            None,
            Some("Basic dXNlcjpwYXNz".to_string()),
            Some("Bearer".to_string()),
            Some("Bearer garbage".to_string()),
            Some(format!("Bearer {foreign_token}")),
            Some(format!("Bearer {bad_subject}")),
            Some(format!("Bearer {expired}")),
            Some(format!("Bearer {ghost_token}")),
        ];

        let mut bodies = Vec::new();
        for header in &headers {
            let (status, body) = call(test_app(state.clone()), header.as_deref()).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{header:?}");
            bodies.push(body);
        }
        assert!(bodies.windows(2).all(|w| w[0] == w[1]));

        let json: serde_json::Value = serde_json::from_slice(&bodies[0]).unwrap();
        assert_eq!(json["error"], UNAUTHENTICATED_MESSAGE);
        assert_eq!(json["code"], "UNAUTHENTICATED");
    }
}
