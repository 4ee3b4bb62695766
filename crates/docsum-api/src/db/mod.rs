//! # Database Persistence Layer
//!
//! Postgres persistence for users, documents and summaries via SQLx.
//!
//! The database is **optional**. When `DATABASE_URL` is set the API runs
//! against Postgres through [`PgStore`]; otherwise `main` falls back to the
//! in-memory store and nothing survives a restart.
//!
//! Each table has a module of free functions over `&PgPool` returning
//! `sqlx::Error`. [`PgStore`] adapts them to the lifecycle store traits and
//! maps constraint violations to [`StoreError::Conflict`].

pub mod documents;
pub mod summaries;
pub mod users;

use std::time::Duration;

use async_trait::async_trait;
use docsum_core::{Document, DocumentId, Summary, SummaryId, User, UserId};
use docsum_lifecycle::{IdentityStore, ResourceStore, StoreError};
use sqlx::postgres::{PgPool, PgPoolOptions};

/// Connect to Postgres and apply the embedded migrations.
pub async fn init_pool(url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(5))
        .connect(url)
        .await?;

    tracing::info!("Connected to PostgreSQL");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(pool)
}

/// Map a SQLx error onto the store taxonomy.
///
/// Unique and foreign-key violations are conflicts the lifecycle layer
/// reasons about. Everything else is an opaque backend failure.
pub fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() || db.is_foreign_key_violation() => {
            StoreError::Conflict(db.message().to_string())
        }
        _ => StoreError::Backend(err.to_string()),
    }
}

/// Postgres-backed identity and resource store.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap a connected pool. Migrations must already be applied.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityStore for PgStore {
    async fn insert_user(&self, user: &User) -> Result<(), StoreError> {
        users::insert(&self.pool, user).await.map_err(map_sqlx_error)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        users::find_by_email(&self.pool, email)
            .await
            .map_err(map_sqlx_error)
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        users::get_by_id(&self.pool, id).await.map_err(map_sqlx_error)
    }
}

#[async_trait]
impl ResourceStore for PgStore {
    async fn insert_document(&self, document: &Document) -> Result<(), StoreError> {
        documents::insert(&self.pool, document)
            .await
            .map_err(map_sqlx_error)
    }

    async fn get_document(&self, id: DocumentId) -> Result<Option<Document>, StoreError> {
        documents::get_by_id(&self.pool, id)
            .await
            .map_err(map_sqlx_error)
    }

    async fn list_documents(
        &self,
        owner: UserId,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<Document>, StoreError> {
        documents::list_for_owner(&self.pool, owner, offset, limit)
            .await
            .map_err(map_sqlx_error)
    }

    async fn count_documents(&self, owner: UserId) -> Result<u64, StoreError> {
        documents::count_for_owner(&self.pool, owner)
            .await
            .map_err(map_sqlx_error)
    }

    async fn update_document(&self, document: &Document) -> Result<bool, StoreError> {
        documents::update(&self.pool, document)
            .await
            .map_err(map_sqlx_error)
    }

    async fn delete_document(&self, id: DocumentId) -> Result<bool, StoreError> {
        documents::delete(&self.pool, id)
            .await
            .map_err(map_sqlx_error)
    }

    async fn insert_summary(&self, summary: &Summary) -> Result<(), StoreError> {
        summaries::insert(&self.pool, summary)
            .await
            .map_err(map_sqlx_error)
    }

    async fn get_summary(&self, id: SummaryId) -> Result<Option<Summary>, StoreError> {
        summaries::get_by_id(&self.pool, id)
            .await
            .map_err(map_sqlx_error)
    }

    async fn list_summaries(&self, document: DocumentId) -> Result<Vec<Summary>, StoreError> {
        summaries::list_for_document(&self.pool, document)
            .await
            .map_err(map_sqlx_error)
    }

    async fn count_summaries(&self, document: DocumentId) -> Result<u64, StoreError> {
        summaries::count_for_document(&self.pool, document)
            .await
            .map_err(map_sqlx_error)
    }

    async fn delete_summaries_for(&self, document: DocumentId) -> Result<u64, StoreError> {
        summaries::delete_for_document(&self.pool, document)
            .await
            .map_err(map_sqlx_error)
    }

    async fn delete_summary(&self, id: SummaryId) -> Result<bool, StoreError> {
        summaries::delete(&self.pool, id)
            .await
            .map_err(map_sqlx_error)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(map_sqlx_error)
    }
}

/// Clamp an unsigned count into the `BIGINT` range.
pub(crate) fn to_bigint(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Convert a `COUNT(*)` or `rows_affected` result to `u64`.
pub(crate) fn from_bigint(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}
