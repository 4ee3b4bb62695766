//! Document persistence operations on the `documents` table.
//!
//! Listing order is `created_at DESC, seq DESC`; `seq` breaks ties between
//! documents created in the same microsecond so pages never overlap.

use chrono::{DateTime, Utc};
use docsum_core::{Document, DocumentId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use super::{from_bigint, to_bigint};

/// Insert a new document.
pub async fn insert(pool: &PgPool, document: &Document) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO documents (id, title, content, owner_id, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(document.id.as_uuid())
    .bind(&document.title)
    .bind(&document.content)
    .bind(document.owner_id.as_uuid())
    .bind(document.created_at)
    .bind(document.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Fetch a document by id.
pub async fn get_by_id(pool: &PgPool, id: DocumentId) -> Result<Option<Document>, sqlx::Error> {
    let row = sqlx::query_as::<_, DocumentRow>(
        "SELECT id, title, content, owner_id, created_at, updated_at
         FROM documents WHERE id = $1",
    )
    .bind(id.as_uuid())
    .fetch_optional(pool)
    .await?;

    Ok(row.map(DocumentRow::into_record))
}

/// One page of an owner's documents, newest first.
pub async fn list_for_owner(
    pool: &PgPool,
    owner: UserId,
    offset: u64,
    limit: u32,
) -> Result<Vec<Document>, sqlx::Error> {
    let rows = sqlx::query_as::<_, DocumentRow>(
        "SELECT id, title, content, owner_id, created_at, updated_at
         FROM documents WHERE owner_id = $1
         ORDER BY created_at DESC, seq DESC
         LIMIT $2 OFFSET $3",
    )
    .bind(owner.as_uuid())
    .bind(i64::from(limit))
    .bind(to_bigint(offset))
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(DocumentRow::into_record).collect())
}

/// Number of documents an owner has.
pub async fn count_for_owner(pool: &PgPool, owner: UserId) -> Result<u64, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE owner_id = $1")
        .bind(owner.as_uuid())
        .fetch_one(pool)
        .await?;

    Ok(from_bigint(count))
}

/// Overwrite title, content and `updated_at`. Returns `false` if the row is gone.
pub async fn update(pool: &PgPool, document: &Document) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE documents SET title = $1, content = $2, updated_at = $3 WHERE id = $4",
    )
    .bind(&document.title)
    .bind(&document.content)
    .bind(document.updated_at)
    .bind(document.id.as_uuid())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a document. The foreign key from `summaries` rejects this while
/// any summary still references it.
pub async fn delete(pool: &PgPool, id: DocumentId) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM documents WHERE id = $1")
        .bind(id.as_uuid())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: Uuid,
    title: Option<String>,
    content: String,
    owner_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DocumentRow {
    fn into_record(self) -> Document {
        Document {
            id: DocumentId::from_uuid(self.id),
            title: self.title,
            content: self.content,
            owner_id: UserId::from_uuid(self.owner_id),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
