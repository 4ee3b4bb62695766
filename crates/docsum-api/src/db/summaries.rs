//! Summary persistence operations on the `summaries` table.

use chrono::{DateTime, Utc};
use docsum_core::{DocumentId, Summary, SummaryId, SummaryStyle};
use sqlx::PgPool;
use uuid::Uuid;

use super::from_bigint;

/// Insert a new summary. Fails with a foreign-key violation if the
/// document is gone.
pub async fn insert(pool: &PgPool, summary: &Summary) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO summaries (id, content, style, document_id, created_at)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(summary.id.as_uuid())
    .bind(&summary.content)
    .bind(summary.style.as_str())
    .bind(summary.document_id.as_uuid())
    .bind(summary.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Fetch a summary by id.
pub async fn get_by_id(pool: &PgPool, id: SummaryId) -> Result<Option<Summary>, sqlx::Error> {
    let row = sqlx::query_as::<_, SummaryRow>(
        "SELECT id, content, style, document_id, created_at FROM summaries WHERE id = $1",
    )
    .bind(id.as_uuid())
    .fetch_optional(pool)
    .await?;

    row.map(SummaryRow::into_record).transpose()
}

/// Every summary of a document, newest first.
pub async fn list_for_document(
    pool: &PgPool,
    document: DocumentId,
) -> Result<Vec<Summary>, sqlx::Error> {
    let rows = sqlx::query_as::<_, SummaryRow>(
        "SELECT id, content, style, document_id, created_at
         FROM summaries WHERE document_id = $1
         ORDER BY created_at DESC, seq DESC",
    )
    .bind(document.as_uuid())
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(SummaryRow::into_record).collect()
}

/// Number of summaries of a document.
pub async fn count_for_document(pool: &PgPool, document: DocumentId) -> Result<u64, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM summaries WHERE document_id = $1")
        .bind(document.as_uuid())
        .fetch_one(pool)
        .await?;

    Ok(from_bigint(count))
}

/// Delete every summary of a document, returning the number removed.
pub async fn delete_for_document(pool: &PgPool, document: DocumentId) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM summaries WHERE document_id = $1")
        .bind(document.as_uuid())
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Delete one summary.
pub async fn delete(pool: &PgPool, id: SummaryId) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM summaries WHERE id = $1")
        .bind(id.as_uuid())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    id: Uuid,
    content: String,
    style: String,
    document_id: Uuid,
    created_at: DateTime<Utc>,
}

impl SummaryRow {
    fn into_record(self) -> Result<Summary, sqlx::Error> {
        let style: SummaryStyle = self
            .style
            .parse()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        Ok(Summary {
            id: SummaryId::from_uuid(self.id),
            content: self.content,
            style,
            document_id: DocumentId::from_uuid(self.document_id),
            created_at: self.created_at,
        })
    }
}
