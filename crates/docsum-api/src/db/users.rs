//! User persistence operations on the `users` table.
//!
//! Emails arrive already normalized. The `UNIQUE` constraint on `email` is
//! the authority on duplicates.

use chrono::{DateTime, Utc};
use docsum_core::{User, UserId};
use sqlx::PgPool;
use uuid::Uuid;

/// Insert a new user.
pub async fn insert(pool: &PgPool, user: &User) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO users (id, email, password_hash, name, created_at)
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(user.id.as_uuid())
    .bind(&user.email)
    .bind(&user.password_hash)
    .bind(&user.name)
    .bind(user.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Fetch a user by normalized email.
pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, email, password_hash, name, created_at FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(UserRow::into_record))
}

/// Fetch a user by id.
pub async fn get_by_id(pool: &PgPool, id: UserId) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, email, password_hash, name, created_at FROM users WHERE id = $1",
    )
    .bind(id.as_uuid())
    .fetch_optional(pool)
    .await?;

    Ok(row.map(UserRow::into_record))
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    password_hash: String,
    name: Option<String>,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_record(self) -> User {
        User {
            id: UserId::from_uuid(self.id),
            email: self.email,
            password_hash: self.password_hash,
            name: self.name,
            created_at: self.created_at,
        }
    }
}
