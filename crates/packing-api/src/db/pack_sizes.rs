//! Pack-size persistence operations.
//!
//! All functions take a `&PgPool` and operate on the `pack_sizes` table.
//! Positivity and uniqueness are enforced by the table constraints as well
//! as by request validation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::state::PackSizeRecord;

/// List every pack size, smallest first.
pub async fn list_all(pool: &PgPool) -> Result<Vec<PackSizeRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, PackSizeRow>(
        "SELECT id, size, created_at, updated_at FROM pack_sizes ORDER BY size ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(PackSizeRow::into_record).collect())
}

/// Just the sizes, smallest first. This is the catalog snapshot handed to
/// the engine.
pub async fn list_sizes(pool: &PgPool) -> Result<Vec<i64>, sqlx::Error> {
    sqlx::query_scalar("SELECT size FROM pack_sizes ORDER BY size ASC")
        .fetch_all(pool)
        .await
}

/// Fetch a pack size by ID.
pub async fn get_by_id(pool: &PgPool, id: i64) -> Result<Option<PackSizeRecord>, sqlx::Error> {
    let row = sqlx::query_as::<_, PackSizeRow>(
        "SELECT id, size, created_at, updated_at FROM pack_sizes WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(PackSizeRow::into_record))
}

/// Insert a new pack size. A duplicate size fails with a unique violation.
pub async fn insert(pool: &PgPool, size: i64) -> Result<PackSizeRecord, sqlx::Error> {
    let row = sqlx::query_as::<_, PackSizeRow>(
        "INSERT INTO pack_sizes (size) VALUES ($1)
         RETURNING id, size, created_at, updated_at",
    )
    .bind(size)
    .fetch_one(pool)
    .await?;

    Ok(row.into_record())
}

/// Change the size of an existing pack. Returns `None` if `id` is unknown.
pub async fn update(
    pool: &PgPool,
    id: i64,
    size: i64,
) -> Result<Option<PackSizeRecord>, sqlx::Error> {
    let row = sqlx::query_as::<_, PackSizeRow>(
        "UPDATE pack_sizes SET size = $1 WHERE id = $2
         RETURNING id, size, created_at, updated_at",
    )
    .bind(size)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(PackSizeRow::into_record))
}

/// Hard-delete a pack size. Returns `false` if `id` is unknown.
pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM pack_sizes WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Whether `err` is a Postgres unique-constraint violation.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct PackSizeRow {
    id: i64,
    size: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PackSizeRow {
    fn into_record(self) -> PackSizeRecord {
        PackSizeRecord {
            id: self.id,
            size: self.size,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
