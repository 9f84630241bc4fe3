//! Brand-strategy entity persistence
//!
//! One parameterized implementation serves all five kinds; the `BrandKind`
//! descriptor supplies table and column names (static strings, never request
//! input). Updates touch only the primary text field; delete is idempotent.

use chrono::{DateTime, Utc};
use marketpulse_common::{BrandKind, BrandRecord, Error, Result};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

/// Insert a new record owned by `user_id`
pub async fn create(
    pool: &SqlitePool,
    kind: BrandKind,
    user_id: &str,
    text: &str,
    original_input: &str,
) -> Result<BrandRecord> {
    let created_at = Utc::now();
    let sql = format!(
        "INSERT INTO {table} (user_id, {column}, original_input, created_at) VALUES (?, ?, ?, ?) RETURNING id",
        table = kind.table(),
        column = kind.column(),
    );

    let row = sqlx::query(&sql)
        .bind(user_id)
        .bind(text)
        .bind(original_input)
        .bind(created_at)
        .fetch_one(pool)
        .await?;

    Ok(BrandRecord {
        id: row.get("id"),
        user_id: user_id.to_string(),
        text: text.to_string(),
        original_input: original_input.to_string(),
        created_at,
    })
}

/// All records of this kind owned by `user_id`, newest first
pub async fn list(pool: &SqlitePool, kind: BrandKind, user_id: &str) -> Result<Vec<BrandRecord>> {
    let sql = format!(
        "SELECT id, user_id, {column} AS text, original_input, created_at \
         FROM {table} WHERE user_id = ? ORDER BY created_at DESC, id DESC",
        table = kind.table(),
        column = kind.column(),
    );

    let rows = sqlx::query(&sql).bind(user_id).fetch_all(pool).await?;
    Ok(rows.into_iter().map(map_record).collect())
}

/// Replace the primary text field of an owned record; `NotFound` when no row
/// matched (nonexistent id and foreign owner are indistinguishable)
pub async fn update(
    pool: &SqlitePool,
    kind: BrandKind,
    id: i64,
    user_id: &str,
    text: &str,
) -> Result<BrandRecord> {
    let sql = format!(
        "UPDATE {table} SET {column} = ? WHERE id = ? AND user_id = ? \
         RETURNING id, user_id, {column} AS text, original_input, created_at",
        table = kind.table(),
        column = kind.column(),
    );

    let row = sqlx::query(&sql)
        .bind(text)
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    row.map(map_record)
        .ok_or_else(|| Error::NotFound(format!("{} {} not found", kind.label(), id)))
}

/// Delete an owned record; succeeds whether or not a row matched
pub async fn delete(pool: &SqlitePool, kind: BrandKind, id: i64, user_id: &str) -> Result<()> {
    let sql = format!("DELETE FROM {table} WHERE id = ? AND user_id = ?", table = kind.table());

    sqlx::query(&sql).bind(id).bind(user_id).execute(pool).await?;
    Ok(())
}

fn map_record(row: SqliteRow) -> BrandRecord {
    BrandRecord {
        id: row.get("id"),
        user_id: row.get("user_id"),
        text: row.get("text"),
        original_input: row.get("original_input"),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
    }
}
