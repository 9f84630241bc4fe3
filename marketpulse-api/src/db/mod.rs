//! Database initialization and storage modules
//!
//! All durable state lives here. Every multi-tenant query combines the
//! primary-key predicate with the owner predicate in a single statement, so
//! there is no check-ownership-then-act window.

use marketpulse_common::{BrandKind, Result};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

pub mod brand;
pub mod reports;

/// Open the connection pool and ensure the schema exists
pub async fn init_pool(database_url: &str) -> Result<SqlitePool> {
    // For file-backed databases, make sure the parent directory exists
    if let Some(raw_path) = database_url.strip_prefix("sqlite://") {
        let path = raw_path.split('?').next().unwrap_or(raw_path);
        if path != ":memory:" {
            if let Some(parent) = Path::new(path).parent() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;
    // WAL allows concurrent readers with one writer
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;
    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    create_schema(&pool).await?;
    info!("Database schema ready");

    Ok(pool)
}

/// Create all tables if they do not exist (idempotent)
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reports (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            name TEXT,
            address TEXT NOT NULL,
            business_type TEXT NOT NULL,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_reports_user ON reports(user_id, created_at)")
        .execute(pool)
        .await?;

    for kind in BrandKind::ALL {
        create_brand_table(pool, kind).await?;
    }

    Ok(())
}

/// Create one brand-entity table from its kind descriptor
async fn create_brand_table(pool: &SqlitePool, kind: BrandKind) -> Result<()> {
    // Table and column names come from the static kind descriptor, never
    // from request input
    let sql = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            {column} TEXT NOT NULL,
            original_input TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
        table = kind.table(),
        column = kind.column(),
    );
    sqlx::query(&sql).execute(pool).await?;

    let index_sql = format!(
        "CREATE INDEX IF NOT EXISTS idx_{table}_user ON {table}(user_id, created_at)",
        table = kind.table(),
    );
    sqlx::query(&index_sql).execute(pool).await?;

    Ok(())
}

#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
    // Single connection so every query sees the same in-memory database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    create_schema(&pool).await.expect("Schema creation failed");
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn schema_creation_is_idempotent() {
        let pool = memory_pool().await;
        create_schema(&pool).await.expect("Second run should succeed");

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        let names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();
        assert!(names.contains(&"reports"));
        for kind in BrandKind::ALL {
            assert!(names.contains(&kind.table()), "missing {}", kind.table());
        }
    }
}
