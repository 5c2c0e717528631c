//! # SQLite Key-Value Store
//!
//! One row per key in the `kv_store` table.
//!
//! ## Query Patterns
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  get     SELECT value FROM kv_store WHERE key = ?                      │
//! │  set     INSERT ... ON CONFLICT(key) DO UPDATE   (single statement)    │
//! │  remove  DELETE FROM kv_store WHERE key = ?                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each statement is atomic on its own, so a crash mid-`set` leaves either the
//! old value or the new one.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use super::KeyValueStore;
use crate::error::DbResult;

/// Key-value store backed by the SQLite pool.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Creates a store over an existing (migrated) pool.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteStore { pool }
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        debug!(key, "Record written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM kv_store WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        debug!(key, removed = result.rows_affected(), "Record removed");
        Ok(())
    }
}
