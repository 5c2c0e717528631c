//! # Key-Value Store
//!
//! Durable string records keyed by name.
//!
//! ## Records
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Key      │ Value (JSON)                          │ Present when         │
//! │  ─────────┼───────────────────────────────────────┼────────────────────  │
//! │  "user"   │ {"id":1,"email":..,"password":..}      │ signed in            │
//! │  "cart"   │ [{"product":{..},"quantity":2}, ..]    │ cart non-empty       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Implementations
//! - [`sqlite::SqliteStore`] - the production store, one row per key
//! - [`memory::MemoryStore`] - a map with failure injection, for tests
//!
//! ## Contract
//! - `get` of a missing key is `Ok(None)`, never an error
//! - `set` replaces any previous value
//! - `remove` of a missing key succeeds
//! - A completed write is visible to every later `get`, including after restart

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Asynchronous string-to-string store.
///
/// Object safe, so managers hold an `Arc<dyn KeyValueStore>` and tests swap
/// in a [`memory::MemoryStore`].
#[async_trait]
pub trait KeyValueStore: Send + Sync + std::fmt::Debug {
    /// Reads a value. Missing keys are `Ok(None)`.
    async fn get(&self, key: &str) -> DbResult<Option<String>>;

    /// Writes a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> DbResult<()>;

    /// Deletes a value. Deleting a missing key is not an error.
    async fn remove(&self, key: &str) -> DbResult<()>;
}

// =============================================================================
// JSON Helpers
// =============================================================================

/// Reads and decodes a JSON record.
///
/// ## Returns
/// * `Ok(None)` - no record under `key`
/// * `Ok(Some(value))` - decoded record
/// * `Err(DbError::Corrupt)` - record exists but does not decode as `T`
pub async fn load_json<T>(store: &dyn KeyValueStore, key: &str) -> DbResult<Option<T>>
where
    T: DeserializeOwned,
{
    let Some(raw) = store.get(key).await? else {
        return Ok(None);
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| DbError::corrupt(key, e))
}

/// Encodes a value as JSON and writes it under `key`.
pub async fn save_json<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> DbResult<()>
where
    T: Serialize + Sync + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|e| DbError::Serialization {
        key: key.to_string(),
        reason: e.to_string(),
    })?;

    debug!(key, bytes = raw.len(), "Saving record");
    store.set(key, &raw).await
}
