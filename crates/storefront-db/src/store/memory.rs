//! # In-Memory Key-Value Store
//!
//! A `HashMap` behind a mutex. Nothing survives the process; used by tests
//! and by `--ephemeral` runs.
//!
//! Reads and writes can be made to fail on demand, and every successful
//! write is counted, which lets callers check how many writes a burst of
//! mutations actually produced.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::KeyValueStore;
use crate::error::{DbError, DbResult};

/// In-memory store with failure injection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with entries.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        {
            let mut map = store.lock();
            for (k, v) in entries {
                map.insert(k.into(), v.into());
            }
        }
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Makes every subsequent `get` fail (or succeed again).
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent `set` and `remove` fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful `set` and `remove` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Reads a value without going through the async trait.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn check_writable(&self) -> DbResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DbError::QueryFailed("simulated write failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DbError::QueryFailed("simulated read failure".to_string()));
        }
        Ok(self.peek(key))
    }

    async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        self.check_writable()?;
        self.lock().insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove(&self, key: &str) -> DbResult<()> {
        self.check_writable()?;
        self.lock().remove(key);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
