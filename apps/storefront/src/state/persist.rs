//! # Write-Behind Persister
//!
//! Applies record writes on a background task so mutations never wait on
//! storage.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Write-Behind Persistence                            │
//! │                                                                         │
//! │  CartManager (holding cart lock)                                        │
//! │       │  handle.write("cart", snapshot)     ◄── never blocks            │
//! │       ▼                                                                 │
//! │  ┌──────────────────── unbounded mpsc ────────────────────┐            │
//! │  │ Write(cart, s1)  Write(cart, s2)  Flush(tx)  Write(..)  │            │
//! │  └─────────────────────────────┬───────────────────────────┘            │
//! │                                ▼                                        │
//! │  Persister::run                                                         │
//! │    1. recv one command, then drain everything already queued           │
//! │    2. coalesce writes per key (last write wins)                        │
//! │    3. apply to KeyValueStore in first-queued key order                 │
//! │    4. answer every Flush in the batch                                  │
//! │                                                                         │
//! │  Failed writes: error! log, no retry, memory untouched.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The task stops once every [`PersisterHandle`] is dropped and the queue
//! is drained.

use std::sync::Arc;

use storefront_db::KeyValueStore;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

/// What to do with a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    /// Store this value.
    Set(String),
    /// Delete the record.
    Remove,
}

#[derive(Debug)]
enum PersistCommand {
    Write { key: String, op: WriteOp },
    Flush(oneshot::Sender<()>),
}

// =============================================================================
// Handle
// =============================================================================

/// Sending side of the persister. Cheap to clone.
#[derive(Debug, Clone)]
pub struct PersisterHandle {
    tx: mpsc::UnboundedSender<PersistCommand>,
}

impl PersisterHandle {
    /// Queues a write. Returns immediately.
    pub fn write(&self, key: impl Into<String>, op: WriteOp) {
        let key = key.into();
        if self.tx.send(PersistCommand::Write { key, op }).is_err() {
            warn!("Persister stopped, write dropped");
        }
    }

    /// Waits until every write queued before this call has been applied.
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();

        if self.tx.send(PersistCommand::Flush(done_tx)).is_err() {
            warn!("Persister stopped, nothing to flush");
            return;
        }

        // Sender dropped means the task died; nothing more will be written.
        let _ = done_rx.await;
    }
}

// =============================================================================
// Persister Task
// =============================================================================

/// Background task applying queued writes to a store.
pub struct Persister {
    store: Arc<dyn KeyValueStore>,
    rx: mpsc::UnboundedReceiver<PersistCommand>,
}

impl Persister {
    /// Creates a persister and its handle. Call [`Persister::run`] on a task.
    pub fn new(store: Arc<dyn KeyValueStore>) -> (Self, PersisterHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Persister { store, rx }, PersisterHandle { tx })
    }

    /// Creates a persister and spawns it on the current tokio runtime.
    pub fn spawn(store: Arc<dyn KeyValueStore>) -> PersisterHandle {
        let (persister, handle) = Self::new(store);
        tokio::spawn(persister.run());
        handle
    }

    /// Runs the persister loop.
    pub async fn run(mut self) {
        debug!("Persister starting");

        while let Some(first) = self.rx.recv().await {
            let mut batch = Batch::default();
            batch.absorb(first);

            while let Ok(next) = self.rx.try_recv() {
                batch.absorb(next);
            }

            self.apply(batch).await;
        }

        info!("Persister stopped");
    }

    async fn apply(&self, batch: Batch) {
        if batch.coalesced > 0 {
            debug!(skipped = batch.coalesced, "Coalesced superseded writes");
        }

        for (key, op) in batch.writes {
            let result = match &op {
                WriteOp::Set(value) => self.store.set(&key, value).await,
                WriteOp::Remove => self.store.remove(&key).await,
            };

            match result {
                Ok(()) => debug!(key = %key, removed = (op == WriteOp::Remove), "Record persisted"),
                Err(e) => error!(key = %key, error = %e, "Failed to persist record"),
            }
        }

        for done in batch.flushes {
            let _ = done.send(());
        }
    }
}

/// Commands drained in one wake-up.
#[derive(Default)]
struct Batch {
    /// One entry per key, in first-queued order, holding the latest op.
    writes: Vec<(String, WriteOp)>,
    flushes: Vec<oneshot::Sender<()>>,
    coalesced: usize,
}

impl Batch {
    fn absorb(&mut self, command: PersistCommand) {
        match command {
            PersistCommand::Write { key, op } => {
                match self.writes.iter_mut().find(|(k, _)| *k == key) {
                    Some(entry) => {
                        entry.1 = op;
                        self.coalesced += 1;
                    }
                    None => self.writes.push((key, op)),
                }
            }
            PersistCommand::Flush(done) => self.flushes.push(done),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_db::MemoryStore;

    #[tokio::test]
    async fn test_write_then_flush() {
        let store = Arc::new(MemoryStore::new());
        let handle = Persister::spawn(store.clone());

        handle.write("cart", WriteOp::Set("[1]".to_string()));
        handle.flush().await;

        assert_eq!(store.peek("cart").as_deref(), Some("[1]"));
    }

    #[tokio::test]
    async fn test_burst_is_coalesced() {
        let store = Arc::new(MemoryStore::new());
        let handle = Persister::spawn(store.clone());

        // Single-threaded test runtime: the task can't run until we await.
        for i in 0..5 {
            handle.write("cart", WriteOp::Set(format!("[{}]", i)));
        }
        handle.flush().await;

        assert_eq!(store.write_count(), 1);
        assert_eq!(store.peek("cart").as_deref(), Some("[4]"));
    }

    #[tokio::test]
    async fn test_remove_supersedes_set() {
        let store = Arc::new(MemoryStore::with_entries([("cart", "[0]")]));
        let handle = Persister::spawn(store.clone());

        handle.write("cart", WriteOp::Set("[1]".to_string()));
        handle.write("cart", WriteOp::Remove);
        handle.flush().await;

        assert_eq!(store.peek("cart"), None);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let store = Arc::new(MemoryStore::new());
        let handle = Persister::spawn(store.clone());

        handle.write("a", WriteOp::Set("1".to_string()));
        handle.write("b", WriteOp::Set("2".to_string()));
        handle.write("a", WriteOp::Set("3".to_string()));
        handle.flush().await;

        assert_eq!(store.peek("a").as_deref(), Some("3"));
        assert_eq!(store.peek("b").as_deref(), Some("2"));
        assert_eq!(store.write_count(), 2);
    }

    #[tokio::test]
    async fn test_failed_write_does_not_stop_the_task() {
        let store = Arc::new(MemoryStore::new());
        let handle = Persister::spawn(store.clone());

        store.set_fail_writes(true);
        handle.write("cart", WriteOp::Set("[1]".to_string()));
        handle.flush().await;
        assert_eq!(store.peek("cart"), None);

        store.set_fail_writes(false);
        handle.write("cart", WriteOp::Set("[2]".to_string()));
        handle.flush().await;
        assert_eq!(store.peek("cart").as_deref(), Some("[2]"));
    }

    #[tokio::test]
    async fn test_task_ends_when_handles_drop() {
        let store = Arc::new(MemoryStore::new());
        let (persister, handle) = Persister::new(store.clone());
        let task = tokio::spawn(persister.run());

        handle.write("cart", WriteOp::Set("[9]".to_string()));
        drop(handle);

        task.await.unwrap();
        assert_eq!(store.peek("cart").as_deref(), Some("[9]"));
    }
}
