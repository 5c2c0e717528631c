//! # storefront-db: Local Persistence for the Storefront
//!
//! This crate provides the Persistent Key-Value Store: an asynchronous,
//! crash-durable mapping from string keys to string values, scoped to one
//! installation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Data Flow                             │
//! │                                                                         │
//! │  SessionManager::login / CartManager::add_to_cart                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  storefront-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │ KeyValueStore  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (store/)      │    │  (embedded)  │  │   │
//! │  │   │               │    │                │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ SqliteStore    │    │ 001_kv_store │  │   │
//! │  │   │               │    │ MemoryStore    │    │              │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  storefront.db  (kv_store table: key │ value (JSON) │ updated_at)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`store`] - The `KeyValueStore` trait, its implementations, JSON helpers
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_db::{load_json, save_json, Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("storefront.db")).await?;
//! let store = db.kv();
//!
//! save_json(&store, "user", &user).await?;
//! let user: Option<User> = load_json(&store, "user").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use store::memory::MemoryStore;
pub use store::sqlite::SqliteStore;
pub use store::{load_json, save_json, KeyValueStore};
