//! # Storefront App Library
//!
//! Session and cart client for the storefront catalog, with a one-shot
//! command line on top.
//!
//! ## Module Organization
//! ```text
//! storefront_app/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── clap definitions, dispatch, text/JSON rendering
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState
//! │   ├── session.rs  ◄─── SessionManager, CredentialValidator
//! │   ├── cart.rs     ◄─── CartManager
//! │   ├── persist.rs  ◄─── write-behind Persister task
//! │   └── config.rs   ◄─── ConfigState
//! ├── commands/
//! │   ├── session.rs  ◄─── login, logout, whoami
//! │   ├── product.rs  ◄─── list/search, detail, create
//! │   └── cart.rs     ◄─── cart manipulation
//! └── error.rs        ◄─── ApiError for the command surface
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use std::sync::Arc;

use storefront_catalog::{CatalogConfig, HttpCatalogClient};
use storefront_db::{Database, DbConfig, KeyValueStore, MemoryStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use error::ApiResult;
use state::{AppState, ConfigState, StaticCredentialValidator};

/// Runs one CLI invocation and returns the rendered output.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. ConfigState ◄── STOREFRONT_* env, --db                              │
/// │  2. Store ◄──────── SQLite (WAL, migrations) or MemoryStore (--ephemeral)│
/// │  3. Catalog ◄────── catalog.toml, STOREFRONT_API_*, --api-url           │
/// │  4. AppState::restore ◄── "user" and "cart" records                     │
/// │  5. Execute command                                                     │
/// │  6. Flush pending cart writes, close the pool                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// The store is flushed and closed even when the command fails.
pub async fn run(cli: Cli) -> ApiResult<String> {
    let mut config = ConfigState::from_env();
    if let Some(path) = &cli.db {
        config.database_path = Some(path.clone());
    }

    let (store, db): (Arc<dyn KeyValueStore>, Option<Database>) = if cli.ephemeral {
        info!("Using in-memory store");
        (Arc::new(MemoryStore::new()), None)
    } else {
        let db_path = config.resolve_database_path()?;
        info!(?db_path, "Database path determined");
        let db = Database::new(DbConfig::new(db_path)).await?;
        (Arc::new(db.kv()), Some(db))
    };

    let mut catalog_config = CatalogConfig::load_or_default(cli.config.clone());
    if let Some(url) = &cli.api_url {
        catalog_config.api.base_url = url.clone();
    }
    let catalog = HttpCatalogClient::new(&catalog_config)?;

    let state = AppState::new(
        config,
        store,
        Arc::new(StaticCredentialValidator::default()),
        Arc::new(catalog),
    );
    state.restore().await;

    let result = cli::execute(&state, cli.command).await;

    state.shutdown().await;
    if let Some(db) = db {
        db.close().await;
    }

    cli::render(&result?, state.config(), cli.json)
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - ERROR: failures that lose data (e.g. a cart write that never landed)
/// - WARN: recoverable issues (catalog fallback, unreadable records)
/// - INFO: startup, sign-in, restored state
/// - DEBUG: one line per command and cart mutation
///
/// Set `RUST_LOG` to override. Logs go to stderr so stdout stays parseable.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
