//! # State Module
//!
//! Explicitly owned application state, handed to every command.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  AppState                                                               │
//! │    │                                                                    │
//! │    ├── ConfigState      read-only after startup                         │
//! │    ├── SessionManager   Mutex<Option<User>>  ──► "user" (awaited)       │
//! │    ├── CartManager      Mutex<Cart>          ──► Persister ──► "cart"   │
//! │    └── CatalogClient    Arc<dyn ..>          ──► GET/POST /products     │
//! │                                                                         │
//! │  Session and cart share one KeyValueStore but no lock: each mutation   │
//! │  takes only its own mutex, and never across an await.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;
mod persist;
mod session;

use std::sync::Arc;

use storefront_catalog::CatalogClient;
use storefront_db::KeyValueStore;
use tracing::info;

pub use cart::CartManager;
pub use config::{ConfigState, ENV_DB_PATH, ENV_STORE_NAME};
pub use persist::{Persister, PersisterHandle, WriteOp};
pub use session::{CredentialValidator, SessionManager, StaticCredentialValidator};

/// Everything a command can touch.
pub struct AppState {
    config: ConfigState,
    session: SessionManager,
    cart: CartManager,
    catalog: Arc<dyn CatalogClient>,
}

impl AppState {
    /// Wires the managers to one store. Must be called inside a tokio runtime.
    pub fn new(
        config: ConfigState,
        store: Arc<dyn KeyValueStore>,
        validator: Arc<dyn CredentialValidator>,
        catalog: Arc<dyn CatalogClient>,
    ) -> Self {
        AppState {
            config,
            session: SessionManager::new(store.clone(), validator),
            cart: CartManager::new(store),
            catalog,
        }
    }

    /// Restores session and cart from the store.
    pub async fn restore(&self) {
        self.session.restore().await;
        self.cart.restore().await;
        info!(
            signed_in = self.session.is_authenticated(),
            cart_items = self.cart.total_items(),
            "State restored"
        );
    }

    /// Waits for pending cart writes. Call before exiting.
    pub async fn shutdown(&self) {
        self.cart.flush().await;
    }

    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn cart(&self) -> &CartManager {
        &self.cart
    }

    pub fn catalog(&self) -> &dyn CatalogClient {
        self.catalog.as_ref()
    }
}
