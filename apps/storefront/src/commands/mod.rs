//! # Commands Module
//!
//! Everything the front end can ask for. Each command takes the
//! [`AppState`](crate::state::AppState) and returns a serializable response
//! or an [`ApiError`](crate::error::ApiError).
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── session.rs  ◄─── login, logout, whoami
//! ├── product.rs  ◄─── list/search, detail, create
//! └── cart.rs     ◄─── get, add, update, remove, clear
//! ```
//!
//! ## Access Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  login / logout / whoami      always allowed                           │
//! │  everything else              needs a signed-in user (AUTH_REQUIRED)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod product;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use storefront_catalog::{fallback_products, CatalogClient, CatalogError, CatalogResult};
    use storefront_core::{NewProduct, Product};
    use storefront_db::MemoryStore;

    use crate::state::{AppState, ConfigState, StaticCredentialValidator};

    /// Catalog held in memory; can be switched off to force the fallback.
    #[derive(Default)]
    pub struct FakeCatalog {
        pub products: Mutex<Vec<Product>>,
        pub offline: Mutex<bool>,
    }

    impl FakeCatalog {
        pub fn with_products(products: Vec<Product>) -> Self {
            FakeCatalog {
                products: Mutex::new(products),
                offline: Mutex::new(false),
            }
        }

        pub fn offline() -> Self {
            let catalog = Self::default();
            *catalog.offline.lock().unwrap() = true;
            catalog
        }

        fn check_online(&self) -> CatalogResult<()> {
            if *self.offline.lock().unwrap() {
                return Err(CatalogError::Status {
                    status: 503,
                    message: "offline".to_string(),
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl CatalogClient for FakeCatalog {
        async fn get_products(&self) -> CatalogResult<Vec<Product>> {
            self.check_online()?;
            Ok(self.products.lock().unwrap().clone())
        }

        async fn add_product(&self, product: NewProduct) -> CatalogResult<Product> {
            storefront_core::validation::validate_new_product(&product)?;
            self.check_online()?;
            let mut products = self.products.lock().unwrap();
            let created = product.into_product(100 + products.len() as i64);
            products.push(created.clone());
            Ok(created)
        }
    }

    pub fn state_with(store: Arc<MemoryStore>, catalog: FakeCatalog) -> AppState {
        AppState::new(
            ConfigState::default(),
            store,
            Arc::new(StaticCredentialValidator::default()),
            Arc::new(catalog),
        )
    }

    /// Signed-in state over the built-in catalog.
    pub async fn signed_in_state() -> (AppState, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let state = state_with(store.clone(), FakeCatalog::with_products(fallback_products()));
        assert!(state.session().login("test@test.com", "123456").await);
        (state, store)
    }
}
