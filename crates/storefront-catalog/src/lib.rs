//! # storefront-catalog: Remote Product Catalog
//!
//! HTTP access to the catalog server plus the static catalog shown when the
//! server can't be reached.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Product List Request                               │
//! │                                                                         │
//! │  fetch_or_fallback(&client)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  client.get_products() ──► GET {base_url}/products                     │
//! │       │                                                                 │
//! │       ├── 2xx + JSON array ──► CatalogSnapshot { source: Remote }      │
//! │       │                                                                 │
//! │       └── transport error / non-2xx / bad JSON                         │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │            warn!(...) ──► CatalogSnapshot { source: Fallback }         │
//! │                           (8 built-in products)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `add_product` has no fallback: its errors go straight back to the caller.
//!
//! ## Module Organization
//!
//! - [`client`] - `CatalogClient` trait and the reqwest implementation
//! - [`config`] - API base URL and timeout (TOML file + environment)
//! - [`fallback`] - Built-in catalog and `fetch_or_fallback`
//! - [`error`] - Catalog error types

pub mod client;
pub mod config;
pub mod error;
pub mod fallback;

pub use client::{CatalogClient, HttpCatalogClient};
pub use config::{ApiSettings, CatalogConfig};
pub use error::{CatalogError, CatalogResult};
pub use fallback::{fallback_products, fetch_or_fallback, CatalogSnapshot, CatalogSource};
