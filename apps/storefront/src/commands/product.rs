//! # Product Commands
//!
//! Product list, search, detail and the add-product form.
//!
//! ## List Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product List Flow                                    │
//! │                                                                         │
//! │  list_products(query)                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_search_query (trim, max 100 chars)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  fetch_or_fallback ── GET /products fails ──► built-in 8 products      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  filter_by_name (case-insensitive substring, catalog order)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductListResponse { source: "remote" | "fallback", products }       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Creating a product never falls back: a failed POST is a `CATALOG_ERROR`.

use serde::Serialize;
use storefront_catalog::{fetch_or_fallback, CatalogSource};
use storefront_core::catalog::{filter_by_name, find_by_id};
use storefront_core::validation::validate_search_query;
use storefront_core::{CoreError, Money, NewProduct, Product, ProductId};
use tracing::{debug, info};

use super::session::require_user;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Product list as shown on the home screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub source: CatalogSource,
    pub query: String,
    pub products: Vec<Product>,
}

/// Product detail screen: the product plus how many are already in the cart.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailResponse {
    pub product: Product,
    pub in_cart: u32,
}

/// Lists the catalog, optionally filtered by name.
pub async fn list_products(state: &AppState, query: Option<&str>) -> ApiResult<ProductListResponse> {
    require_user(state)?;
    let query = validate_search_query(query.unwrap_or_default())?;
    debug!(query = %query, "list_products command");

    let snapshot = fetch_or_fallback(state.catalog()).await;
    let products = filter_by_name(&snapshot.products, &query)
        .into_iter()
        .cloned()
        .collect();

    Ok(ProductListResponse {
        source: snapshot.source,
        query,
        products,
    })
}

/// Product detail by id.
pub async fn get_product(state: &AppState, product_id: ProductId) -> ApiResult<ProductDetailResponse> {
    require_user(state)?;
    debug!(product_id, "get_product command");

    let product = load_product(state, product_id).await?;
    let in_cart = state.cart().quantity_of(product_id);

    Ok(ProductDetailResponse { product, in_cart })
}

/// Submits the add-product form.
///
/// `price` is in major units as typed; text fields are trimmed.
pub async fn create_product(
    state: &AppState,
    name: &str,
    price: f64,
    description: &str,
    image: &str,
) -> ApiResult<Product> {
    require_user(state)?;

    let price = Money::from_major_units(price)
        .ok_or_else(|| ApiError::validation("Price must be a valid number"))?;
    let request = NewProduct::trimmed(name, price, description, image);
    debug!(name = %request.name, "create_product command");

    let product = state.catalog().add_product(request).await?;
    info!(product_id = product.id, name = %product.name, "Product created");

    Ok(product)
}

/// Looks a product up in the current catalog (remote or fallback).
pub(crate) async fn load_product(state: &AppState, product_id: ProductId) -> ApiResult<Product> {
    let snapshot = fetch_or_fallback(state.catalog()).await;
    let product = find_by_id(&snapshot.products, product_id)
        .cloned()
        .ok_or(CoreError::ProductNotFound(product_id))?;
    Ok(product)
}
