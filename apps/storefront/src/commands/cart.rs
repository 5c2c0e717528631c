//! # Cart Commands
//!
//! Cart screen, product-detail "Add to Cart" button and the quantity stepper.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐  add_to_cart   ┌──────────┐                               │
//! │  │  Empty   │───────────────►│ In Cart  │◄──┐ add_to_cart               │
//! │  │  Cart    │                │          │───┘ update_cart_item (> 0)    │
//! │  └──────────┘                └──────────┘                               │
//! │       ▲                           │                                     │
//! │       │   clear_cart / logout     │                                     │
//! │       │   last line removed       │                                     │
//! │       │   update_cart_item (<= 0) │                                     │
//! │       └───────────────────────────┘                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command returns the whole cart afterwards, like the screen shows it.

use serde::Serialize;
use storefront_core::{money, Cart, CartLine, Money, ProductId};
use tracing::debug;

use super::product::load_product;
use super::session::require_user;
use crate::error::ApiResult;
use crate::state::AppState;

/// One cart row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineResponse {
    pub product_id: ProductId,
    pub name: String,
    #[serde(with = "money::major_units")]
    pub unit_price: Money,
    pub quantity: u32,
    #[serde(with = "money::major_units")]
    pub line_total: Money,
}

impl From<&CartLine> for CartLineResponse {
    fn from(line: &CartLine) -> Self {
        CartLineResponse {
            product_id: line.product_id(),
            name: line.product.name.clone(),
            unit_price: line.product.price,
            quantity: line.quantity,
            line_total: line.line_total(),
        }
    }
}

/// Cart response including lines and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLineResponse>,
    pub total_items: u64,
    #[serde(with = "money::major_units")]
    pub total_price: Money,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            lines: cart.lines().iter().map(CartLineResponse::from).collect(),
            total_items: cart.total_items(),
            total_price: cart.total_price(),
        }
    }
}

fn snapshot(state: &AppState) -> CartResponse {
    state.cart().with_cart(|c| CartResponse::from(c))
}

/// Gets the current cart contents.
pub fn get_cart(state: &AppState) -> ApiResult<CartResponse> {
    require_user(state)?;
    debug!("get_cart command");
    Ok(snapshot(state))
}

/// Adds one unit of a catalog product.
///
/// The product is looked up in the current catalog so the line carries the
/// price shown on the detail screen.
pub async fn add_to_cart(state: &AppState, product_id: ProductId) -> ApiResult<CartResponse> {
    require_user(state)?;
    debug!(product_id, "add_to_cart command");

    let product = load_product(state, product_id).await?;
    state.cart().add_to_cart(&product);

    Ok(snapshot(state))
}

/// Sets a line's quantity; zero or less removes the line.
///
/// A product that is not in the cart is left out and the cart comes back
/// unchanged.
pub fn update_cart_item(
    state: &AppState,
    product_id: ProductId,
    quantity: i64,
) -> ApiResult<CartResponse> {
    require_user(state)?;
    debug!(product_id, quantity, "update_cart_item command");

    state.cart().update_quantity(product_id, quantity);
    Ok(snapshot(state))
}

/// Removes a line. Removing a product that is not in the cart changes nothing.
pub fn remove_from_cart(state: &AppState, product_id: ProductId) -> ApiResult<CartResponse> {
    require_user(state)?;
    debug!(product_id, "remove_from_cart command");

    state.cart().remove_from_cart(product_id);
    Ok(snapshot(state))
}

/// Empties the cart.
pub fn clear_cart(state: &AppState) -> ApiResult<CartResponse> {
    require_user(state)?;
    debug!("clear_cart command");

    state.cart().clear_cart();
    Ok(snapshot(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{signed_in_state, state_with, FakeCatalog};
    use crate::error::ErrorCode;
    use std::sync::Arc;
    use storefront_core::CART_STORAGE_KEY;
    use storefront_db::MemoryStore;

    #[tokio::test]
    async fn test_cart_requires_sign_in() {
        let state = state_with(Arc::new(MemoryStore::new()), FakeCatalog::default());
        assert_eq!(get_cart(&state).unwrap_err().code, ErrorCode::AuthRequired);
        assert_eq!(
            add_to_cart(&state, 1).await.unwrap_err().code,
            ErrorCode::AuthRequired
        );
        assert_eq!(clear_cart(&state).unwrap_err().code, ErrorCode::AuthRequired);
    }

    #[tokio::test]
    async fn test_add_and_totals() {
        let (state, _) = signed_in_state().await;

        add_to_cart(&state, 1).await.unwrap();
        add_to_cart(&state, 1).await.unwrap();
        let cart = add_to_cart(&state, 2).await.unwrap();

        assert_eq!(cart.lines.len(), 2);
        assert_eq!(cart.lines[0].product_id, 1);
        assert_eq!(cart.lines[0].quantity, 2);
        assert_eq!(cart.lines[0].line_total, Money::from_cents(199_800));
        assert_eq!(cart.total_items, 3);
        assert_eq!(cart.total_price, Money::from_cents(279_700));
    }

    #[tokio::test]
    async fn test_add_unknown_product() {
        let (state, _) = signed_in_state().await;
        let err = add_to_cart(&state, 404).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(get_cart(&state).unwrap().lines.is_empty());
    }

    #[tokio::test]
    async fn test_update_quantity() {
        let (state, _) = signed_in_state().await;
        add_to_cart(&state, 3).await.unwrap();

        let cart = update_cart_item(&state, 3, 5).unwrap();
        assert_eq!(cart.total_items, 5);

        let cart = update_cart_item(&state, 3, 0).unwrap();
        assert!(cart.lines.is_empty());

        // Not in the cart any more: nothing to update, nothing added.
        assert!(update_cart_item(&state, 3, 2).unwrap().lines.is_empty());
        assert!(update_cart_item(&state, 3, -1).unwrap().lines.is_empty());
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let (state, store) = signed_in_state().await;
        add_to_cart(&state, 1).await.unwrap();
        add_to_cart(&state, 2).await.unwrap();

        let cart = remove_from_cart(&state, 1).unwrap();
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(remove_from_cart(&state, 1).unwrap(), cart);

        state.shutdown().await;
        assert!(store.peek(CART_STORAGE_KEY).is_some());

        let cart = clear_cart(&state).unwrap();
        assert_eq!(cart.total_price, Money::zero());
        state.shutdown().await;
        assert!(store.peek(CART_STORAGE_KEY).is_none());
    }

    #[tokio::test]
    async fn test_cart_response_wire_format() {
        let (state, _) = signed_in_state().await;
        let cart = add_to_cart(&state, 2).await.unwrap();

        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(json["totalItems"], 1);
        assert_eq!(json["totalPrice"], 799.0);
        assert_eq!(json["lines"][0]["name"], "Samsung Galaxy S23");
        assert_eq!(json["lines"][0]["unitPrice"], 799.0);
    }
}
