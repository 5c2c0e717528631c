//! # storefront-core: Pure Business Logic for the Storefront
//!
//! This crate is the **heart** of the storefront. It holds the domain types,
//! the cart rules and the form validation as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Presentation (screens / CLI commands)              │   │
//! │  │    Login ──► Product list ──► Product detail ──► Cart           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          SessionManager / CartManager (apps/storefront)         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │   forms   │  │   │
//! │  │   │   User    │  │  (cents)  │  │ CartLine  │  │   email   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, Product, NewProduct)
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - The cart and its lines
//! - [`catalog`] - Filtering and lookup over a product list
//! - [`error`] - Domain error types
//! - [`validation`] - Form validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{Cart, Money, Product};
//!
//! let phone = Product {
//!     id: 1,
//!     name: "iPhone 14 Pro".to_string(),
//!     price: Money::from_major_minor(999, 0),
//!     description: "Latest iPhone".to_string(),
//!     image: "https://example.com/iphone.jpg".to_string(),
//! };
//!
//! let mut cart = Cart::new();
//! cart.add(&phone);
//! cart.add(&phone);
//!
//! assert_eq!(cart.total_items(), 2);
//! assert_eq!(cart.total_price(), Money::from_major_minor(1998, 0));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine};
pub use error::{CoreError, CoreResult, ValidationError, ValidationErrors};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Key under which the signed-in user record is persisted.
pub const USER_STORAGE_KEY: &str = "user";

/// Key under which the cart lines are persisted.
pub const CART_STORAGE_KEY: &str = "cart";
