//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │    Product      │   │   NewProduct    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id (server)    │   │  name           │       │
//! │  │  email          │   │  name           │   │  price          │       │
//! │  │  password       │   │  price (Money)  │   │  description    │       │
//! │  └─────────────────┘   │  description    │   │  image          │       │
//! │                        │  image (URL)    │   └─────────────────┘       │
//! │                        └─────────────────┘                              │
//! │                                                                         │
//! │  Product is owned by the catalog server and immutable once fetched.    │
//! │  NewProduct is the add-product form; the server assigns the id.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::money::{self, Money};

/// Identifier assigned to a product by the catalog server.
pub type ProductId = i64;

/// Identifier of a registered user.
pub type UserId = i64;

// =============================================================================
// User
// =============================================================================

/// The signed-in user, as persisted under the `user` key.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
///
/// ## Wire Format
/// ```json
/// { "id": 1, "name": "iPhone 14 Pro", "price": 999,
///   "description": "Latest iPhone ...", "image": "https://..." }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier assigned by the catalog server.
    pub id: ProductId,

    /// Display name, also what search matches against.
    pub name: String,

    /// Unit price, never negative.
    #[serde(with = "money::major_units")]
    pub price: Money,

    pub description: String,

    /// Image URL.
    pub image: String,
}

// =============================================================================
// New Product
// =============================================================================

/// Body of a create-product request.
///
/// Validate with [`crate::validation::validate_new_product`] before sending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(with = "money::major_units")]
    pub price: Money,
    pub description: String,
    pub image: String,
}

impl NewProduct {
    /// Builds a request with every text field trimmed, the way the form submits it.
    pub fn trimmed(
        name: &str,
        price: Money,
        description: &str,
        image: &str,
    ) -> Self {
        NewProduct {
            name: name.trim().to_string(),
            price,
            description: description.trim().to_string(),
            image: image.trim().to_string(),
        }
    }

    /// Attaches a server-assigned id.
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            description: self.description,
            image: self.image,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
