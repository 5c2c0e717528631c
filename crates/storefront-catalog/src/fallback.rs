//! # Fallback Catalog
//!
//! The built-in product list shown when the catalog server can't be reached,
//! and the helper that picks between the two.

use serde::Serialize;
use storefront_core::{Money, Product};
use tracing::{info, warn};

use crate::client::CatalogClient;

/// Where a product list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    /// Fetched from the catalog server.
    Remote,
    /// Server failed; built-in list used instead.
    Fallback,
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::Remote => write!(f, "remote"),
            CatalogSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// A product list plus its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    pub source: CatalogSource,
}

impl CatalogSnapshot {
    /// Returns true if the built-in list is being shown.
    pub fn is_fallback(&self) -> bool {
        self.source == CatalogSource::Fallback
    }
}

/// Fetches the catalog, substituting [`fallback_products`] on any failure.
///
/// Never fails. The error is logged at warn level.
pub async fn fetch_or_fallback(client: &dyn CatalogClient) -> CatalogSnapshot {
    match client.get_products().await {
        Ok(products) => {
            info!(count = products.len(), "Loaded catalog from server");
            CatalogSnapshot {
                products,
                source: CatalogSource::Remote,
            }
        }
        Err(e) => {
            warn!(error = %e, "Catalog server unavailable, using built-in catalog");
            CatalogSnapshot {
                products: fallback_products(),
                source: CatalogSource::Fallback,
            }
        }
    }
}

const IMAGE_PARAMS: &str = "?w=400&h=400&fit=crop&crop=center";

fn unsplash(photo: &str) -> String {
    format!("https://images.unsplash.com/photo-{}{}", photo, IMAGE_PARAMS)
}

fn product(id: i64, name: &str, price: i64, description: &str, photo: &str) -> Product {
    Product {
        id,
        name: name.to_string(),
        price: Money::from_major_minor(price, 0),
        description: description.to_string(),
        image: unsplash(photo),
    }
}

/// The built-in demo catalog (8 products, ids 1 to 8).
pub fn fallback_products() -> Vec<Product> {
    vec![
        product(
            1,
            "iPhone 14 Pro",
            999,
            "Latest iPhone with advanced camera system and A16 Bionic chip",
            "1592286622406-0b3a6bce7c3b",
        ),
        product(
            2,
            "Samsung Galaxy S23",
            799,
            "Flagship Android phone with excellent display and camera",
            "1610945265064-0e34e5519bbf",
        ),
        product(
            3,
            "MacBook Air M2",
            1199,
            "Lightweight laptop with M2 chip and all-day battery life",
            "1541807084-5c52b6b3adef",
        ),
        product(
            4,
            "iPad Pro",
            799,
            "Powerful tablet with M1 chip and Liquid Retina display",
            "1544244015-0df4b3ffc6b0",
        ),
        product(
            5,
            "AirPods Pro",
            249,
            "Wireless earbuds with active noise cancellation",
            "1606220945770-b5b6c2c55bf1",
        ),
        product(
            6,
            "Apple Watch Series 8",
            399,
            "Advanced fitness tracking and health monitoring",
            "1434493789847-2f02dc6ca35d",
        ),
        product(
            7,
            "Sony WH-1000XM4",
            349,
            "Premium noise-canceling wireless headphones",
            "1505740420928-5e560c06d30e",
        ),
        product(
            8,
            "Nintendo Switch",
            299,
            "Hybrid gaming console for home and portable play",
            "1578662996442-48f60103fc96",
        ),
    ]
}
