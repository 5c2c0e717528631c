//! # Catalog Helpers
//!
//! Search and lookup over an already-loaded product list.
//!
//! The list itself comes from the catalog client (or its fallback); these
//! functions only look at what they are given.

use crate::types::{Product, ProductId};

/// Filters products by name.
///
/// ## Rules
/// - Empty or whitespace-only query: every product
/// - Otherwise: case-insensitive substring match on `name`
/// - Catalog order is preserved
///
/// ## Example
/// ```rust,ignore
/// let phones = filter_by_name(&catalog, "PHONE");
/// ```
pub fn filter_by_name<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = query.trim().to_lowercase();

    if needle.is_empty() {
        return products.iter().collect();
    }

    products
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .collect()
}

/// Finds a product by id.
pub fn find_by_id(products: &[Product], id: ProductId) -> Option<&Product> {
    products.iter().find(|p| p.id == id)
}
