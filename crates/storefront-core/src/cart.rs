//! # Cart
//!
//! The shopping cart as a pure value: an ordered list of lines, one per product.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Operations                                  │
//! │                                                                         │
//! │  add(P1)            [ ]                 ──► [P1×1]                      │
//! │  add(P1)            [P1×1]              ──► [P1×2]        (in place)    │
//! │  add(P2)            [P1×2]              ──► [P1×2, P2×1]  (appended)    │
//! │  update(P1, 5)      [P1×2, P2×1]        ──► [P1×5, P2×1]  (in place)    │
//! │  update(P1, 0)      [P1×5, P2×1]        ──► [P2×1]        (= remove)    │
//! │  update(P9, 3)      [P2×1]              ──► [P2×1]        (no-op)       │
//! │  remove(P9)         [P2×1]              ──► [P2×1]        (no-op)       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per product id
//! - Every line has quantity >= 1
//! - Line order is the order in which products were first added
//!
//! The serialized form is a bare JSON array of `{product, quantity}` lines.
//! Deserializing goes through [`Cart::from_lines`], so a hand-edited or
//! stale record cannot break the invariants.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{Product, ProductId};

// =============================================================================
// Cart Line
// =============================================================================

/// One product-and-quantity entry in the cart.
///
/// The product is a snapshot taken when it was first added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Creates a line with quantity 1.
    pub fn new(product: Product) -> Self {
        CartLine {
            product,
            quantity: 1,
        }
    }

    /// Returns the product id of this line.
    #[inline]
    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Calculates the line total (unit price × quantity), saturating at the `i64` bound.
    pub fn line_total(&self) -> Money {
        self.product
            .price
            .multiply_quantity(i64::from(self.quantity))
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Serialize for Cart {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.lines.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Vec::<CartLine>::deserialize(deserializer).map(Cart::from_lines)
    }
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Builds a cart from raw lines, restoring the invariants.
    ///
    /// - Lines with quantity 0 are dropped
    /// - Repeated product ids are merged into the first occurrence,
    ///   quantities summed
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Cart::new();

        for line in lines {
            if line.quantity == 0 {
                continue;
            }
            match cart.position(line.product_id()) {
                Some(idx) => {
                    let existing = &mut cart.lines[idx];
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => cart.lines.push(line),
            }
        }

        cart
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.lines.iter().position(|l| l.product_id() == product_id)
    }

    /// Adds one unit of a product.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity + 1, position unchanged
    /// - Product not in cart: appended with quantity 1
    ///
    /// ## Returns
    /// The new quantity of that product.
    pub fn add(&mut self, product: &Product) -> u32 {
        if let Some(idx) = self.position(product.id) {
            let line = &mut self.lines[idx];
            line.quantity = line.quantity.saturating_add(1);
            return line.quantity;
        }

        self.lines.push(CartLine::new(product.clone()));
        1
    }

    /// Removes the line for a product.
    ///
    /// ## Returns
    /// `true` if a line was removed, `false` if the product was not in the cart.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.product_id() != product_id);
        self.lines.len() != initial_len
    }

    /// Sets the quantity of a product already in the cart.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: same as [`Cart::remove`]
    /// - Product in cart: quantity overwritten, position unchanged
    /// - Product not in cart: nothing happens
    ///
    /// Quantities above `u32::MAX` are clamped.
    ///
    /// ## Returns
    /// `true` if the cart changed.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(product_id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        match self.position(product_id) {
            Some(idx) => {
                let line = &mut self.lines[idx];
                let changed = line.quantity != quantity;
                line.quantity = quantity;
                changed
            }
            None => false,
        }
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Returns the lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Returns the line for a product, if present.
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id() == product_id)
    }

    /// Returns the quantity of a product in the cart (0 if absent).
    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.line(product_id).map_or(0, |l| l.quantity)
    }

    /// Returns the number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the sum of all quantities (0 for an empty cart).
    pub fn total_items(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Returns the sum of `price × quantity` over all lines (0 for an empty cart).
    ///
    /// Saturates rather than overflowing for absurd prices or quantities.
    pub fn total_price(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: ProductId, price_cents: i64) -> Product {
        Product {
            id,
            name: format!("Product {}", id),
            price: Money::from_cents(price_cents),
            description: format!("Description of product {}", id),
            image: format!("https://example.com/{}.jpg", id),
        }
    }

    #[test]
    fn test_add_scenario_p1_p1_p2() {
        let p1 = test_product(1, 99_900);
        let p2 = test_product(2, 79_900);
        let mut cart = Cart::new();

        assert_eq!(cart.add(&p1), 1);
        assert_eq!(cart.add(&p1), 2);
        assert_eq!(cart.add(&p2), 1);

        assert_eq!(
            cart.lines(),
            &[
                CartLine { product: p1.clone(), quantity: 2 },
                CartLine { product: p2.clone(), quantity: 1 },
            ]
        );
        assert_eq!(cart.total_items(), 3);
        assert_eq!(
            cart.total_price(),
            p1.price.multiply_quantity(2) + p2.price
        );
    }

    #[test]
    fn test_add_count_matches_total_items() {
        let products: Vec<Product> = (1..=4).map(|id| test_product(id, 100 * id)).collect();
        let calls = [0usize, 2, 1, 0, 3, 0, 2, 2, 1, 0];
        let mut cart = Cart::new();

        for &i in &calls {
            cart.add(&products[i]);
        }

        assert_eq!(cart.total_items(), calls.len() as u64);
        assert_eq!(cart.len(), 4);
        for (i, product) in products.iter().enumerate() {
            let expected = calls.iter().filter(|&&c| c == i).count() as u32;
            assert_eq!(cart.quantity_of(product.id), expected);
        }
        // first-add order: 0, 2, 1, 3
        let order: Vec<ProductId> = cart.lines().iter().map(CartLine::product_id).collect();
        assert_eq!(order, vec![1, 3, 2, 4]);
    }

    #[test]
    fn test_update_to_zero_equals_remove() {
        let mut base = Cart::new();
        base.add(&test_product(1, 500));
        base.add(&test_product(2, 700));
        base.add(&test_product(2, 700));

        for id in [1, 2, 99] {
            let mut via_update = base.clone();
            let mut via_remove = base.clone();
            let changed_update = via_update.update_quantity(id, 0);
            let changed_remove = via_remove.remove(id);
            assert_eq!(via_update, via_remove);
            assert_eq!(changed_update, changed_remove);

            let mut via_negative = base.clone();
            via_negative.update_quantity(id, -3);
            assert_eq!(via_negative, via_remove);
        }
    }

    #[test]
    fn test_update_quantity_in_place() {
        let mut cart = Cart::new();
        cart.add(&test_product(1, 500));
        cart.add(&test_product(2, 700));

        assert!(cart.update_quantity(1, 5));
        assert_eq!(cart.lines()[0].quantity, 5);
        assert_eq!(cart.lines()[0].product_id(), 1);
        assert!(!cart.update_quantity(1, 5));
    }

    #[test]
    fn test_update_quantity_unknown_product_is_noop() {
        let mut cart = Cart::new();
        cart.add(&test_product(1, 500));
        let before = cart.clone();

        assert!(!cart.update_quantity(42, 3));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        assert!(!cart.remove(7));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_empty_cart_totals_are_zero() {
        let cart = Cart::new();
        assert_eq!(cart.total_items(), 0);
        assert!(cart.total_price().is_zero());
    }

    #[test]
    fn test_total_price_is_exact_for_decimal_prices() {
        let mut cart = Cart::new();
        let cheap = test_product(1, 10); // 0.10
        let other = test_product(2, 20); // 0.20
        cart.add(&cheap);
        cart.add(&other);
        assert_eq!(cart.total_price(), Money::from_cents(30));
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&test_product(1, 999));
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_serialized_form_is_array_of_lines() {
        let mut cart = Cart::new();
        cart.add(&test_product(1, 99_900));
        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["quantity"], 1);
        assert_eq!(json[0]["product"]["id"], 1);

        let back: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(back, cart);
    }

    #[test]
    fn test_deserialize_repairs_invariants() {
        let p1 = test_product(1, 100);
        let p2 = test_product(2, 200);
        let raw = vec![
            CartLine { product: p1.clone(), quantity: 2 },
            CartLine { product: p2.clone(), quantity: 0 },
            CartLine { product: p1.clone(), quantity: 3 },
        ];
        let json = serde_json::to_string(&raw).unwrap();

        let cart: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(cart.lines(), &[CartLine { product: p1, quantity: 5 }]);
    }

    // =========================================================================
    // Quantity and price bounds
    // =========================================================================

    #[test]
    fn test_update_quantity_clamps_to_u32_max() {
        let mut cart = Cart::new();
        cart.add(&test_product(1, 100));

        assert!(cart.update_quantity(1, i64::from(u32::MAX) + 10));
        assert_eq!(cart.quantity_of(1), u32::MAX);
        assert_eq!(cart.total_items(), u64::from(u32::MAX));

        // Same clamped value again: no change.
        assert!(!cart.update_quantity(1, i64::MAX));
    }

    #[test]
    fn test_add_at_max_quantity_stays_at_max() {
        let p = test_product(1, 100);
        let mut cart = Cart::new();
        cart.add(&p);
        cart.update_quantity(1, i64::from(u32::MAX));

        assert_eq!(cart.add(&p), u32::MAX);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_items(), u64::from(u32::MAX));
    }

    #[test]
    fn test_restored_lines_merge_up_to_max() {
        let p = test_product(1, 100);
        let cart = Cart::from_lines(vec![
            CartLine { product: p.clone(), quantity: u32::MAX },
            CartLine { product: p, quantity: 7 },
        ]);

        assert_eq!(cart.quantity_of(1), u32::MAX);
    }

    #[test]
    fn test_total_price_exact_for_large_lines() {
        let mut cart = Cart::new();
        cart.add(&test_product(1, 10_000_000_000));
        cart.add(&test_product(2, 5));
        cart.update_quantity(1, 100_000_000);

        assert_eq!(
            cart.line(1).unwrap().line_total(),
            Money::from_cents(1_000_000_000_000_000_000)
        );
        assert_eq!(cart.total_price(), Money::from_cents(1_000_000_000_000_000_005));
    }

    #[test]
    fn test_total_price_saturates_instead_of_overflowing() {
        let expensive: Product = serde_json::from_str(
            r#"{"id": 1, "name": "Yacht", "price": 100000000,
                "description": "Very large boat", "image": "https://example.com/y.jpg"}"#,
        )
        .unwrap();
        let mut cart = Cart::new();
        cart.add(&expensive);
        cart.add(&test_product(2, 500));
        cart.update_quantity(1, i64::from(u32::MAX));

        let max = Money::from_cents(i64::MAX);
        assert_eq!(cart.line(1).unwrap().line_total(), max);
        assert_eq!(cart.total_price(), max);
    }
}
