//! # Cart State
//!
//! Owns the shopping cart and keeps the saved copy in step with it.
//!
//! ## Thread Safety
//! The cart sits behind a `Mutex` because:
//! 1. Multiple commands may access/modify the cart
//! 2. Each mutation must be atomic with respect to every other operation
//! 3. The lock is never held across `.await`
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Operation               Cart change               Queued write         │
//! │  ─────────               ───────────               ────────────         │
//! │                                                                         │
//! │  add_to_cart(p) ───────► qty + 1 / append ───────► Set(cart, [...])    │
//! │                                                                         │
//! │  update_quantity(id,n) ► qty = n (n > 0) ────────► Set(cart, [...])    │
//! │                          remove (n <= 0)                                │
//! │                                                                         │
//! │  remove_from_cart(id) ─► line removed ───────────► Set / Remove(cart)  │
//! │                                                                         │
//! │  clear_cart() ─────────► lines cleared ──────────► Remove(cart)        │
//! │                                                                         │
//! │  no-op (absent id) ────► nothing ────────────────► nothing             │
//! │                                                                         │
//! │  NOTE: a mutation that leaves the cart empty queues Remove, so the     │
//! │        "cart" record exists only while the cart has lines.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Writes go through the [`Persister`](super::persist::Persister); callers
//! never wait for storage.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use storefront_core::{Cart, CartLine, Money, Product, ProductId, CART_STORAGE_KEY};
use storefront_db::{load_json, KeyValueStore};
use tracing::{debug, error, info, warn};

use super::persist::{Persister, PersisterHandle, WriteOp};

/// Owns the cart.
#[derive(Debug)]
pub struct CartManager {
    cart: Mutex<Cart>,
    store: Arc<dyn KeyValueStore>,
    persister: PersisterHandle,
}

impl CartManager {
    /// Creates an empty cart and spawns its persister.
    ///
    /// Must be called inside a tokio runtime.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let persister = Persister::spawn(store.clone());
        CartManager {
            cart: Mutex::new(Cart::new()),
            store,
            persister,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Cart> {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Executes a function with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        f(&self.lock())
    }

    /// Applies a mutation and, if it changed anything, queues the snapshot.
    ///
    /// The write is queued before the lock is released so queued snapshots
    /// follow mutation order.
    fn mutate<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut Cart) -> bool,
    {
        let mut cart = self.lock();
        let changed = f(&mut cart);
        if changed {
            self.queue_snapshot(&cart);
        }
        changed
    }

    fn queue_snapshot(&self, cart: &Cart) {
        if cart.is_empty() {
            self.persister.write(CART_STORAGE_KEY, WriteOp::Remove);
            return;
        }

        match serde_json::to_string(cart) {
            Ok(json) => self.persister.write(CART_STORAGE_KEY, WriteOp::Set(json)),
            Err(e) => error!(error = %e, "Failed to serialize cart, not saved"),
        }
    }

    /// Loads the saved cart, replacing the current one.
    ///
    /// Missing, malformed or unreadable records give an empty cart.
    pub async fn restore(&self) {
        let restored = match load_json::<Cart>(self.store.as_ref(), CART_STORAGE_KEY).await {
            Ok(Some(cart)) => {
                info!(
                    lines = cart.len(),
                    items = cart.total_items(),
                    "Cart restored"
                );
                cart
            }
            Ok(None) => {
                debug!("No saved cart");
                Cart::new()
            }
            Err(e) => {
                warn!(error = %e, "Could not restore cart, starting empty");
                Cart::new()
            }
        };

        *self.lock() = restored;
    }

    /// Adds one unit of a product.
    ///
    /// ## Returns
    /// The product's new quantity in the cart.
    pub fn add_to_cart(&self, product: &Product) -> u32 {
        let mut quantity = 0;
        self.mutate(|cart| {
            quantity = cart.add(product);
            true
        });
        debug!(product_id = product.id, quantity, "Added to cart");
        quantity
    }

    /// Removes a product's line.
    ///
    /// ## Returns
    /// `false` if the product was not in the cart (nothing happens).
    pub fn remove_from_cart(&self, product_id: ProductId) -> bool {
        let removed = self.mutate(|cart| cart.remove(product_id));
        debug!(product_id, removed, "Remove from cart");
        removed
    }

    /// Sets a product's quantity. `quantity <= 0` removes the line.
    ///
    /// A product that is not in the cart is left out; this is a no-op.
    ///
    /// ## Returns
    /// `true` if the cart changed.
    pub fn update_quantity(&self, product_id: ProductId, quantity: i64) -> bool {
        let changed = self.mutate(|cart| cart.update_quantity(product_id, quantity));
        if !changed && quantity > 0 && self.quantity_of(product_id) == 0 {
            debug!(product_id, "Quantity update for product not in cart ignored");
        }
        changed
    }

    /// Empties the cart and deletes the saved copy.
    pub fn clear_cart(&self) {
        let mut cart = self.lock();
        cart.clear();
        self.persister.write(CART_STORAGE_KEY, WriteOp::Remove);
        info!("Cart cleared");
    }

    /// Σ price × quantity.
    pub fn total_price(&self) -> Money {
        self.with_cart(Cart::total_price)
    }

    /// Σ quantity.
    pub fn total_items(&self) -> u64 {
        self.with_cart(Cart::total_items)
    }

    /// Copy of the lines in insertion order.
    pub fn lines(&self) -> Vec<CartLine> {
        self.with_cart(|cart| cart.lines().to_vec())
    }

    /// Copy of one product's line.
    pub fn line(&self, product_id: ProductId) -> Option<CartLine> {
        self.with_cart(|cart| cart.line(product_id).cloned())
    }

    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.with_cart(|cart| cart.quantity_of(product_id))
    }

    pub fn is_empty(&self) -> bool {
        self.with_cart(Cart::is_empty)
    }

    /// Waits until every write queued so far has reached the store.
    pub async fn flush(&self) {
        self.persister.flush().await;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_db::MemoryStore;

    fn product(id: ProductId, price_cents: i64) -> Product {
        Product {
            id,
            name: format!("Product {}", id),
            price: Money::from_cents(price_cents),
            description: format!("Description of product {}", id),
            image: format!("https://example.com/{}.jpg", id),
        }
    }

    fn saved_cart(store: &MemoryStore) -> Option<Cart> {
        store
            .peek(CART_STORAGE_KEY)
            .map(|json| serde_json::from_str(&json).unwrap())
    }

    #[tokio::test]
    async fn test_add_scenario_persists() {
        let store = Arc::new(MemoryStore::new());
        let cart = CartManager::new(store.clone());
        let p1 = product(1, 99_900);
        let p2 = product(2, 79_900);

        assert_eq!(cart.add_to_cart(&p1), 1);
        assert_eq!(cart.add_to_cart(&p1), 2);
        assert_eq!(cart.add_to_cart(&p2), 1);

        let lines = cart.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!((lines[0].product_id(), lines[0].quantity), (1, 2));
        assert_eq!((lines[1].product_id(), lines[1].quantity), (2, 1));
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), Money::from_cents(2 * 99_900 + 79_900));

        cart.flush().await;
        let saved = saved_cart(&store).unwrap();
        assert_eq!(saved.lines(), lines.as_slice());
    }

    #[tokio::test]
    async fn test_restore_round_trip() {
        let store = Arc::new(MemoryStore::new());
        let cart = CartManager::new(store.clone());
        cart.add_to_cart(&product(3, 500));
        cart.add_to_cart(&product(1, 250));
        cart.update_quantity(3, 4);
        cart.flush().await;

        let restarted = CartManager::new(store.clone());
        restarted.restore().await;
        assert_eq!(restarted.lines(), cart.lines());
        assert_eq!(restarted.total_price(), Money::from_cents(4 * 500 + 250));
    }

    #[tokio::test]
    async fn test_restore_bad_record_gives_empty_cart() {
        let store = Arc::new(MemoryStore::with_entries([(CART_STORAGE_KEY, "{}")]));
        let cart = CartManager::new(store.clone());
        cart.restore().await;
        assert!(cart.is_empty());

        store.set_fail_reads(true);
        cart.restore().await;
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_update_to_zero_equals_remove() {
        let store = Arc::new(MemoryStore::new());
        let a = CartManager::new(store.clone());
        let b = CartManager::new(Arc::new(MemoryStore::new()));
        for cart in [&a, &b] {
            cart.add_to_cart(&product(1, 100));
            cart.add_to_cart(&product(2, 200));
        }

        assert!(a.update_quantity(1, 0));
        assert!(b.remove_from_cart(1));
        assert_eq!(a.lines(), b.lines());

        assert!(!a.update_quantity(9, 0));
        assert!(!b.remove_from_cart(9));
        assert_eq!(a.lines(), b.lines());
    }

    #[tokio::test]
    async fn test_update_unknown_product_is_noop() {
        let store = Arc::new(MemoryStore::new());
        let cart = CartManager::new(store.clone());
        cart.add_to_cart(&product(1, 100));
        cart.flush().await;
        let writes = store.write_count();

        assert!(!cart.update_quantity(42, 3));
        assert_eq!(cart.quantity_of(42), 0);
        assert_eq!(cart.lines().len(), 1);

        cart.flush().await;
        assert_eq!(store.write_count(), writes);
    }

    #[tokio::test]
    async fn test_emptying_the_cart_deletes_the_record() {
        let store = Arc::new(MemoryStore::new());
        let cart = CartManager::new(store.clone());
        cart.add_to_cart(&product(1, 100));
        cart.flush().await;
        assert!(store.peek(CART_STORAGE_KEY).is_some());

        cart.remove_from_cart(1);
        cart.flush().await;
        assert!(store.peek(CART_STORAGE_KEY).is_none());
    }

    #[tokio::test]
    async fn test_clear_cart() {
        let store = Arc::new(MemoryStore::new());
        let cart = CartManager::new(store.clone());
        cart.add_to_cart(&product(1, 100));
        cart.add_to_cart(&product(2, 100));

        cart.clear_cart();
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert!(cart.total_price().is_zero());

        cart.flush().await;
        assert!(store.peek(CART_STORAGE_KEY).is_none());
    }

    #[tokio::test]
    async fn test_rapid_mutations_are_coalesced() {
        let store = Arc::new(MemoryStore::new());
        let cart = CartManager::new(store.clone());
        let p = product(1, 100);

        for _ in 0..10 {
            cart.add_to_cart(&p);
        }
        cart.flush().await;

        assert_eq!(store.write_count(), 1);
        assert_eq!(saved_cart(&store).unwrap().quantity_of(1), 10);
    }

    #[tokio::test]
    async fn test_write_failure_keeps_memory() {
        let store = Arc::new(MemoryStore::new());
        store.set_fail_writes(true);
        let cart = CartManager::new(store.clone());

        cart.add_to_cart(&product(1, 100));
        cart.flush().await;

        assert_eq!(cart.quantity_of(1), 1);
        assert!(store.peek(CART_STORAGE_KEY).is_none());
    }

    #[tokio::test]
    async fn test_line_accessors() {
        let cart = CartManager::new(Arc::new(MemoryStore::new()));
        let p = product(5, 1_250);
        cart.add_to_cart(&p);
        cart.add_to_cart(&p);

        let line = cart.line(5).unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.line_total(), Money::from_cents(2_500));
        assert!(cart.line(6).is_none());
        assert!(!cart.is_empty());
    }
}
