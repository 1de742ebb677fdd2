//! Shopping cart.
//!
//! The cart maps product ids to a snapshot of the product and a quantity.
//! Entries keep insertion order, which is also the order of the persisted
//! record. Persisting after each change is the caller's job (see
//! [`crate::state::Effect::PersistCart`]).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use toyverse_core::{Price, ProductId};

use crate::catalog::{Catalog, Product};

/// One cart line.
///
/// This is also the element type of the persisted cart record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    /// Snapshot of the product at the time it was added.
    pub product: Product,
    /// Always at least 1.
    pub qty: u32,
}

impl CartEntry {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.unit_price() * self.qty
    }
}

/// The cart: at most one entry per product id, every quantity ≥ 1.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    entries: IndexMap<ProductId, CartEntry>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `qty` of a catalog product.
    ///
    /// Unknown ids and a zero quantity are ignored. Returns whether the cart
    /// changed.
    pub fn add(&mut self, catalog: &Catalog, id: &ProductId, qty: u32) -> bool {
        if qty == 0 {
            return false;
        }
        let Some(product) = catalog.get(id) else {
            tracing::debug!(product_id = %id, "Ignoring add for unknown product");
            return false;
        };
        if let Some(entry) = self.entries.get_mut(id) {
            entry.qty = entry.qty.saturating_add(qty);
        } else {
            self.entries.insert(
                id.clone(),
                CartEntry {
                    product: product.clone(),
                    qty,
                },
            );
        }
        true
    }

    /// Delete an entry. Returns whether one was present.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        self.entries.shift_remove(id).is_some()
    }

    /// Set an entry's quantity, clamped to at least 1.
    ///
    /// Returns false when there is no entry for `id`.
    pub fn set_qty(&mut self, id: &ProductId, qty: u32) -> bool {
        let Some(entry) = self.entries.get_mut(id) else {
            return false;
        };
        entry.qty = qty.max(1);
        true
    }

    /// Quantity plus one.
    pub fn increment(&mut self, id: &ProductId) -> bool {
        match self.qty(id) {
            Some(qty) => self.set_qty(id, qty.saturating_add(1)),
            None => false,
        }
    }

    /// Quantity minus one, never below 1.
    pub fn decrement(&mut self, id: &ProductId) -> bool {
        match self.qty(id) {
            Some(qty) => self.set_qty(id, qty.saturating_sub(1)),
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartEntry> {
        self.entries.get(id)
    }

    #[must_use]
    pub fn qty(&self, id: &ProductId) -> Option<u32> {
        self.entries.get(id).map(|e| e.qty)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = &CartEntry> {
        self.entries.values()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of price × qty. Zero for an empty cart.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.entries().map(CartEntry::line_total).sum()
    }

    /// Sum of all quantities, for the cart badge.
    #[must_use]
    pub fn total_item_count(&self) -> u32 {
        self.entries().fold(0, |acc, e| acc.saturating_add(e.qty))
    }

    /// The persisted form: entries in order.
    #[must_use]
    pub fn to_record(&self) -> Vec<CartEntry> {
        self.entries().cloned().collect()
    }

    /// Rebuild a cart from its persisted form.
    ///
    /// Entries are keyed by their product id; a later duplicate replaces an
    /// earlier one. Stored quantities below 1 are raised to 1.
    #[must_use]
    pub fn from_record(record: Vec<CartEntry>) -> Self {
        let mut entries = IndexMap::with_capacity(record.len());
        for mut entry in record {
            entry.qty = entry.qty.max(1);
            entries.insert(entry.product.id.clone(), entry);
        }
        Self { entries }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn id(s: &str) -> ProductId {
        ProductId::new(s)
    }

    #[test]
    fn test_add_twice_merges_into_one_entry() {
        let catalog = Catalog::toyverse();
        let mut cart = Cart::new();
        assert!(cart.add(&catalog, &id("p1"), 1));
        assert!(cart.add(&catalog, &id("p1"), 1));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.qty(&id("p1")), Some(2));

        assert!(cart.remove(&id("p1")));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_unknown_product_is_noop() {
        let catalog = Catalog::toyverse();
        let mut cart = Cart::new();
        assert!(!cart.add(&catalog, &id("ghost"), 1));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_zero_is_noop() {
        let catalog = Catalog::toyverse();
        let mut cart = Cart::new();
        assert!(!cart.add(&catalog, &id("p1"), 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        assert!(!cart.remove(&id("p1")));
    }

    #[test]
    fn test_set_qty_zero_clamps_to_one() {
        let catalog = Catalog::toyverse();
        let mut cart = Cart::new();
        cart.add(&catalog, &id("p2"), 3);
        assert!(cart.set_qty(&id("p2"), 0));
        assert_eq!(cart.qty(&id("p2")), Some(1));
    }

    #[test]
    fn test_set_qty_absent_is_noop() {
        let mut cart = Cart::new();
        assert!(!cart.set_qty(&id("p2"), 5));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_increment_and_decrement_clamp() {
        let catalog = Catalog::toyverse();
        let mut cart = Cart::new();
        cart.add(&catalog, &id("p3"), 1);
        cart.increment(&id("p3"));
        assert_eq!(cart.qty(&id("p3")), Some(2));
        cart.decrement(&id("p3"));
        cart.decrement(&id("p3"));
        cart.decrement(&id("p3"));
        assert_eq!(cart.qty(&id("p3")), Some(1));
        assert!(!cart.increment(&id("p4")));
    }

    #[test]
    fn test_subtotal_and_item_count() {
        let catalog = Catalog::toyverse();
        let mut cart = Cart::new();
        assert!(cart.subtotal().is_zero());
        assert_eq!(cart.total_item_count(), 0);

        cart.add(&catalog, &id("p7"), 2); // 2 × 8.99
        cart.add(&catalog, &id("p5"), 1); // 54.00
        assert_eq!(cart.subtotal().amount, Decimal::new(7198, 2));
        assert_eq!(cart.subtotal().display(), "$71.98");
        assert_eq!(cart.total_item_count(), 3);
    }

    #[test]
    fn test_entries_keep_insertion_order_after_remove() {
        let catalog = Catalog::toyverse();
        let mut cart = Cart::new();
        for p in ["p3", "p1", "p8"] {
            cart.add(&catalog, &id(p), 1);
        }
        cart.remove(&id("p1"));
        let order: Vec<_> = cart.entries().map(|e| e.product.id.as_str()).collect();
        assert_eq!(order, vec!["p3", "p8"]);
    }

    #[test]
    fn test_record_round_trip() {
        let catalog = Catalog::toyverse();
        let mut cart = Cart::new();
        cart.add(&catalog, &id("p4"), 2);
        cart.add(&catalog, &id("p6"), 5);

        let json = serde_json::to_string(&cart.to_record()).unwrap();
        let record: Vec<CartEntry> = serde_json::from_str(&json).unwrap();
        assert_eq!(Cart::from_record(record), cart);
    }

    #[test]
    fn test_from_record_later_duplicate_wins_and_qty_clamped() {
        let catalog = Catalog::toyverse();
        let product = catalog.get(&id("p1")).cloned().unwrap();
        let record = vec![
            CartEntry {
                product: product.clone(),
                qty: 4,
            },
            CartEntry { product, qty: 0 },
        ];
        let cart = Cart::from_record(record);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.qty(&id("p1")), Some(1));
    }
}
