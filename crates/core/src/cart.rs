//! Shopping cart with ordered lines and merge-by-name semantics.
//!
//! The cart is a plain value type; the storefront serializes it to the
//! visitor's session after every mutation. All index-taking operations
//! treat an out-of-range index as a no-op - a stale index from an already
//! re-rendered surface must never corrupt state.

use serde::{Deserialize, Serialize};

use crate::types::{Price, Product};

/// One product entry in the cart with its quantity.
///
/// Invariant: `quantity >= 1`. Lines driven to zero or below are removed by
/// [`Cart::change_quantity`], never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product, as it was when first added.
    pub product: Product,
    /// Units of the product in the cart.
    pub quantity: u32,
}

impl CartLine {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// Ordered sequence of cart lines, insertion order preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The line at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CartLine> {
        self.lines.get(index)
    }

    /// Add `quantity` units of `product`.
    ///
    /// A line with the same product name absorbs the quantity; otherwise a
    /// new line is appended. Zero quantities are treated as one.
    pub fn add(&mut self, product: Product, quantity: u32) {
        let quantity = quantity.max(1);
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.name == product.name)
        {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.lines.push(CartLine { product, quantity });
        }
    }

    /// Add a single unit of `product`.
    pub fn add_one(&mut self, product: Product) {
        self.add(product, 1);
    }

    /// Remove the line at `index`. Out-of-range is a no-op.
    pub fn remove(&mut self, index: usize) {
        if index < self.lines.len() {
            self.lines.remove(index);
        }
    }

    /// Add `delta` to the quantity of the line at `index`.
    ///
    /// A resulting quantity of zero or below removes the line entirely.
    /// Out-of-range is a no-op.
    pub fn change_quantity(&mut self, index: usize, delta: i32) {
        let Some(line) = self.lines.get_mut(index) else {
            return;
        };
        let updated = i64::from(line.quantity) + i64::from(delta);
        if updated <= 0 {
            self.lines.remove(index);
        } else {
            line.quantity = u32::try_from(updated).unwrap_or(u32::MAX);
        }
    }

    /// Empty the cart.
    ///
    /// Destructive; the HTTP layer only calls this after the visitor has
    /// confirmed the action.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |count, line| count.saturating_add(line.quantity))
    }

    /// Sum of line totals across all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Price;

    fn shirt() -> Product {
        Product::new("Shirt".to_string(), Price::from_major_units(500.0))
    }

    fn scarf() -> Product {
        Product::new("Scarf".to_string(), Price::from_major_units(250.0))
    }

    #[test]
    fn test_add_same_name_merges_into_one_line() {
        let mut cart = Cart::new();
        cart.add(shirt(), 2);
        cart.add(shirt(), 1);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(0).unwrap().quantity, 3);
        assert_eq!(cart.total(), Price::from_major_units(1500.0));
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.add_one(shirt());
        cart.add_one(scarf());
        cart.add(shirt(), 4);

        let names: Vec<&str> = cart.lines().iter().map(|l| l.product.name.as_str()).collect();
        assert_eq!(names, vec!["Shirt", "Scarf"]);
    }

    #[test]
    fn test_add_zero_quantity_counts_as_one() {
        let mut cart = Cart::new();
        cart.add(shirt(), 0);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut cart = Cart::new();
        cart.add_one(shirt());
        cart.remove(5);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_change_quantity_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(shirt(), 2);
        cart.change_quantity(0, -2);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_change_quantity_below_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add_one(shirt());
        cart.change_quantity(0, -5);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_change_quantity_never_stores_nonpositive() {
        let mut cart = Cart::new();
        cart.add(shirt(), 3);
        cart.add(scarf(), 1);
        cart.change_quantity(0, -1);
        cart.change_quantity(1, -1);

        assert!(cart.lines().iter().all(|line| line.quantity >= 1));
    }

    #[test]
    fn test_change_quantity_out_of_range_is_noop() {
        let mut cart = Cart::new();
        cart.add_one(shirt());
        cart.change_quantity(7, 1);
        assert_eq!(cart.get(0).unwrap().quantity, 1);
    }

    #[test]
    fn test_totals_track_every_mutation() {
        let mut cart = Cart::new();
        cart.add(shirt(), 2);
        cart.add(scarf(), 3);
        assert_eq!(cart.item_count(), 5);
        assert_eq!(cart.total(), Price::from_major_units(1750.0));

        cart.change_quantity(1, -1);
        assert_eq!(cart.item_count(), 4);
        assert_eq!(cart.total(), Price::from_major_units(1500.0));

        cart.remove(0);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.total(), Price::from_major_units(500.0));

        cart.clear();
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total(), Price::ZERO);
    }

    #[test]
    fn test_serde_round_trip_preserves_order_and_contents() {
        let mut cart = Cart::new();
        cart.add(shirt(), 2);
        cart.add(scarf(), 1);

        let json = serde_json::to_string(&cart).unwrap();
        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(cart, back);
    }

    #[test]
    fn test_malformed_json_fails_to_parse() {
        // The storefront maps this failure to an empty cart.
        assert!(serde_json::from_str::<Cart>("{\"not\": \"a cart\"}").is_err());
    }
}
