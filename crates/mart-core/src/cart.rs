//! # Cart
//!
//! Line items and the cashier's in-progress cart.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Cashier Action           Facade / Cart              State Change       │
//! │  ──────────────           ─────────────              ────────────       │
//! │                                                                         │
//! │  Pick product + qty ────► Mart::add_to_cart() ─────► LineItem (checked) │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │                           Cart::add() ─────────────► push or merge qty  │
//! │                                                                         │
//! │  Remove line ───────────► Cart::remove() ──────────► items.retain(..)   │
//! │                                                                         │
//! │  Process payment ───────► Mart::checkout(&cart) ───► stock + bill       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart lives only in memory: nothing here is persisted.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Category;
use crate::validation::validate_line_quantity;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Line Item
// =============================================================================

/// One line of a cart: (product name, unit price, quantity).
///
/// The price is frozen when the line is created; later price edits by the
/// admin do not change a cart that is already being rung up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Shelf the product came from (needed to reduce its stock).
    pub category: Category,

    /// Product name at time of adding.
    pub name: String,

    /// Unit price at time of adding.
    pub unit_price: Money,

    /// Units being bought.
    pub quantity: i64,
}

impl LineItem {
    /// Creates a line item.
    pub fn new(category: Category, name: impl Into<String>, unit_price: Money, quantity: i64) -> Self {
        LineItem {
            category,
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> CoreResult<Money> {
        self.unit_price
            .checked_multiply_quantity(self.quantity)
            .ok_or(CoreError::AmountOverflow)
    }

    fn is_same_product(&self, category: Category, name: &str) -> bool {
        self.category == category && self.name.to_lowercase() == name.to_lowercase()
    }
}

/// Sums `price × quantity` over the given lines, exact to the cent.
///
/// ## Example
/// ```rust
/// use mart_core::{cart::calculate_total, Category, LineItem, Money};
///
/// let lines = [LineItem::new(Category::Electronics, "Laptop", Money::from_cents(99999), 2)];
/// assert_eq!(calculate_total(&lines), Ok(Money::from_cents(199998)));
/// ```
///
/// Fails with `AmountOverflow` rather than wrapping.
pub fn calculate_total(items: &[LineItem]) -> CoreResult<Money> {
    items.iter().try_fold(Money::zero(), |total, item| {
        total
            .checked_add(item.line_total()?)
            .ok_or(CoreError::AmountOverflow)
    })
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by (category, case-insensitive name); adding the same
///   product again increases its quantity
/// - Every quantity is in `1..=999`
/// - At most 100 lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Adds a line or merges it into the existing line for the same product.
    pub fn add(&mut self, item: LineItem) -> CoreResult<()> {
        validate_line_quantity(item.quantity)?;

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.is_same_product(item.category, &item.name))
        {
            let new_qty = existing.quantity + item.quantity;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            existing.quantity = new_qty;
            return Ok(());
        }

        if self.items.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        self.items.push(item);
        Ok(())
    }

    /// Removes the line for a product. Returns the removed line, if any.
    pub fn remove(&mut self, category: Category, name: &str) -> Option<LineItem> {
        let idx = self
            .items
            .iter()
            .position(|i| i.is_same_product(category, name))?;
        Some(self.items.remove(idx))
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the lines in the order they were added.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Returns the number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the total quantity of all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Calculates the subtotal (before any payment discount).
    pub fn subtotal(&self) -> CoreResult<Money> {
        calculate_total(&self.items)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn laptop(qty: i64) -> LineItem {
        LineItem::new(Category::Electronics, "Laptop", Money::from_cents(99999), qty)
    }

    #[test]
    fn test_calculate_total() {
        let lines = vec![
            laptop(2),
            LineItem::new(Category::Groceries, "Bread", Money::from_cents(299), 3),
        ];
        assert_eq!(calculate_total(&lines).unwrap().cents(), 199998 + 897);
        assert_eq!(calculate_total(&[]), Ok(Money::zero()));
    }

    #[test]
    fn test_calculate_total_overflow_is_an_error() {
        let huge = Money::from_cents(i64::MAX / 2);
        let lines = [LineItem::new(Category::Electronics, "Yacht", huge, 3)];
        assert_eq!(calculate_total(&lines), Err(CoreError::AmountOverflow));

        let lines = [
            LineItem::new(Category::Electronics, "Yacht", huge, 1),
            LineItem::new(Category::Electronics, "Jet", huge, 1),
            LineItem::new(Category::Electronics, "Island", huge, 1),
        ];
        assert_eq!(calculate_total(&lines), Err(CoreError::AmountOverflow));
    }

    #[test]
    fn test_cart_add_same_product_increases_quantity() {
        let mut cart = Cart::new();
        cart.add(laptop(2)).unwrap();
        cart.add(LineItem::new(Category::Electronics, "LAPTOP", Money::from_cents(99999), 1))
            .unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.subtotal().unwrap().cents(), 299997);
    }

    #[test]
    fn test_same_name_in_other_category_is_separate_line() {
        let mut cart = Cart::new();
        cart.add(laptop(1)).unwrap();
        cart.add(LineItem::new(Category::Books, "Laptop", Money::from_cents(1500), 1))
            .unwrap();
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_cart_rejects_bad_quantities() {
        let mut cart = Cart::new();
        assert!(matches!(cart.add(laptop(0)), Err(CoreError::Validation(_))));

        cart.add(laptop(999)).unwrap();
        assert!(matches!(
            cart.add(laptop(1)),
            Err(CoreError::QuantityTooLarge { requested: 1000, .. })
        ));
        assert_eq!(cart.total_quantity(), 999);
    }

    #[test]
    fn test_cart_max_lines() {
        let mut cart = Cart::new();
        for i in 0..MAX_CART_ITEMS {
            cart.add(LineItem::new(Category::Books, format!("Book {i}"), Money::from_cents(100), 1))
                .unwrap();
        }
        let overflow = LineItem::new(Category::Books, "One More", Money::from_cents(100), 1);
        assert_eq!(
            cart.add(overflow),
            Err(CoreError::CartTooLarge { max: MAX_CART_ITEMS })
        );
    }

    #[test]
    fn test_cart_remove_and_clear() {
        let mut cart = Cart::new();
        cart.add(laptop(1)).unwrap();
        cart.add(LineItem::new(Category::Groceries, "Milk", Money::from_cents(399), 2))
            .unwrap();

        let removed = cart.remove(Category::Electronics, "laptop").unwrap();
        assert_eq!(removed.name, "Laptop");
        assert!(cart.remove(Category::Electronics, "laptop").is_none());
        assert_eq!(cart.len(), 1);

        cart.clear();
        assert!(cart.is_empty());
    }
}
