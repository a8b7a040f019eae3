//! # mart-core: Pure Business Logic for Smart Mart
//!
//! This crate holds every rule of the point-of-sale domain that can be
//! expressed without touching the disk.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Smart Mart Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              GUI (login, admin panel, cashier panel)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 mart-store (Mart facade + stores)               │   │
//! │  │        products.txt   admin.txt   cashiers.txt   bills.txt      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ mart-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │ Category  │  │   Money   │  │   Cart    │  │   rules   │  │   │
//! │  │   │ Product   │  │ discounts │  │ LineItem  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FILES • NO CLOCK • PURE FUNCTIONS                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Category, Product, Bill, Role, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - Line items and the cashier's cart
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use mart_core::{Cart, Category, LineItem, Money};
//!
//! let mut cart = Cart::new();
//! cart.add(LineItem::new(Category::Groceries, "Milk", Money::from_cents(399), 2)).unwrap();
//! cart.add(LineItem::new(Category::Groceries, "Bread", Money::from_cents(299), 1)).unwrap();
//!
//! assert_eq!(cart.subtotal(), Ok(Money::from_cents(1097)));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, LineItem};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// The one username that always belongs to the administrator.
///
/// Matched case-insensitively: "Admin" and "ADMIN" are the admin too, and
/// none of them can be registered as a cashier.
pub const ADMIN_USERNAME: &str = "admin";

/// Maximum distinct lines allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line in the cart.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest unit price accepted on a shelf, in cents ($100,000,000.00).
///
/// A full cart at this price still fits comfortably in `i64` cents.
pub const MAX_PRICE_CENTS: i64 = 10_000_000_000;

/// Width of the zero-padded bill number ("0001").
pub const BILL_NUMBER_WIDTH: usize = 4;

/// Card payments get 10% off (in basis points).
pub const DEFAULT_CARD_DISCOUNT_BPS: u32 = 1000;
