//! # Domain Types
//!
//! Core domain types used throughout Smart Mart.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Category     │   │    Product      │   │      Bill       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Electronics    │   │  name           │   │  bill_number    │       │
//! │  │  Groceries      │   │  price (Money)  │   │  total (Money)  │       │
//! │  │  Clothing       │   │  quantity       │   │  date           │       │
//! │  │  Books          │   └─────────────────┘   │  payment_method │       │
//! │  │  Beauty         │                         └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │ PaymentMethod   │   │      Role       │                             │
//! │  │  Cash           │   │  Admin          │                             │
//! │  │  Card           │   │  Cashier        │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! A product has no surrogate ID: it is identified by its category plus its
//! name, compared case-insensitively.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// The fixed set of shelves a product can sit on.
///
/// Variant order is the search order for lookups across shelves and the
/// order [`Category::ALL`] yields them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Electronics,
    Groceries,
    Clothing,
    Books,
    Beauty,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 5] = [
        Category::Electronics,
        Category::Groceries,
        Category::Clothing,
        Category::Books,
        Category::Beauty,
    ];

    /// Returns the display name (also the on-disk key).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Groceries => "Groceries",
            Category::Clothing => "Clothing",
            Category::Books => "Books",
            Category::Beauty => "Beauty",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a category name exactly as shown in the category picker.
///
/// ## Example
/// ```rust
/// use mart_core::Category;
///
/// assert_eq!("Books".parse::<Category>().unwrap(), Category::Books);
/// assert!("Toys".parse::<Category>().is_err());
/// assert!("".parse::<Category>().is_err());
/// ```
impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::Required {
                field: "category".to_string(),
            });
        }

        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: Category::ALL.iter().map(|c| c.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product on a category shelf.
///
/// ## On-Disk Form
/// Written as a 3-element array `[name, price, quantity]`:
/// ```json
/// ["Laptop", 999.99, 5]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ProductRow", into = "ProductRow")]
pub struct Product {
    /// Display name, unique (case-insensitive) within its category.
    pub name: String,

    /// Unit price, always positive.
    pub price: Money,

    /// Units in stock, never negative.
    pub quantity: i64,
}

#[derive(Serialize, Deserialize)]
struct ProductRow(String, Money, i64);

impl From<ProductRow> for Product {
    fn from(ProductRow(name, price, quantity): ProductRow) -> Self {
        Product {
            name,
            price,
            quantity,
        }
    }
}

impl From<Product> for ProductRow {
    fn from(p: Product) -> Self {
        ProductRow(p.name, p.price, p.quantity)
    }
}

impl Product {
    /// Creates a product record.
    pub fn new(name: impl Into<String>, price: Money, quantity: i64) -> Self {
        Product {
            name: name.into(),
            price,
            quantity,
        }
    }

    /// Case-insensitive name comparison used for every product lookup.
    pub fn matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }

    /// Checks if `quantity` units can be taken off the shelf.
    pub fn can_sell(&self, quantity: i64) -> bool {
        quantity <= self.quantity
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment, no discount.
    Cash,
    /// Card payment, earns the card discount.
    Card,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => f.write_str("Cash"),
            PaymentMethod::Card => f.write_str("Card"),
        }
    }
}

// =============================================================================
// Bill
// =============================================================================

/// A recorded sale.
///
/// ## On-Disk Form
/// ```json
/// {"bill_number": "0001", "total": 1999.98, "date": "2024-05-01 14:03:11"}
/// ```
/// `payment_method` is only written when known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    /// Zero-padded sequence number ("0001", "0002", ...).
    pub bill_number: String,

    /// Amount charged.
    pub total: Money,

    /// Local wall-clock time, `YYYY-MM-DD HH:MM:SS`.
    pub date: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
}

/// Formats the bill number for the bill at position `sequence` (1-based).
///
/// ## Example
/// ```rust
/// use mart_core::types::format_bill_number;
///
/// assert_eq!(format_bill_number(1), "0001");
/// assert_eq!(format_bill_number(12345), "12345");
/// ```
pub fn format_bill_number(sequence: usize) -> String {
    format!("{:0width$}", sequence, width = crate::BILL_NUMBER_WIDTH)
}

// =============================================================================
// Role
// =============================================================================

/// Which panel a successful login opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Cashier,
}

/// Returns true if `username` names the administrator (any case).
pub fn is_admin_username(username: &str) -> bool {
    username.trim().eq_ignore_ascii_case(crate::ADMIN_USERNAME)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert!(matches!(
            "InvalidCategory".parse::<Category>(),
            Err(ValidationError::NotAllowed { .. })
        ));
        assert!(matches!(
            "  ".parse::<Category>(),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_product_wire_format_is_array() {
        let product = Product::new("Laptop", Money::from_cents(99999), 5);
        let json = serde_json::to_string(&product).unwrap();
        assert_eq!(json, r#"["Laptop",999.99,5]"#);

        let back: Product = serde_json::from_str(&json).unwrap();
        assert_eq!(back, product);
    }

    #[test]
    fn test_product_matches_ignores_case() {
        let product = Product::new("Laptop", Money::from_cents(100), 1);
        assert!(product.matches("laptop"));
        assert!(product.matches("LAPTOP"));
        assert!(!product.matches("Laptops"));
    }

    #[test]
    fn test_can_sell() {
        let product = Product::new("Milk", Money::from_cents(399), 3);
        assert!(product.can_sell(3));
        assert!(!product.can_sell(4));
    }

    #[test]
    fn test_bill_without_payment_method_keeps_legacy_shape() {
        let bill = Bill {
            bill_number: "0001".to_string(),
            total: Money::from_cents(99999),
            date: "2024-05-01 14:03:11".to_string(),
            payment_method: None,
        };
        let json = serde_json::to_string(&bill).unwrap();
        assert_eq!(
            json,
            r#"{"bill_number":"0001","total":999.99,"date":"2024-05-01 14:03:11"}"#
        );

        let with_method: Bill = serde_json::from_str(
            r#"{"bill_number":"0002","total":10,"date":"x","payment_method":"card"}"#,
        )
        .unwrap();
        assert_eq!(with_method.payment_method, Some(PaymentMethod::Card));
    }

    #[test]
    fn test_is_admin_username() {
        assert!(is_admin_username("admin"));
        assert!(is_admin_username("ADMIN"));
        assert!(!is_admin_username("administrator"));
    }
}
