//! # Validation Module
//!
//! Input validation for every store and facade operation.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: GUI                                                           │
//! │  └── Parses text boxes into numbers                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Empty names, non-positive prices, negative stock                  │
//! │  └── Reserved usernames                                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Stores (mart-store)                                          │
//! │  ├── Duplicate names / usernames                                       │
//! │  └── Not found, insufficient stock                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use mart_core::money::Money;
//! use mart_core::validation::{validate_price, validate_stock_quantity};
//!
//! validate_price(Money::from_cents(99999)).unwrap();
//! validate_stock_quantity(0).unwrap();
//! assert!(validate_price(Money::zero()).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::is_admin_username;
use crate::{MAX_ITEM_QUANTITY, MAX_PRICE_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Fails with `Required` if `value` is empty or whitespace.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a product name.
///
/// ## Example
/// ```rust
/// use mart_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Laptop").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_required("name", name)
}

/// Validates a cashier username/password pair.
///
/// ## Rules
/// - Neither may be empty
/// - The username may not be the admin's, in any letter case
pub fn validate_cashier_credentials(username: &str, password: &str) -> ValidationResult<()> {
    validate_required("username", username)?;
    validate_required("password", password)?;

    if is_admin_username(username) {
        return Err(ValidationError::Reserved {
            field: "username".to_string(),
            value: username.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price.
///
/// ## Rules
/// - Must be strictly positive: free items are not sold here
/// - At most [`MAX_PRICE_CENTS`]
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    if price.cents() > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 1,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a stock level being written to the shelf.
///
/// ## Rules
/// - Zero is allowed (out of stock but still listed)
/// - Negative is not
pub fn validate_stock_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Validates a quantity being sold or taken off the shelf.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cashier: Add to Cart                                                   │
/// │                                                                         │
/// │  User enters quantity: 5                                               │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_sale_quantity(5) ← THIS FUNCTION                             │
/// │       │                                                                 │
/// │       ├── qty <= 0? → Error: "quantity must be positive"               │
/// │       │                                                                 │
/// │       └── OK → stock check in the product store                        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_sale_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Validates a cart line quantity (positive and at most 999).
pub fn validate_line_quantity(quantity: i64) -> ValidationResult<()> {
    validate_sale_quantity(quantity)?;

    if quantity > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a bill total.
pub fn validate_bill_total(total: Money) -> ValidationResult<()> {
    if !total.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "total".to_string(),
        });
    }
    Ok(())
}

/// Validates a discount in basis points (0% to 100%).
pub fn validate_discount_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: 10000,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Laptop").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::from_cents(1)).is_ok());
        assert!(validate_price(Money::zero()).is_err());
        assert!(validate_price(Money::from_cents(-99999)).is_err());
        assert!(validate_price(Money::from_cents(MAX_PRICE_CENTS)).is_ok());
        assert!(matches!(
            validate_price(Money::from_cents(MAX_PRICE_CENTS + 1)),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(validate_price(Money::from_cents(i64::MAX / 2)).is_err());
    }

    #[test]
    fn test_validate_stock_quantity() {
        assert!(validate_stock_quantity(0).is_ok());
        assert!(validate_stock_quantity(5).is_ok());
        assert!(validate_stock_quantity(-5).is_err());
    }

    #[test]
    fn test_validate_sale_and_line_quantity() {
        assert!(validate_sale_quantity(1).is_ok());
        assert!(validate_sale_quantity(0).is_err());
        assert!(validate_sale_quantity(-1).is_err());

        assert!(validate_line_quantity(999).is_ok());
        assert!(validate_line_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_cashier_credentials() {
        assert!(validate_cashier_credentials("john", "password123").is_ok());
        assert!(validate_cashier_credentials("", "password123").is_err());
        assert!(validate_cashier_credentials("john", "").is_err());
        assert!(matches!(
            validate_cashier_credentials("Admin", "x"),
            Err(ValidationError::Reserved { .. })
        ));
    }

    #[test]
    fn test_validate_bill_total() {
        assert!(validate_bill_total(Money::from_cents(99999)).is_ok());
        assert!(validate_bill_total(Money::zero()).is_err());
        assert!(validate_bill_total(Money::from_cents(-10000)).is_err());
    }

    #[test]
    fn test_validate_discount_bps() {
        assert!(validate_discount_bps(0).is_ok());
        assert!(validate_discount_bps(1000).is_ok());
        assert!(validate_discount_bps(10001).is_err());
    }
}
