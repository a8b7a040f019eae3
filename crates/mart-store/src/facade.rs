//! # Mart Facade
//!
//! The single entry point the login, admin and cashier screens talk to.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Mart::checkout(cart, method)                         │
//! │                                                                         │
//! │  cart empty? ──────────────────────────────► Err(EmptyCart)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  subtotal ── Card? ──► discount = subtotal × card_discount_bps          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  every line still in stock? ──── no ───────► Err(InsufficientStock)    │
//! │       │ yes                                                             │
//! │       ▼                                                                 │
//! │  reduce_stock per line        (one products.txt cycle per line)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  append bill(total, method)   (one bills.txt cycle)                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Receipt { bill, subtotal, discount, total, method }                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock reduction and the bill append are separate store cycles. If one of
//! them fails part way through, reductions already written stay written.

use std::collections::BTreeMap;
use std::path::PathBuf;

use mart_core::cart::calculate_total;
use mart_core::validation::{validate_bill_total, validate_sale_quantity};
use mart_core::{
    is_admin_username, Bill, Cart, Category, CoreError, LineItem, Money, PaymentMethod, Product,
    Role,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::MartConfig;
use crate::error::{StoreError, StoreResult};
use crate::password::PasswordHasher;
use crate::repository::bill::BillStore;
use crate::repository::product::{ProductCatalog, ProductStore};
use crate::repository::user::UserStore;

/// Result of a completed checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// The bill as written to the bill store.
    pub bill: Bill,
    /// Sum of all lines before the payment discount.
    pub subtotal: Money,
    /// Amount taken off for the payment method.
    pub discount: Money,
    /// Amount charged (`subtotal - discount`).
    pub total: Money,
    pub method: PaymentMethod,
}

/// Facade over the product, user and bill stores.
///
/// ## Usage
/// ```rust,ignore
/// let mart = Mart::new(MartConfig::load_or_default(None))?;
///
/// match mart.validate_login("admin", "admin123")? {
///     Some(Role::Admin) => { /* admin panel */ }
///     Some(Role::Cashier) => { /* cashier panel */ }
///     None => { /* "Invalid credentials" */ }
/// }
/// ```
#[derive(Debug)]
pub struct Mart {
    products: ProductStore,
    users: UserStore,
    bills: BillStore,
    card_discount_bps: u32,
}

impl Mart {
    /// Builds the stores from `config` and makes sure the admin exists.
    pub fn new(config: MartConfig) -> StoreResult<Self> {
        config.validate()?;
        info!(
            data_dir = %config.data_dir.display(),
            scheme = %config.password_scheme,
            "Opening mart"
        );

        let users = UserStore::new(
            config.admin_path(),
            config.cashiers_path(),
            PasswordHasher::new(config.password_scheme),
        )
        .with_default_admin_password(config.default_admin_password.clone());

        let mart = Mart {
            products: ProductStore::new(config.products_path()),
            bills: BillStore::new(config.bills_path()),
            users,
            card_discount_bps: config.card_discount_bps,
        };
        mart.users.ensure_admin()?;

        Ok(mart)
    }

    /// Opens a mart with default settings rooted at `data_dir`.
    pub fn open(data_dir: impl Into<PathBuf>) -> StoreResult<Self> {
        Self::new(MartConfig::new(data_dir))
    }

    pub fn products(&self) -> &ProductStore {
        &self.products
    }

    pub fn users(&self) -> &UserStore {
        &self.users
    }

    pub fn bills(&self) -> &BillStore {
        &self.bills
    }

    /// Card discount in basis points.
    pub fn card_discount_bps(&self) -> u32 {
        self.card_discount_bps
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Resolves a login to the panel it opens.
    ///
    /// `admin` (any case) is only ever checked against the admin record, so
    /// a cashier can never log in as admin and vice versa.
    pub fn validate_login(&self, username: &str, password: &str) -> StoreResult<Option<Role>> {
        if username.trim().is_empty() || password.is_empty() {
            return Ok(None);
        }

        let role = if is_admin_username(username) {
            Role::Admin
        } else {
            Role::Cashier
        };

        if self.users.validate(username, password)? {
            info!(username, ?role, "Login succeeded");
            Ok(Some(role))
        } else {
            warn!(username, "Login failed");
            Ok(None)
        }
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Builds a cart line for `quantity` units of a product.
    ///
    /// The stock is only checked here, not reserved.
    pub fn add_to_cart(
        &self,
        category: Category,
        name: &str,
        quantity: i64,
    ) -> StoreResult<LineItem> {
        validate_sale_quantity(quantity)?;

        let product = self
            .products
            .get(category, name)?
            .ok_or_else(|| StoreError::not_found("Product", name))?;

        if !product.can_sell(quantity) {
            return Err(CoreError::InsufficientStock {
                name: product.name,
                available: product.quantity,
                requested: quantity,
            }
            .into());
        }

        debug!(%category, name = %product.name, quantity, "Line item created");
        Ok(LineItem::new(category, product.name, product.price, quantity))
    }

    /// Sums `price × quantity` over `items`.
    pub fn calculate_total(&self, items: &[LineItem]) -> StoreResult<Money> {
        Ok(calculate_total(items)?)
    }

    /// Discount the given payment method earns on `subtotal`.
    pub fn discount_for(&self, subtotal: Money, method: PaymentMethod) -> Money {
        match method {
            PaymentMethod::Card => subtotal.percentage(self.card_discount_bps),
            PaymentMethod::Cash => Money::zero(),
        }
    }

    /// Sells the cart: reduces stock and records a bill.
    pub fn checkout(&self, cart: &Cart, method: PaymentMethod) -> StoreResult<Receipt> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }

        let subtotal = cart.subtotal()?;
        let discount = self.discount_for(subtotal, method);
        let total = subtotal - discount;
        validate_bill_total(total)?;

        for item in cart.items() {
            let product = self
                .products
                .get(item.category, &item.name)?
                .ok_or_else(|| StoreError::not_found("Product", item.name.as_str()))?;
            if !product.can_sell(item.quantity) {
                return Err(CoreError::InsufficientStock {
                    name: product.name,
                    available: product.quantity,
                    requested: item.quantity,
                }
                .into());
            }
        }

        for item in cart.items() {
            self.products
                .reduce_stock(item.category, &item.name, item.quantity)?;
        }

        let bill = self.bills.append_with_method(total, method)?;

        info!(
            bill_number = %bill.bill_number,
            lines = cart.len(),
            %subtotal,
            %discount,
            %total,
            %method,
            "Checkout complete"
        );

        Ok(Receipt {
            bill,
            subtotal,
            discount,
            total,
            method,
        })
    }

    // =========================================================================
    // Product Pass-Throughs
    // =========================================================================

    pub fn add_product(
        &self,
        category: Category,
        name: &str,
        price: Money,
        quantity: i64,
    ) -> StoreResult<Product> {
        self.products.add(category, name, price, quantity)
    }

    pub fn update_product(
        &self,
        category: Category,
        name: &str,
        price: Money,
        quantity: i64,
    ) -> StoreResult<Product> {
        self.products.update(category, name, price, quantity)
    }

    pub fn delete_product(&self, category: Category, name: &str) -> StoreResult<Product> {
        self.products.delete(category, name)
    }

    pub fn get_all_products(&self) -> StoreResult<ProductCatalog> {
        self.products.get_all()
    }

    pub fn get_products_by_category(&self, category: Category) -> StoreResult<Vec<Product>> {
        self.products.get_by_category(category)
    }

    pub fn get_product(&self, category: Category, name: &str) -> StoreResult<Option<Product>> {
        self.products.get(category, name)
    }

    pub fn reduce_stock(
        &self,
        category: Category,
        name: &str,
        quantity: i64,
    ) -> StoreResult<Product> {
        self.products.reduce_stock(category, name, quantity)
    }

    pub fn get_price(&self, name: &str) -> StoreResult<Money> {
        self.products.get_price(name)
    }

    // =========================================================================
    // User Pass-Throughs
    // =========================================================================

    pub fn add_cashier(&self, username: &str, password: &str) -> StoreResult<()> {
        self.users.add_cashier(username, password)
    }

    pub fn update_cashier(&self, username: &str, new_password: &str) -> StoreResult<()> {
        self.users.update_cashier(username, new_password)
    }

    pub fn delete_cashier(&self, username: &str) -> StoreResult<()> {
        self.users.delete_cashier(username)
    }

    pub fn list_cashiers(&self) -> StoreResult<Vec<String>> {
        self.users.list_cashiers()
    }

    // =========================================================================
    // Bill Pass-Throughs
    // =========================================================================

    pub fn append_bill(&self, total: Money) -> StoreResult<Bill> {
        self.bills.append(total)
    }

    pub fn list_bills(&self) -> StoreResult<Vec<Bill>> {
        self.bills.list_all()
    }

    /// Total sales per payment method, for the admin's bill view.
    ///
    /// Bills without a recorded method are grouped under `None`.
    pub fn sales_by_method(&self) -> StoreResult<BTreeMap<Option<PaymentMethod>, Money>> {
        let mut totals = BTreeMap::new();
        for bill in self.bills.list_all()? {
            let sum = totals.entry(bill.payment_method).or_insert_with(Money::zero);
            *sum = sum
                .checked_add(bill.total)
                .ok_or(CoreError::AmountOverflow)?;
        }
        Ok(totals)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::PasswordScheme;
    use mart_core::ValidationError;
    use tempfile::TempDir;

    fn mart() -> (TempDir, Mart) {
        let dir = TempDir::new().unwrap();
        let config = MartConfig::new(dir.path()).password_scheme(PasswordScheme::Sha256);
        let mart = Mart::new(config).unwrap();
        (dir, mart)
    }

    fn stocked() -> (TempDir, Mart) {
        let (dir, mart) = mart();
        mart.add_product(Category::Electronics, "Laptop", Money::from_cents(99999), 5)
            .unwrap();
        mart.add_product(Category::Groceries, "Bread", Money::from_cents(299), 20)
            .unwrap();
        (dir, mart)
    }

    #[test]
    fn test_new_creates_admin_file() {
        let (dir, _mart) = mart();
        assert!(dir.path().join("admin.txt").exists());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let dir = TempDir::new().unwrap();
        let config = MartConfig::new(dir.path()).card_discount_bps(20000);
        assert!(matches!(Mart::new(config), Err(StoreError::Config(_))));
    }

    #[test]
    fn test_validate_login_roles() {
        let (_dir, mart) = mart();
        mart.add_cashier("john", "password123").unwrap();

        assert_eq!(mart.validate_login("admin", "admin123").unwrap(), Some(Role::Admin));
        assert_eq!(mart.validate_login("Admin", "admin123").unwrap(), Some(Role::Admin));
        assert_eq!(mart.validate_login("admin", "nope").unwrap(), None);
        assert_eq!(
            mart.validate_login("john", "password123").unwrap(),
            Some(Role::Cashier)
        );
        assert_eq!(mart.validate_login("john", "admin123").unwrap(), None);
        assert_eq!(mart.validate_login("admin", "password123").unwrap(), None);
        assert_eq!(mart.validate_login("", "").unwrap(), None);
        assert_eq!(mart.validate_login("ghost", "x").unwrap(), None);
    }

    #[test]
    fn test_add_to_cart() {
        let (_dir, mart) = stocked();

        let line = mart.add_to_cart(Category::Electronics, "laptop", 2).unwrap();
        assert_eq!(line.name, "Laptop");
        assert_eq!(line.unit_price, Money::from_cents(99999));
        assert_eq!(line.quantity, 2);
        assert_eq!(line.category, Category::Electronics);
    }

    #[test]
    fn test_add_to_cart_failures() {
        let (_dir, mart) = stocked();

        assert!(matches!(
            mart.add_to_cart(Category::Electronics, "Laptop", 6),
            Err(StoreError::Core(CoreError::InsufficientStock { .. }))
        ));
        assert!(matches!(
            mart.add_to_cart(Category::Electronics, "Tablet", 1),
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            mart.add_to_cart(Category::Groceries, "Laptop", 1),
            Err(StoreError::NotFound { .. })
        ));
        assert!(mart.add_to_cart(Category::Electronics, "Laptop", 0).is_err());
        assert!(mart.add_to_cart(Category::Electronics, "Laptop", -1).is_err());
    }

    #[test]
    fn test_calculate_total_exact() {
        let (_dir, mart) = stocked();
        let lines = vec![
            mart.add_to_cart(Category::Electronics, "Laptop", 2).unwrap(),
            mart.add_to_cart(Category::Groceries, "Bread", 3).unwrap(),
        ];
        assert_eq!(mart.calculate_total(&lines).unwrap(), Money::from_cents(199998 + 897));
        assert_eq!(mart.calculate_total(&[]).unwrap(), Money::zero());
    }

    #[test]
    fn test_calculate_total_overflow_is_an_error() {
        let (_dir, mart) = mart();
        let lines = [LineItem::new(
            Category::Electronics,
            "Yacht",
            Money::from_cents(i64::MAX / 2),
            3,
        )];
        assert!(matches!(
            mart.calculate_total(&lines),
            Err(StoreError::Core(CoreError::AmountOverflow))
        ));
    }

    #[test]
    fn test_add_product_rejects_price_above_ceiling() {
        let (_dir, mart) = mart();
        let err = mart
            .add_product(Category::Electronics, "Yacht", Money::from_cents(i64::MAX / 2), 1)
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(ValidationError::OutOfRange { .. })));
        assert!(mart.get_all_products().unwrap().is_empty());
    }

    #[test]
    fn test_card_checkout_applies_discount_and_reduces_stock() {
        let (_dir, mart) = stocked();
        let mut cart = Cart::new();
        cart.add(mart.add_to_cart(Category::Electronics, "Laptop", 2).unwrap())
            .unwrap();

        let receipt = mart.checkout(&cart, PaymentMethod::Card).unwrap();
        assert_eq!(receipt.subtotal, Money::from_cents(199998));
        assert_eq!(receipt.discount, Money::from_cents(20000));
        assert_eq!(receipt.total, Money::from_cents(179998));
        assert_eq!(receipt.bill.bill_number, "0001");
        assert_eq!(receipt.bill.total, receipt.total);
        assert_eq!(receipt.bill.payment_method, Some(PaymentMethod::Card));

        let laptop = mart.get_product(Category::Electronics, "Laptop").unwrap().unwrap();
        assert_eq!(laptop.quantity, 3);
        assert_eq!(mart.list_bills().unwrap(), vec![receipt.bill]);
    }

    #[test]
    fn test_cash_checkout_has_no_discount() {
        let (_dir, mart) = stocked();
        let mut cart = Cart::new();
        cart.add(mart.add_to_cart(Category::Groceries, "Bread", 4).unwrap())
            .unwrap();
        cart.add(mart.add_to_cart(Category::Electronics, "Laptop", 1).unwrap())
            .unwrap();

        let receipt = mart.checkout(&cart, PaymentMethod::Cash).unwrap();
        assert_eq!(receipt.discount, Money::zero());
        assert_eq!(receipt.total, Money::from_cents(1196 + 99999));
        assert_eq!(
            mart.get_product(Category::Groceries, "Bread").unwrap().unwrap().quantity,
            16
        );
    }

    #[test]
    fn test_checkout_empty_cart_fails() {
        let (_dir, mart) = stocked();
        assert!(matches!(
            mart.checkout(&Cart::new(), PaymentMethod::Cash),
            Err(StoreError::Core(CoreError::EmptyCart))
        ));
        assert!(mart.list_bills().unwrap().is_empty());
    }

    #[test]
    fn test_checkout_stock_precheck_leaves_stores_untouched() {
        let (_dir, mart) = stocked();
        let mut cart = Cart::new();
        cart.add(mart.add_to_cart(Category::Groceries, "Bread", 2).unwrap())
            .unwrap();
        cart.add(mart.add_to_cart(Category::Electronics, "Laptop", 5).unwrap())
            .unwrap();

        // Stock drops after the line was rung up
        mart.reduce_stock(Category::Electronics, "Laptop", 1).unwrap();

        assert!(matches!(
            mart.checkout(&cart, PaymentMethod::Card),
            Err(StoreError::Core(CoreError::InsufficientStock { .. }))
        ));
        assert_eq!(
            mart.get_product(Category::Groceries, "Bread").unwrap().unwrap().quantity,
            20
        );
        assert!(mart.list_bills().unwrap().is_empty());
    }

    #[test]
    fn test_configured_card_discount() {
        let dir = TempDir::new().unwrap();
        let config = MartConfig::new(dir.path())
            .password_scheme(PasswordScheme::Sha256)
            .card_discount_bps(500);
        let mart = Mart::new(config).unwrap();
        mart.add_product(Category::Books, "Dune", Money::from_cents(2000), 3)
            .unwrap();

        let mut cart = Cart::new();
        cart.add(mart.add_to_cart(Category::Books, "Dune", 1).unwrap())
            .unwrap();
        let receipt = mart.checkout(&cart, PaymentMethod::Card).unwrap();
        assert_eq!(receipt.total, Money::from_cents(1900));
    }

    #[test]
    fn test_bill_numbers_increase_across_checkouts() {
        let (_dir, mart) = stocked();
        let mut numbers = Vec::new();
        for _ in 0..3 {
            let mut cart = Cart::new();
            cart.add(mart.add_to_cart(Category::Groceries, "Bread", 1).unwrap())
                .unwrap();
            numbers.push(mart.checkout(&cart, PaymentMethod::Cash).unwrap().bill.bill_number);
        }
        assert_eq!(numbers, vec!["0001", "0002", "0003"]);
    }

    #[test]
    fn test_sales_by_method() {
        let (_dir, mart) = stocked();
        mart.append_bill(Money::from_cents(500)).unwrap();

        let mut cart = Cart::new();
        cart.add(mart.add_to_cart(Category::Groceries, "Bread", 1).unwrap())
            .unwrap();
        mart.checkout(&cart, PaymentMethod::Cash).unwrap();
        mart.checkout(&cart, PaymentMethod::Cash).unwrap();

        let totals = mart.sales_by_method().unwrap();
        assert_eq!(totals[&None], Money::from_cents(500));
        assert_eq!(totals[&Some(PaymentMethod::Cash)], Money::from_cents(598));
        assert!(!totals.contains_key(&Some(PaymentMethod::Card)));
    }

    #[test]
    fn test_pass_throughs_share_files() {
        let (dir, mart) = stocked();
        mart.update_product(Category::Groceries, "Bread", Money::from_cents(349), 10)
            .unwrap();
        assert_eq!(mart.get_price("bread").unwrap(), Money::from_cents(349));
        assert_eq!(mart.get_products_by_category(Category::Groceries).unwrap().len(), 1);

        mart.delete_product(Category::Groceries, "Bread").unwrap();
        assert!(!mart.get_all_products().unwrap().contains_key(&Category::Groceries));

        mart.add_cashier("mary", "pw").unwrap();
        mart.update_cashier("mary", "pw2").unwrap();
        assert_eq!(mart.list_cashiers().unwrap(), vec!["mary"]);
        mart.delete_cashier("mary").unwrap();
        assert!(mart.list_cashiers().unwrap().is_empty());

        let reopened = Mart::new(
            MartConfig::new(dir.path()).password_scheme(PasswordScheme::Sha256),
        )
        .unwrap();
        assert_eq!(reopened.get_all_products().unwrap(), mart.get_all_products().unwrap());
    }
}
