//! # Product Store
//!
//! The category shelves, kept in one JSON document.
//!
//! ## Document Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products.txt                                                           │
//! │                                                                         │
//! │  {                                                                      │
//! │    "Electronics": [["Laptop", 999.99, 5], ["Smartphone", 599.99, 10]], │
//! │    "Groceries":   [["Bread", 2.99, 20]]                                 │
//! │  }                                                                      │
//! │                                                                         │
//! │  • A category key exists only while it has at least one product        │
//! │  • Names are unique per category, ignoring letter case                 │
//! │  • The same name MAY appear under two categories                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Damaged Entries
//! The file is decoded one entry at a time. A key that is not one of the
//! five categories, or a row that is not a valid `[name, price, quantity]`,
//! is skipped with a warning while every other shelf still loads. Unknown
//! keys are written back untouched; unreadable rows under a known category
//! are dropped the next time that file is saved.

use std::collections::BTreeMap;
use std::path::PathBuf;

use mart_core::validation::{
    validate_price, validate_product_name, validate_sale_quantity, validate_stock_quantity,
};
use mart_core::{Category, CoreError, Money, Product};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::document::JsonDocument;
use crate::error::{StoreError, StoreResult};

/// Every shelf, keyed by category in declaration order.
pub type ProductCatalog = BTreeMap<Category, Vec<Product>>;

/// The file as stored: category name → anything.
type RawCatalog = BTreeMap<String, Value>;

/// Store for products.
///
/// ## Usage
/// ```rust,ignore
/// let store = ProductStore::new(config.products_path());
///
/// store.add(Category::Electronics, "Laptop", Money::from_cents(99999), 5)?;
/// store.reduce_stock(Category::Electronics, "laptop", 2)?;
/// ```
#[derive(Debug)]
pub struct ProductStore {
    doc: JsonDocument<RawCatalog>,
}

impl ProductStore {
    /// Creates a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ProductStore {
            doc: JsonDocument::new(path),
        }
    }

    /// Adds a product to a shelf.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The stored record
    /// * `Err(StoreError::Validation)` - Empty name, price ≤ 0, quantity < 0
    /// * `Err(StoreError::Duplicate)` - Name already on that shelf (any case)
    pub fn add(
        &self,
        category: Category,
        name: &str,
        price: Money,
        quantity: i64,
    ) -> StoreResult<Product> {
        validate_product_name(name)?;
        validate_price(price)?;
        validate_stock_quantity(quantity)?;

        let name = name.trim();
        debug!(%category, name, %price, quantity, "Adding product");

        self.modify(|catalog| {
            let shelf = catalog.entry(category).or_default();
            if shelf.iter().any(|p| p.matches(name)) {
                return Err(StoreError::duplicate(
                    format!("Product in {category}"),
                    name,
                ));
            }

            let product = Product::new(name, price, quantity);
            shelf.push(product.clone());
            Ok(product)
        })
    }

    /// Changes the price and stock of an existing product.
    ///
    /// The name itself is never changed; the lookup ignores case.
    pub fn update(
        &self,
        category: Category,
        name: &str,
        price: Money,
        quantity: i64,
    ) -> StoreResult<Product> {
        validate_product_name(name)?;
        validate_price(price)?;
        validate_stock_quantity(quantity)?;

        debug!(%category, name, %price, quantity, "Updating product");

        self.modify(|catalog| {
            let product = find_mut(catalog, category, name)?;
            product.price = price;
            product.quantity = quantity;
            Ok(product.clone())
        })
    }

    /// Removes a product, and its category key if the shelf is now empty.
    pub fn delete(&self, category: Category, name: &str) -> StoreResult<Product> {
        debug!(%category, name, "Deleting product");

        self.modify(|catalog| {
            let shelf = catalog
                .get_mut(&category)
                .ok_or_else(|| StoreError::not_found("Category", category.as_str()))?;
            let idx = shelf
                .iter()
                .position(|p| p.matches(name))
                .ok_or_else(|| StoreError::not_found("Product", name))?;

            let removed = shelf.remove(idx);
            if shelf.is_empty() {
                catalog.remove(&category);
                info!(%category, "Last product removed, dropping category");
            }
            Ok(removed)
        })
    }

    /// Returns every shelf.
    pub fn get_all(&self) -> StoreResult<ProductCatalog> {
        self.load()
    }

    /// Returns one shelf; empty if the category has no products.
    pub fn get_by_category(&self, category: Category) -> StoreResult<Vec<Product>> {
        Ok(self.load()?.remove(&category).unwrap_or_default())
    }

    /// Looks up one product.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub fn get(&self, category: Category, name: &str) -> StoreResult<Option<Product>> {
        Ok(self
            .get_by_category(category)?
            .into_iter()
            .find(|p| p.matches(name)))
    }

    /// Takes `quantity` units off the shelf after a sale.
    ///
    /// The stock check and the decrement happen inside one read-modify-write
    /// cycle; a failed check leaves the file untouched.
    pub fn reduce_stock(&self, category: Category, name: &str, quantity: i64) -> StoreResult<Product> {
        validate_sale_quantity(quantity)?;
        debug!(%category, name, quantity, "Reducing stock");

        self.modify(|catalog| {
            let product = find_mut(catalog, category, name)?;
            if !product.can_sell(quantity) {
                return Err(CoreError::InsufficientStock {
                    name: product.name.clone(),
                    available: product.quantity,
                    requested: quantity,
                }
                .into());
            }
            product.quantity -= quantity;
            Ok(product.clone())
        })
    }

    /// Returns the price of the first product named `name` on any shelf.
    ///
    /// Shelves are searched in category declaration order (Electronics first,
    /// Beauty last), so a name listed under two categories resolves to the
    /// earlier one.
    pub fn get_price(&self, name: &str) -> StoreResult<Money> {
        self.load()?
            .values()
            .flatten()
            .find(|p| p.matches(name))
            .map(|p| p.price)
            .ok_or_else(|| StoreError::not_found("Product", name))
    }

    /// Counts products across all shelves (for diagnostics and seeding).
    pub fn count(&self) -> StoreResult<usize> {
        Ok(self.load()?.values().map(Vec::len).sum())
    }

    fn load(&self) -> StoreResult<ProductCatalog> {
        Ok(decode(&self.doc.load()?))
    }

    /// One read-modify-write cycle over the decoded catalog.
    fn modify<F, R>(&self, f: F) -> StoreResult<R>
    where
        F: FnOnce(&mut ProductCatalog) -> StoreResult<R>,
    {
        self.doc.update(|raw| {
            let mut catalog = decode(raw);
            let result = f(&mut catalog)?;
            encode(raw, &catalog)?;
            Ok(result)
        })
    }
}

fn decode(raw: &RawCatalog) -> ProductCatalog {
    let mut catalog = ProductCatalog::new();

    for (key, rows) in raw {
        let Ok(category) = key.parse::<Category>() else {
            warn!(key = %key, "Skipping unknown product category");
            continue;
        };
        let Some(rows) = rows.as_array() else {
            warn!(%category, "Skipping category that is not a list of products");
            continue;
        };

        let shelf: Vec<Product> = rows
            .iter()
            .filter_map(|row| match Product::deserialize(row) {
                Ok(product) => Some(product),
                Err(e) => {
                    warn!(%category, %row, error = %e, "Skipping malformed product row");
                    None
                }
            })
            .collect();

        if !shelf.is_empty() {
            catalog.insert(category, shelf);
        }
    }

    catalog
}

/// Replaces every known-category key in `raw` with `catalog`, leaving other
/// keys as they were.
fn encode(raw: &mut RawCatalog, catalog: &ProductCatalog) -> StoreResult<()> {
    raw.retain(|key, _| key.parse::<Category>().is_err());
    for (category, shelf) in catalog {
        raw.insert(category.as_str().to_string(), serde_json::to_value(shelf)?);
    }
    Ok(())
}

fn find_mut<'a>(
    catalog: &'a mut ProductCatalog,
    category: Category,
    name: &str,
) -> StoreResult<&'a mut Product> {
    catalog
        .get_mut(&category)
        .ok_or_else(|| StoreError::not_found("Category", category.as_str()))?
        .iter_mut()
        .find(|p| p.matches(name))
        .ok_or_else(|| StoreError::not_found("Product", name))
}

// =============================================================================
// Unit Tests
// =============================================================================
