//! # mart-store: Persistence Layer for Smart Mart
//!
//! JSON flat-file stores for products, users and bills, plus the [`Mart`]
//! facade the screens call.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Smart Mart Data Flow                             │
//! │                                                                         │
//! │  Login / Admin panel / Cashier panel                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   mart-store (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │     Mart      │    │  Repositories │    │ JsonDocument │  │   │
//! │  │   │  (facade.rs)  │───►│ ProductStore  │───►│  lock, read, │  │   │
//! │  │   │ login, cart,  │    │ UserStore     │    │  atomic save │  │   │
//! │  │   │ checkout      │    │ BillStore     │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  products.txt   admin.txt   cashiers.txt   bills.txt                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`config`] - File locations, password scheme, card discount
//! - [`document`] - Whole-file JSON documents
//! - [`error`] - Store error types
//! - [`password`] - Argon2 and legacy SHA-256 password hashes
//! - [`repository`] - Product, user and bill stores
//! - [`facade`] - The `Mart` facade
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mart_core::{Cart, Category, PaymentMethod};
//! use mart_store::{Mart, MartConfig};
//!
//! let mart = Mart::new(MartConfig::new("./data"))?;
//!
//! let mut cart = Cart::new();
//! cart.add(mart.add_to_cart(Category::Electronics, "Laptop", 2)?)?;
//!
//! let receipt = mart.checkout(&cart, PaymentMethod::Card)?;
//! println!("Bill {} charged {}", receipt.bill.bill_number, receipt.total);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod document;
pub mod error;
pub mod facade;
pub mod password;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{FileNames, MartConfig, DEFAULT_ADMIN_PASSWORD};
pub use document::JsonDocument;
pub use error::{StoreError, StoreResult};
pub use facade::{Mart, Receipt};
pub use password::{PasswordHasher, PasswordScheme};

// Repository re-exports for convenience
pub use repository::bill::BillStore;
pub use repository::product::{ProductCatalog, ProductStore};
pub use repository::user::{AdminRecord, CashierTable, UserStore};
