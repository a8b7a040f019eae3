//! # Repository Module
//!
//! One store per JSON document family.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Mart facade                                                            │
//! │       │                                                                 │
//! │       │  mart.products().reduce_stock(Category::Books, "Dune", 1)      │
//! │       ▼                                                                 │
//! │  ProductStore / UserStore / BillStore                                   │
//! │       │                                                                 │
//! │       │  JsonDocument::update (lock, read, mutate, atomic save)        │
//! │       ▼                                                                 │
//! │  products.txt   admin.txt + cashiers.txt   bills.txt                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Stores
//!
//! - [`ProductStore`](product::ProductStore) - Category shelves and stock
//! - [`UserStore`](user::UserStore) - Admin and cashier credentials
//! - [`BillStore`](bill::BillStore) - Sales history

pub mod bill;
pub mod product;
pub mod user;
