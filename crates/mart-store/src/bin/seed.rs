//! # Seed Data Generator
//!
//! Stocks an empty store with sample products for development.
//!
//! ## Usage
//! ```bash
//! # Seed the data directory from mart.toml / MART_DATA_DIR (default: .)
//! cargo run -p mart-store --bin seed
//!
//! # Seed a specific directory and register a demo cashier
//! cargo run -p mart-store --bin seed -- --data-dir ./data --cashier john:password123
//! ```
//!
//! Seeding is skipped when the product file already holds products.

use std::env;
use std::path::PathBuf;

use mart_core::{Category, Money};
use mart_store::{Mart, MartConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Sample shelves: (category, name, price in cents, stock).
const PRODUCTS: &[(Category, &str, i64, i64)] = &[
    (Category::Electronics, "Laptop", 99999, 5),
    (Category::Electronics, "Smartphone", 59999, 10),
    (Category::Electronics, "Headphones", 7999, 25),
    (Category::Electronics, "USB Cable", 999, 100),
    (Category::Groceries, "Bread", 299, 20),
    (Category::Groceries, "Milk", 399, 15),
    (Category::Groceries, "Eggs Dozen", 449, 30),
    (Category::Groceries, "Rice 5kg", 1299, 12),
    (Category::Clothing, "T-Shirt", 1499, 40),
    (Category::Clothing, "Jeans", 4999, 18),
    (Category::Clothing, "Jacket", 8999, 6),
    (Category::Books, "Dune", 1299, 8),
    (Category::Books, "Cookbook", 2499, 4),
    (Category::Books, "Atlas", 3499, 2),
    (Category::Beauty, "Shampoo", 699, 22),
    (Category::Beauty, "Lipstick", 1199, 14),
    (Category::Beauty, "Face Cream", 1899, 9),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut data_dir: Option<PathBuf> = None;
    let mut cashier: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data-dir" | "-d" => {
                if i + 1 < args.len() {
                    data_dir = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--cashier" | "-c" => {
                if i + 1 < args.len() {
                    cashier = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Smart Mart Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --data-dir <PATH>          Data directory (default: from mart.toml or .)");
                println!("  -c, --cashier <NAME:PASSWORD>  Also register a demo cashier");
                println!("  -h, --help                     Show this help message");
                return Ok(());
            }
            other => warn!(arg = other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let mut config = MartConfig::load_or_default(None);
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }

    println!("🌱 Smart Mart Seed Data Generator");
    println!("=================================");
    println!("Data dir: {}", config.data_dir.display());
    println!();

    let mart = Mart::new(config)?;
    println!("✓ Admin account ready");

    if let Some(spec) = cashier {
        let (name, password) = spec
            .split_once(':')
            .ok_or("--cashier expects NAME:PASSWORD")?;
        match mart.add_cashier(name, password) {
            Ok(()) => println!("✓ Cashier '{}' registered", name),
            Err(e) => eprintln!("⚠ Cashier '{}' not registered: {}", name, e),
        }
    }

    let existing = mart.products().count()?;
    if existing > 0 {
        println!("⚠ Store already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the product file to regenerate.");
        return Ok(());
    }

    let mut generated = 0;
    for &(category, name, cents, stock) in PRODUCTS {
        if let Err(e) = mart.add_product(category, name, Money::from_cents(cents), stock) {
            eprintln!("Failed to add {}/{}: {}", category, name, e);
            continue;
        }
        generated += 1;
    }

    info!(generated, "Seed complete");
    println!();
    println!("✓ Added {} products across {} categories", generated, Category::ALL.len());
    for category in Category::ALL {
        let shelf = mart.get_products_by_category(category)?;
        println!("  {:<12} {} products", category.as_str(), shelf.len());
    }

    Ok(())
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - Default: INFO, DEBUG for the mart crates
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,mart=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
