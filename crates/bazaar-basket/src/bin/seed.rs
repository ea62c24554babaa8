//! # Seed Basket Generator
//!
//! Populates a slot database with a demo basket for development, then walks
//! it through a few mutations with two observers wired up, so the whole
//! load → mutate → persist → broadcast loop can be watched in the logs.
//!
//! ## Usage
//! ```bash
//! # Seed ./bazaar_dev.db (default)
//! cargo run -p bazaar-basket --bin seed
//!
//! # Specify the slot database path
//! cargo run -p bazaar-basket --bin seed -- --db ./data/bazaar.db
//!
//! # Watch the store at work
//! RUST_LOG=debug cargo run -p bazaar-basket --bin seed
//! ```

use std::env;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use bazaar_basket::BasketStore;
use bazaar_core::{Product, QuantityDelta};

/// Demo catalog: (name, price in cents).
const DEMO_PRODUCTS: &[(&str, i64)] = &[
    ("Rye bread", 350),
    ("Olive oil 500ml", 1250),
    ("Greek yogurt", 220),
    ("Espresso beans 1kg", 1890),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./bazaar_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Bazaar Seed Basket Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Slot database path (default: ./bazaar_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let store = Arc::new(BasketStore::open(&db_path)?);

    // Wire the two demo observers the way the storefront shell would:
    // the badge first, the checkout summary second.
    let badge = Arc::clone(&store);
    let _badge_sub = store.subscribe(move || {
        let basket = badge.load();
        println!("  [badge]    {} item(s)", basket.total_quantity());
    });

    let checkout = Arc::clone(&store);
    let _checkout_sub = store.subscribe(move || {
        let basket = checkout.load();
        println!(
            "  [checkout] {} line(s), total {}",
            basket.line_count(),
            basket.total_price()
        );
    });

    println!("Seeding basket into {db_path}");

    let products: Vec<Product> = DEMO_PRODUCTS
        .iter()
        .map(|(name, price_cents)| Product {
            id: Uuid::new_v4().to_string(),
            name: (*name).to_string(),
            description: None,
            price_cents: *price_cents,
            image_url: None,
            category_id: None,
        })
        .collect();

    for product in &products {
        println!("add {}", product.name);
        store.add(product)?;
    }

    println!("one more loaf");
    store.set_quantity(&products[0].id, QuantityDelta::Increment)?;

    println!("second thoughts about the espresso");
    store.remove(&products[3].id)?;

    let basket = store.load();
    println!(
        "Done: {} line(s), {} item(s), total {}",
        basket.line_count(),
        basket.total_quantity(),
        basket.total_price()
    );

    Ok(())
}
