//! # bazaar-core: Pure Business Logic for Bazaar
//!
//! This crate is the **heart** of the Bazaar basket. It contains all basket
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bazaar Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Storefront Surfaces (external)                     │   │
//! │  │    Catalog view ── Basket badge ── Basket page ── Checkout      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 bazaar-basket (BasketStore)                     │   │
//! │  │        durable slot (SQLite) + change broadcast                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bazaar-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐     ┌───────────┐     ┌─────────────┐          │   │
//! │  │   │   types   │     │   money   │     │ validation  │          │   │
//! │  │   │  Basket   │     │   Money   │     │  sanitize   │          │   │
//! │  │   │BasketLine │     │  (cents)  │     │   lines     │          │   │
//! │  │   └───────────┘     └───────────┘     └─────────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//!
//! ## Example Usage
//!
//! ```rust
//! use bazaar_core::{Basket, Money, Product, QuantityDelta};
//!
//! let product = Product {
//!     id: "9a1c...".to_string(),
//!     name: "Rye bread".to_string(),
//!     description: None,
//!     price_cents: 350,
//!     image_url: None,
//!     category_id: None,
//! };
//!
//! let mut basket = Basket::new();
//! basket.add(&product);
//! basket.adjust_quantity(&product.id, QuantityDelta::Increment);
//!
//! assert_eq!(basket.total_price(), Money::from_cents(700));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use bazaar_core::Money` instead of
// `use bazaar_core::money::Money`

pub use money::Money;
pub use types::{Basket, BasketLine, BasketState, Product, QuantityDelta};
pub use validation::sanitize_lines;
