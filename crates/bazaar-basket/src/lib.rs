//! # bazaar-basket: BasketStore for Bazaar
//!
//! This crate keeps the shopper's basket consistent across independent
//! storefront surfaces: one canonical in-memory basket, a durable SQLite
//! slot mirroring it, and a broadcast channel that tells every registered
//! observer to refresh after each mutation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bazaar Basket Flow                               │
//! │                                                                         │
//! │  Catalog view ──add()──────────┐                                       │
//! │  Basket page ──set_quantity()──┤                                       │
//! │  Basket page ──remove()────────┼─────► ┌───────────────────────────┐   │
//! │  Checkout ────clear()──────────┘       │  BasketStore (store.rs)   │   │
//! │                                        │                           │   │
//! │  Basket badge ◄──┐                     │  ┌─────────┐ ┌─────────┐  │   │
//! │  Basket page  ◄──┼── publish ◄─────────│  │  slot   │ │ notify  │  │   │
//! │  Checkout     ◄──┘   (no payload,      │  │ SQLite  │ │ChangeBus│  │   │
//! │      │               re-pull state)    │  └─────────┘ └─────────┘  │   │
//! │      └── load() ──────────────────────►└───────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`slot`] - The durable key-value slot (wholesale read/write)
//! - [`notify`] - The change bus (register/unregister, ordered delivery)
//! - [`store`] - The BasketStore itself
//! - [`error`] - Store error types
//!
//! ## Usage
//!
//! ```rust
//! use bazaar_basket::BasketStore;
//! use bazaar_core::{Product, QuantityDelta};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), bazaar_basket::StoreError> {
//! // One store at application start, shared with every surface.
//! let store = Arc::new(BasketStore::in_memory()?);
//!
//! // Surfaces subscribe; each refreshes itself on any change.
//! let badge = Arc::clone(&store);
//! let _subscription = store.subscribe(move || {
//!     let basket = badge.load();
//!     // refresh the badge with basket.total_quantity()
//!     let _ = basket.total_quantity();
//! });
//!
//! let bread = Product {
//!     id: "c4f9...".to_string(),
//!     name: "Rye bread".to_string(),
//!     description: None,
//!     price_cents: 350,
//!     image_url: None,
//!     category_id: None,
//! };
//!
//! store.add(&bread)?; // persists, then notifies the badge
//! store.set_quantity(&bread.id, QuantityDelta::Increment)?;
//! assert_eq!(store.total_price().cents(), 700);
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod notify;
pub mod slot;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use notify::{ChangeBus, Subscription};
pub use slot::{DurableSlot, BASKET_SLOT_KEY};
pub use store::BasketStore;
