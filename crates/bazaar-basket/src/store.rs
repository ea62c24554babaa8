//! # Basket Store
//!
//! The canonical owner of the in-process basket.
//!
//! ## Synchronization Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    BasketStore Data Flow                                │
//! │                                                                         │
//! │  Mutation (add / set_quantity / remove / clear)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. Clone canonical basket, apply the pure mutation (bazaar-core)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. Serialize and write the WHOLE basket to the durable slot           │
//! │       │         (slot write fails → error out, canonical unchanged)    │
//! │       ▼                                                                 │
//! │  3. Commit the mutated basket as the new canonical copy                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  4. publish_change() → every observer re-runs load() and refreshes     │
//! │                                                                         │
//! │  The in-memory basket is the single source of truth while the process  │
//! │  runs; the slot is a serialized mirror, rewritten on every mutation    │
//! │  and never merged.                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wiring
//! One `BasketStore` is constructed at application start, wrapped in an
//! `Arc`, and handed to every surface that shows or mutates the basket.
//! There is no global instance; the shared `Arc` is the only coupling.

use std::sync::Mutex;

use tracing::{debug, warn};

use bazaar_core::{sanitize_lines, Basket, BasketLine, BasketState, Money, Product, QuantityDelta};

use crate::error::StoreResult;
use crate::notify::{ChangeBus, Subscription};
use crate::slot::{DurableSlot, BASKET_SLOT_KEY};

/// Owns the canonical basket, its durable mirror, and the change bus.
#[derive(Debug)]
pub struct BasketStore {
    /// The durable key-value slot (serialized mirror).
    slot: DurableSlot,

    /// Canonical in-memory basket.
    ///
    /// Guarded so a shared `Arc<BasketStore>` can be handed to every
    /// surface. The lock is never held while observers run.
    basket: Mutex<Basket>,

    /// Broadcast channel for change notifications.
    bus: ChangeBus,
}

impl BasketStore {
    /// Opens a store over the slot database at `path`.
    ///
    /// The durable basket (if any) is loaded immediately and becomes the
    /// canonical copy; an absent or unparsable payload yields an empty
    /// basket.
    pub fn open(path: impl AsRef<std::path::Path>) -> StoreResult<Self> {
        Ok(Self::from_slot(DurableSlot::open(path)?))
    }

    /// Opens a store over an in-memory slot (tests, demos).
    pub fn in_memory() -> StoreResult<Self> {
        Ok(Self::from_slot(DurableSlot::in_memory()?))
    }

    /// Builds a store over an already-opened slot.
    ///
    /// This is the injection seam: the application shell opens the slot,
    /// builds one store, and wires subscribers to it explicitly.
    pub fn from_slot(slot: DurableSlot) -> Self {
        let store = BasketStore {
            slot,
            basket: Mutex::new(Basket::new()),
            bus: ChangeBus::new(),
        };
        store.load();
        store
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Re-reads the durable slot and returns the basket.
    ///
    /// ## Soft Failure
    /// An absent slot and an unparsable payload are treated identically:
    /// the result is an empty basket, never an error. Unparsable payloads
    /// are logged at `warn`.
    ///
    /// The freshly read lines are sanitized — so the `quantity >= 1` and
    /// unique-product invariants hold even for payloads written by something
    /// other than this store — and the result becomes the canonical
    /// in-memory copy.
    pub fn load(&self) -> Basket {
        let basket = match self.slot.read(BASKET_SLOT_KEY) {
            None => Basket::new(),
            Some(payload) => match serde_json::from_str::<Vec<BasketLine>>(&payload) {
                Ok(lines) => sanitize_lines(lines),
                Err(e) => {
                    warn!(error = %e, "Unparsable basket payload, starting empty");
                    Basket::new()
                }
            },
        };

        *self.basket.lock().expect("Basket mutex poisoned") = basket.clone();
        basket
    }

    /// Calculates the basket total: `sum(unit_price × quantity)`.
    ///
    /// An empty basket totals zero.
    pub fn total_price(&self) -> Money {
        self.basket
            .lock()
            .expect("Basket mutex poisoned")
            .total_price()
    }

    /// Returns the externally visible basket state (`Present` / `Empty`).
    pub fn state(&self) -> BasketState {
        self.basket.lock().expect("Basket mutex poisoned").state()
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Adds a product to the basket (quantity 1), or increments the
    /// existing line. This is the `Empty -> Present` transition origin:
    /// the catalog view calls it instead of touching the slot directly.
    pub fn add(&self, product: &Product) -> StoreResult<()> {
        debug!(product_id = %product.id, "add");

        let mut basket = self.snapshot();
        basket.add(product);
        self.commit(basket)
    }

    /// Applies a one-step quantity adjustment to the line for `product_id`.
    ///
    /// ## Behavior
    /// - `Increment`: adds 1 unconditionally
    /// - `Decrement`: subtracts 1 only while quantity > 1; removal of the
    ///   last unit is a distinct, explicit operation ([`remove`](Self::remove))
    /// - Unknown `product_id`: nothing changes and nothing is written, but a
    ///   change notification is STILL published. Historical behavior kept on
    ///   purpose; observers must tolerate refreshes that change nothing.
    pub fn set_quantity(&self, product_id: &str, delta: QuantityDelta) -> StoreResult<()> {
        debug!(product_id = %product_id, ?delta, "set_quantity");

        let mut basket = self.snapshot();
        if basket.adjust_quantity(product_id, delta) {
            self.commit(basket)
        } else {
            debug!(product_id = %product_id, "set_quantity changed nothing, notifying anyway");
            self.bus.publish();
            Ok(())
        }
    }

    /// Deletes the line matching `product_id`, if present.
    ///
    /// No-op when absent — but the change notification is still published
    /// (same historical behavior as [`set_quantity`](Self::set_quantity)).
    pub fn remove(&self, product_id: &str) -> StoreResult<()> {
        debug!(product_id = %product_id, "remove");

        let mut basket = self.snapshot();
        if basket.remove(product_id) {
            self.commit(basket)
        } else {
            debug!(product_id = %product_id, "remove matched nothing, notifying anyway");
            self.bus.publish();
            Ok(())
        }
    }

    /// Empties the basket. Called by checkout once an order is placed.
    pub fn clear(&self) -> StoreResult<()> {
        debug!("clear");

        let mut basket = self.snapshot();
        basket.clear();
        self.commit(basket)
    }

    // -------------------------------------------------------------------------
    // Notifications
    // -------------------------------------------------------------------------

    /// Registers an observer for change notifications.
    ///
    /// Observers receive no payload; each one re-runs [`load`](Self::load)
    /// (or whatever read it needs) and refreshes its own view. Delivery is
    /// synchronous and in registration order.
    pub fn subscribe(&self, observer: impl Fn() + Send + Sync + 'static) -> Subscription {
        self.bus.subscribe(observer)
    }

    /// Unregisters a previously subscribed observer.
    pub fn unsubscribe(&self, subscription: Subscription) {
        self.bus.unsubscribe(subscription)
    }

    /// Broadcasts a change signal to all current observers.
    ///
    /// Every mutation calls this after persisting; it is public so that a
    /// collaborator performing an out-of-band slot write can trigger the
    /// same refresh path.
    pub fn publish_change(&self) {
        self.bus.publish();
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Clones the canonical basket for mutation.
    fn snapshot(&self) -> Basket {
        self.basket.lock().expect("Basket mutex poisoned").clone()
    }

    /// Persists `basket` wholesale, commits it as canonical, and notifies.
    ///
    /// Order matters: if the slot write fails, the canonical copy stays
    /// untouched and no notification goes out.
    fn commit(&self, basket: Basket) -> StoreResult<()> {
        let payload = serde_json::to_string(&basket)?;
        self.slot.write(BASKET_SLOT_KEY, &payload)?;

        *self.basket.lock().expect("Basket mutex poisoned") = basket;

        // Lock released above: observers may re-enter load() freely.
        self.bus.publish();
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
