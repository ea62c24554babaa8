//! # Change Bus
//!
//! The broadcast channel that keeps independent basket views in sync.
//!
//! ## Notification Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Change Bus Protocol                                  │
//! │                                                                         │
//! │  Mutation origin (any surface)          Observers (any surface)        │
//! │  ─────────────────────────────          ───────────────────────        │
//! │                                                                         │
//! │  basket page "+" button ──┐                                            │
//! │  catalog "add to basket" ─┼──► publish() ──► badge callback    (1st)   │
//! │  checkout "clear"        ─┘         │    ──► page callback     (2nd)   │
//! │                                     │    ──► checkout callback (3rd)   │
//! │                                     │                                   │
//! │  • No payload: observers re-pull state themselves (load())             │
//! │  • Delivery is synchronous, in registration order, before publish()    │
//! │    returns to the mutating caller                                      │
//! │  • No replay: an observer registered after a publish does not see it   │
//! │                                                                         │
//! │  The bus is the ONLY coupling between mutation origins and consumers:  │
//! │  the badge never holds a reference to the checkout page, or vice versa │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Re-entrancy
//! The registration list is snapshotted before delivery, so an observer may
//! subscribe, unsubscribe, or call back into the store while being notified
//! without deadlocking the bus.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::debug;

/// An observer callback. Carries no payload; observers re-pull state.
pub type Observer = Arc<dyn Fn() + Send + Sync + 'static>;

/// Handle returned by [`ChangeBus::subscribe`], used to unregister.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping the handle without unsubscribing leaks the observer registration"]
pub struct Subscription(u64);

/// One-to-many, multicast, replay-none notification channel.
///
/// Observers are invoked synchronously in registration order on the thread
/// that calls [`publish`](ChangeBus::publish).
#[derive(Default)]
pub struct ChangeBus {
    /// Registered observers, in registration order.
    observers: Mutex<Vec<(u64, Observer)>>,

    /// Monotonic id source for subscriptions.
    next_id: AtomicU64,
}

impl ChangeBus {
    /// Creates a bus with no observers.
    pub fn new() -> Self {
        ChangeBus::default()
    }

    /// Registers `observer` and returns its subscription handle.
    ///
    /// Observers registered during an in-flight [`publish`](ChangeBus::publish)
    /// are not invoked for that publish (no replay), only for later ones.
    pub fn subscribe(&self, observer: impl Fn() + Send + Sync + 'static) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.observers
            .lock()
            .expect("Bus mutex poisoned")
            .push((id, Arc::new(observer)));

        debug!(subscription = id, "Observer subscribed");
        Subscription(id)
    }

    /// Unregisters the observer behind `subscription`.
    ///
    /// Unsubscribing an already-removed handle is a no-op.
    pub fn unsubscribe(&self, subscription: Subscription) {
        self.observers
            .lock()
            .expect("Bus mutex poisoned")
            .retain(|(id, _)| *id != subscription.0);

        debug!(subscription = subscription.0, "Observer unsubscribed");
    }

    /// Returns the number of currently registered observers.
    pub fn observer_count(&self) -> usize {
        self.observers.lock().expect("Bus mutex poisoned").len()
    }

    /// Broadcasts a payload-less change signal to every registered observer,
    /// in registration order, before returning.
    pub fn publish(&self) {
        // Snapshot under the lock, deliver outside it: observers may
        // re-enter the bus or the store.
        let snapshot: Vec<Observer> = self
            .observers
            .lock()
            .expect("Bus mutex poisoned")
            .iter()
            .map(|(_, obs)| Arc::clone(obs))
            .collect();

        debug!(observers = snapshot.len(), "Publishing basket change");

        for observer in snapshot {
            observer();
        }
    }
}

impl std::fmt::Debug for ChangeBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeBus")
            .field("observers", &self.observer_count())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
