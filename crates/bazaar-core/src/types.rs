//! # Domain Types
//!
//! Core domain types for the Bazaar basket.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   BasketLine    │   │     Basket      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │──►│  product_id     │◄──│  lines (Vec)    │       │
//! │  │  name           │   │  name (frozen)  │   │  unique by      │       │
//! │  │  price_cents    │   │  unit_price     │   │  product_id     │       │
//! │  └─────────────────┘   │  quantity ≥ 1   │   └─────────────────┘       │
//! │    owned by the        └─────────────────┘                             │
//! │    catalog, never                                                      │
//! │    by this crate       ┌─────────────────┐   ┌─────────────────┐       │
//! │                        │  QuantityDelta  │   │   BasketState   │       │
//! │                        │  Increment      │   │   Present       │       │
//! │                        │  Decrement      │   │   Empty         │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Price Freezing
//! A `BasketLine` snapshots the product's name and price at add time. If the
//! catalog changes afterwards, the basket keeps displaying what the shopper
//! agreed to; nothing here re-fetches product data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A catalog product, as supplied by the external catalog collaborator.
///
/// The basket never validates that the product still exists or that the
/// price is current; it only snapshots these fields into a [`BasketLine`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown in the catalog and the basket.
    pub name: String,

    /// Optional description for product details.
    pub description: Option<String>,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Image location in object storage (display only).
    pub image_url: Option<String>,

    /// Category this product is filed under.
    pub category_id: Option<String>,
}

// =============================================================================
// Basket Line
// =============================================================================

/// One entry in the basket.
///
/// ## Design Notes
/// - `product_id`: Reference to the product (for catalog lookup)
/// - `name` / `unit_price`: Frozen copies of product data at time of adding.
///   This ensures the basket displays consistent data even if the product
///   is updated in the catalog after being added.
///
/// ## Invariant
/// `quantity >= 1` always. A line that would reach 0 is removed from the
/// basket instead; zero-quantity lines are never serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketLine {
    /// Product ID (UUID)
    pub product_id: String,

    /// Product name at time of adding (frozen)
    pub name: String,

    /// Price in cents at time of adding (frozen)
    /// This is critical: we lock in the price when added to the basket
    pub unit_price: Money,

    /// Quantity in the basket (always >= 1)
    pub quantity: i64,

    /// When this line was added to the basket
    pub added_at: DateTime<Utc>,
}

impl BasketLine {
    /// Creates a new basket line from a product with quantity 1.
    ///
    /// ## Price Freezing
    /// The price is captured at this moment. If the product price changes
    /// in the catalog, this line retains the original price.
    pub fn from_product(product: &Product) -> Self {
        BasketLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: Money::from_cents(product.price_cents),
            quantity: 1,
            added_at: Utc::now(),
        }
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Quantity Delta
// =============================================================================

/// A single-step quantity adjustment on an existing basket line.
///
/// The storefront's +/- controls only ever move one unit at a time, so this
/// is an enum rather than a raw signed integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityDelta {
    /// Add one unit. Always applies.
    Increment,

    /// Remove one unit. Applies only while quantity > 1; removal of the
    /// last unit is a distinct, explicit operation (`remove`).
    Decrement,
}

// =============================================================================
// Basket State
// =============================================================================

/// The two externally visible basket states.
///
/// ```text
/// ┌─────────┐   first add    ┌─────────┐
/// │  Empty  │ ─────────────► │ Present │
/// │         │ ◄───────────── │         │
/// └─────────┘  last remove   └─────────┘
/// ```
///
/// UI surfaces branch on this: `Present` shows the line list, `Empty` shows
/// the empty-basket indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasketState {
    /// At least one line.
    Present,

    /// No lines.
    Empty,
}

// =============================================================================
// Basket
// =============================================================================

/// The shopping basket.
///
/// ## Invariants
/// - Lines are unique by `product_id` (adding the same product again
///   increases quantity)
/// - Quantity is always >= 1 (quantity cannot be decremented below 1;
///   `remove` is the only way a line leaves the basket)
/// - Line order is insertion order and survives serialization
///
/// Serializes transparently as the array of lines, which is exactly the
/// durable slot payload format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Basket {
    /// Lines in the basket, in insertion order.
    pub lines: Vec<BasketLine>,
}

impl Basket {
    /// Creates a new empty basket.
    pub fn new() -> Self {
        Basket { lines: Vec::new() }
    }

    /// Adds a product to the basket, or increments quantity if already present.
    pub fn add(&mut self, product: &Product) {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.product_id == product.id)
        {
            line.quantity += 1;
            return;
        }
        self.lines.push(BasketLine::from_product(product));
    }

    /// Applies a one-step quantity adjustment to the line for `product_id`.
    ///
    /// ## Behavior
    /// - `Increment`: adds 1 unconditionally
    /// - `Decrement`: subtracts 1 only while quantity > 1 (floor invariant)
    /// - Unknown `product_id`: no-op
    ///
    /// ## Returns
    /// `true` if a line actually changed.
    pub fn adjust_quantity(&mut self, product_id: &str, delta: QuantityDelta) -> bool {
        let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) else {
            return false;
        };

        match delta {
            QuantityDelta::Increment => {
                line.quantity += 1;
                true
            }
            QuantityDelta::Decrement if line.quantity > 1 => {
                line.quantity -= 1;
                true
            }
            QuantityDelta::Decrement => false,
        }
    }

    /// Removes the line matching `product_id`, if present.
    ///
    /// ## Returns
    /// `true` if a line was removed.
    pub fn remove(&mut self, product_id: &str) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() != initial_len
    }

    /// Clears all lines from the basket.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Returns the line for `product_id`, if present.
    pub fn line(&self, product_id: &str) -> Option<&BasketLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    /// Returns the number of unique lines in the basket.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity of all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Calculates the basket total: `sum(unit_price × quantity)`.
    ///
    /// An empty basket totals zero.
    pub fn total_price(&self) -> Money {
        self.lines.iter().map(BasketLine::line_total).sum()
    }

    /// Checks if the basket is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the externally visible basket state.
    pub fn state(&self) -> BasketState {
        if self.lines.is_empty() {
            BasketState::Empty
        } else {
            BasketState::Present
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn test_product(name: &str, price_cents: i64) -> Product {
        Product {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description: None,
            price_cents,
            image_url: None,
            category_id: None,
        }
    }

    #[test]
    fn test_add_new_product_starts_at_quantity_one() {
        let mut basket = Basket::new();
        let product = test_product("Rye bread", 350);

        basket.add(&product);

        assert_eq!(basket.line_count(), 1);
        let line = basket.line(&product.id).unwrap();
        assert_eq!(line.quantity, 1);
        assert_eq!(line.unit_price, Money::from_cents(350));
    }

    #[test]
    fn test_add_same_product_increments() {
        let mut basket = Basket::new();
        let product = test_product("Rye bread", 350);

        basket.add(&product);
        basket.add(&product);
        basket.add(&product);

        assert_eq!(basket.line_count(), 1); // Still one unique line
        assert_eq!(basket.line(&product.id).unwrap().quantity, 3);
    }

    #[test]
    fn test_increment_adds_one_each_time() {
        let mut basket = Basket::new();
        let product = test_product("Olives", 499);
        basket.add(&product);

        for expected in 2..=5 {
            assert!(basket.adjust_quantity(&product.id, QuantityDelta::Increment));
            assert_eq!(basket.line(&product.id).unwrap().quantity, expected);
        }
    }

    #[test]
    fn test_decrement_floors_at_one() {
        let mut basket = Basket::new();
        let product = test_product("Olives", 499);
        basket.add(&product);

        // quantity == 1: decrement must be a no-op
        assert!(!basket.adjust_quantity(&product.id, QuantityDelta::Decrement));
        assert_eq!(basket.line(&product.id).unwrap().quantity, 1);
    }

    #[test]
    fn test_decrement_from_two_reaches_one() {
        let mut basket = Basket::new();
        let product = test_product("Milk", 1000);
        basket.add(&product);
        basket.add(&product); // qty 2

        assert!(basket.adjust_quantity(&product.id, QuantityDelta::Decrement));
        assert_eq!(basket.line(&product.id).unwrap().quantity, 1);
        assert_eq!(basket.total_price(), Money::from_cents(1000));
    }

    #[test]
    fn test_adjust_unknown_product_is_noop() {
        let mut basket = Basket::new();
        let product = test_product("Milk", 1000);
        basket.add(&product);

        assert!(!basket.adjust_quantity("no-such-id", QuantityDelta::Increment));
        assert_eq!(basket.line(&product.id).unwrap().quantity, 1);
        assert_eq!(basket.line_count(), 1);
    }

    #[test]
    fn test_remove_last_line_transitions_to_empty() {
        let mut basket = Basket::new();
        let product = test_product("Milk", 1000);
        basket.add(&product);
        assert_eq!(basket.state(), BasketState::Present);

        assert!(basket.remove(&product.id));

        assert!(basket.is_empty());
        assert_eq!(basket.state(), BasketState::Empty);
        assert_eq!(basket.total_price(), Money::zero());
    }

    #[test]
    fn test_remove_absent_product_is_noop() {
        let mut basket = Basket::new();
        basket.add(&test_product("Milk", 1000));

        assert!(!basket.remove("no-such-id"));
        assert_eq!(basket.line_count(), 1);
    }

    #[test]
    fn test_total_price_sums_all_lines() {
        let mut basket = Basket::new();
        let bread = test_product("Bread", 350);
        let wine = test_product("Wine", 1250);

        basket.add(&bread);
        basket.add(&wine);
        basket.add(&wine); // wine qty 2

        // 350 + 2 × 1250
        assert_eq!(basket.total_price(), Money::from_cents(2850));
        assert_eq!(basket.total_quantity(), 3);
    }

    #[test]
    fn test_empty_basket_totals_zero() {
        let basket = Basket::new();
        assert_eq!(basket.total_price(), Money::zero());
        assert_eq!(basket.state(), BasketState::Empty);
    }

    #[test]
    fn test_serializes_as_line_array() {
        let mut basket = Basket::new();
        basket.add(&test_product("Bread", 350));

        let json = serde_json::to_value(&basket).unwrap();
        assert!(json.is_array());
        assert_eq!(json.as_array().unwrap().len(), 1);
        // camelCase wire keys, matching the historical slot payload
        assert!(json[0].get("productId").is_some());
        assert!(json[0].get("unitPrice").is_some());
        assert!(json[0].get("quantity").is_some());
    }

    #[test]
    fn test_line_order_is_insertion_order() {
        let mut basket = Basket::new();
        let first = test_product("First", 100);
        let second = test_product("Second", 200);
        basket.add(&first);
        basket.add(&second);
        basket.add(&first); // increments, must not reorder

        assert_eq!(basket.lines[0].product_id, first.id);
        assert_eq!(basket.lines[1].product_id, second.id);
    }
}
