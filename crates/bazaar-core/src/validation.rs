//! # Validation Module
//!
//! Sanitation of basket payloads read back from durable storage.
//!
//! ## Why Sanitize?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      The Durable Slot Is Not Trusted                    │
//! │                                                                         │
//! │  The slot payload is rewritten wholesale on every mutation, so under   │
//! │  normal operation it always satisfies the basket invariants. But the   │
//! │  slot outlives any one process: an older build, a manual edit, or a    │
//! │  partial write can leave lines that violate them.                      │
//! │                                                                         │
//! │  Invariants restored here:                                             │
//! │  ├── quantity >= 1        (lines at 0 or below are dropped)            │
//! │  └── unique product_id    (first occurrence wins, later ones dropped)  │
//! │                                                                         │
//! │  An unparsable payload never reaches this module: the store treats     │
//! │  it the same as an absent slot and starts from an empty basket.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::types::{Basket, BasketLine};

/// Restores basket invariants on lines deserialized from the durable slot.
///
/// ## Rules
/// - Lines with `quantity < 1` are dropped (they must never have been
///   persisted; tolerate them anyway)
/// - Duplicate `product_id` lines are collapsed, keeping the first
/// - Surviving line order is preserved
///
/// ## Example
/// ```rust
/// use bazaar_core::validation::sanitize_lines;
/// use bazaar_core::{BasketLine, Money};
/// use chrono::Utc;
///
/// let lines = vec![BasketLine {
///     product_id: "p1".into(),
///     name: "Bread".into(),
///     unit_price: Money::from_cents(350),
///     quantity: 0, // invalid
///     added_at: Utc::now(),
/// }];
///
/// let basket = sanitize_lines(lines);
/// assert!(basket.is_empty());
/// ```
pub fn sanitize_lines(lines: Vec<BasketLine>) -> Basket {
    let mut seen: HashSet<String> = HashSet::new();
    let mut sane = Vec::with_capacity(lines.len());

    for line in lines {
        if line.quantity < 1 {
            continue;
        }
        if !seen.insert(line.product_id.clone()) {
            continue;
        }
        sane.push(line);
    }

    Basket { lines: sane }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use chrono::Utc;

    fn line(product_id: &str, quantity: i64) -> BasketLine {
        BasketLine {
            product_id: product_id.to_string(),
            name: format!("Product {}", product_id),
            unit_price: Money::from_cents(100),
            quantity,
            added_at: Utc::now(),
        }
    }

    #[test]
    fn test_valid_lines_pass_through_in_order() {
        let basket = sanitize_lines(vec![line("a", 1), line("b", 3)]);

        assert_eq!(basket.line_count(), 2);
        assert_eq!(basket.lines[0].product_id, "a");
        assert_eq!(basket.lines[1].product_id, "b");
    }

    #[test]
    fn test_zero_and_negative_quantities_dropped() {
        let basket = sanitize_lines(vec![line("a", 0), line("b", -2), line("c", 1)]);

        assert_eq!(basket.line_count(), 1);
        assert_eq!(basket.lines[0].product_id, "c");
    }

    #[test]
    fn test_duplicate_product_keeps_first() {
        let mut second = line("a", 5);
        second.unit_price = Money::from_cents(999);

        let basket = sanitize_lines(vec![line("a", 2), second]);

        assert_eq!(basket.line_count(), 1);
        assert_eq!(basket.lines[0].quantity, 2);
        assert_eq!(basket.lines[0].unit_price, Money::from_cents(100));
    }

    #[test]
    fn test_empty_input_yields_empty_basket() {
        assert!(sanitize_lines(Vec::new()).is_empty());
    }
}
