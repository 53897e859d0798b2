//! Shopping Cart Business Logic Helpers
//!
//! Small pure functions used when shaping responses and log lines.

use super::models::Item;

/// Rounds a price to two decimal places, halves away from zero.
pub fn round_price(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Produces a human-readable one-line summary for a list of cart items.
///
/// Example output: `"5x #42, 3x #24"`.
pub fn format_item_summary(items: &[Item]) -> String {
    items
        .iter()
        .map(|i| format!("{}x #{}", i.quantity, i.product_id))
        .collect::<Vec<_>>()
        .join(", ")
}
