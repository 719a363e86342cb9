//! Stock level classification for the stock management view.

use serde::{Deserialize, Serialize};

/// Coarse stock level of a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    /// Zero, negative, or unknown inventory.
    OutOfStock,
    /// Fewer than [`StockLevel::LOW_THRESHOLD`] units.
    Low,
    InStock,
}

impl StockLevel {
    /// Quantities strictly below this are reported as low.
    pub const LOW_THRESHOLD: i64 = 5;

    /// Classify an inventory quantity. Negative quantities are allowed upstream.
    #[must_use]
    pub const fn classify(quantity: Option<i64>) -> Self {
        match quantity {
            None => Self::OutOfStock,
            Some(q) if q <= 0 => Self::OutOfStock,
            Some(q) if q < Self::LOW_THRESHOLD => Self::Low,
            Some(_) => Self::InStock,
        }
    }
}
