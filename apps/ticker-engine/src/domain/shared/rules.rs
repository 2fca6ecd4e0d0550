//! Immutable game rules shared by every component.

use serde::{Deserialize, Serialize};

use super::value_objects::Money;

/// The pricing and trading rules fixed at setup.
///
/// Constructed once from configuration and passed explicitly to the
/// components that need it; nothing in the engine reads ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRules {
    /// Baseline price an instrument starts at and resets to after a split
    /// or delisting.
    pub par_price: Money,
    /// An increase that would land at or above this price triggers a split.
    pub split_threshold: Money,
    /// Minimum tradable increment in shares.
    pub lot_size: u64,
    /// Cash every portfolio starts with.
    pub starting_cash: Money,
    /// Cash a portfolio is reset to when it declares bankruptcy.
    pub bankruptcy_floor: Money,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            par_price: Money::from_cents(100),
            split_threshold: Money::from_cents(200),
            lot_size: 500,
            starting_cash: Money::from_cents(500_000),
            bankruptcy_floor: Money::from_cents(100_000),
        }
    }
}
