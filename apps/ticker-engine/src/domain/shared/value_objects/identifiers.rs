//! Strongly-typed identifier for instruments.
//!
//! Holdings, dice outcomes, and trade requests all address instruments by
//! market position. The newtype keeps those positions from being confused
//! with ordinary counters.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for an instrument: its stable position in the market.
///
/// The market's order is fixed at setup, so the position names the same
/// instrument for the whole game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstrumentId(usize);

impl InstrumentId {
    /// Create an identifier from a market position.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the market position.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for InstrumentId {
    fn from(value: usize) -> Self {
        Self(value)
    }
}
