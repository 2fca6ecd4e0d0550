//! Market Bounded Context
//!
//! The ordered instrument collection and its dice-driven mutations: price
//! movements, splits, delistings, and dividend distribution. Corporate
//! actions broadcast to every portfolio atomically with the price reset.

pub mod aggregate;
pub mod events;

pub use aggregate::{Instrument, Market};
pub use events::{DividendOutcome, DividendPayout, PriceMovement};
