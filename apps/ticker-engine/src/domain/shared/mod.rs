//! Shared Domain Types
//!
//! Value objects and rules shared across bounded contexts.

pub mod rules;
pub mod value_objects;

pub use rules::GameRules;
pub use value_objects::{InstrumentId, Money, Shares};
