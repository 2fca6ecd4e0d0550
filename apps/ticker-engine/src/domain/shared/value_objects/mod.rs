//! Shared Value Objects
//!
//! Immutable domain types used across bounded contexts.
//! Value objects are compared by value, not identity.

mod identifiers;
mod money;
mod shares;

pub use identifiers::InstrumentId;
pub use money::Money;
pub use shares::Shares;
