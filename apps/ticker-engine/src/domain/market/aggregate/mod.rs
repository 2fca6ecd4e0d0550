//! Market aggregates.

mod instrument;
mod market;

pub use instrument::Instrument;
pub use market::Market;
