//! Portfolio aggregate.

mod portfolio;

pub use portfolio::Portfolio;
