//! Domain layer.
//!
//! Organized as bounded contexts. `market` owns instruments and price
//! movement, `portfolio` owns player balances and holdings, `trading`
//! validates and executes trades, and `shared` holds the value objects
//! the contexts exchange.

pub mod market;
pub mod portfolio;
pub mod shared;
pub mod trading;
