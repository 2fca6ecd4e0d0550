//! Trading bounded context: lot validation and atomic trade execution.

pub mod errors;
pub mod services;
pub mod value_objects;

pub use errors::TradeError;
pub use services::TradeEngine;
pub use value_objects::{TradeReceipt, TradeSide};
