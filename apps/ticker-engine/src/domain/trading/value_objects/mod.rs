//! Trading value objects.

mod receipt;

pub use receipt::{TradeReceipt, TradeSide};
