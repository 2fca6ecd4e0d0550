//! Trading domain services.

mod trade_engine;

pub use trade_engine::TradeEngine;
