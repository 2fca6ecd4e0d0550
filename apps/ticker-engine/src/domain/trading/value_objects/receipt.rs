//! Trade receipts returned by the trading engine.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::{InstrumentId, Money, Shares};

/// Trade side (buy or sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeSide {
    /// Shares bought for cash.
    Buy,
    /// Shares sold for cash.
    Sell,
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// Record of one executed trade.
///
/// Issued only after a request passed validation and was fully applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeReceipt {
    /// Which way the trade went.
    pub side: TradeSide,
    /// Instrument traded.
    pub instrument: InstrumentId,
    /// Instrument name at execution time.
    pub instrument_name: String,
    /// Shares moved.
    pub shares: Shares,
    /// Price per share at execution, in hundredths.
    pub unit_price: Money,
    /// Cash moved: debited for a buy, credited for a sell.
    pub total: Money,
}

impl TradeReceipt {
    /// Cash remaining is reported by the portfolio; the receipt records the
    /// trade itself.
    #[must_use]
    pub fn new(
        side: TradeSide,
        instrument: InstrumentId,
        instrument_name: impl Into<String>,
        shares: Shares,
        unit_price: Money,
    ) -> Self {
        let total = unit_price * shares;
        Self {
            side,
            instrument,
            instrument_name: instrument_name.into(),
            shares,
            unit_price,
            total,
        }
    }
}

impl fmt::Display for TradeReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.side {
            TradeSide::Buy => "bought",
            TradeSide::Sell => "sold",
        };
        write!(
            f,
            "{verb} {} {} at {} for {}",
            self.shares, self.instrument_name, self.unit_price, self.total
        )
    }
}
