//! Trade rejection errors.

use std::fmt;

use crate::domain::shared::{Money, Shares};

/// Reasons a trade request is rejected.
///
/// Every rejection leaves the portfolio untouched; the caller may adjust the
/// request and retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TradeError {
    /// Requested amount is not a whole number of lots.
    InvalidLotSize {
        /// Shares requested.
        requested: Shares,
        /// Lot size in force.
        lot_size: u64,
    },

    /// Buy cost exceeds the portfolio's cash.
    InsufficientFunds {
        /// Cost of the requested buy.
        required: Money,
        /// Cash available.
        available: Money,
    },

    /// Sell amount exceeds the portfolio's holding.
    InsufficientShares {
        /// Shares requested.
        requested: Shares,
        /// Shares held.
        held: Shares,
    },
}

impl fmt::Display for TradeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLotSize {
                requested,
                lot_size,
            } => {
                write!(
                    f,
                    "Invalid amount: {requested} is not a multiple of the {lot_size}-share lot"
                )
            }
            Self::InsufficientFunds {
                required,
                available,
            } => {
                write!(
                    f,
                    "Insufficient funds: need {required}, have {available}"
                )
            }
            Self::InsufficientShares { requested, held } => {
                write!(
                    f,
                    "Insufficient shares: tried to sell {requested}, holding {held}"
                )
            }
        }
    }
}

impl std::error::Error for TradeError {}
