//! Typed outcomes of market events.
//!
//! Every dice-driven mutation reports what happened as data; rendering is
//! left to the caller.

use serde::{Deserialize, Serialize};

use crate::domain::shared::Money;

/// Outcome of applying a price movement to an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceMovement {
    /// Ordinary move; the price stayed strictly between zero and the split
    /// threshold.
    Moved {
        /// Price after the move.
        new_price: Money,
    },
    /// The increase reached the split threshold: every holding doubled and
    /// the price reset to par.
    Split {
        /// Par price the instrument was reset to.
        new_price: Money,
    },
    /// The decrease reached zero: every holding was wiped and the price
    /// reset to par.
    Delisted {
        /// Par price the instrument was reset to.
        new_price: Money,
    },
}

impl PriceMovement {
    /// Price of the instrument after the event.
    #[must_use]
    pub const fn new_price(&self) -> Money {
        match self {
            Self::Moved { new_price } | Self::Split { new_price } | Self::Delisted { new_price } => {
                *new_price
            }
        }
    }

    /// Returns true for a split or a delisting.
    #[must_use]
    pub const fn is_corporate_action(&self) -> bool {
        matches!(self, Self::Split { .. } | Self::Delisted { .. })
    }
}

/// One player's dividend payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DividendPayout {
    /// Receiving player.
    pub player: String,
    /// Cash credited.
    pub amount: Money,
}

/// Outcome of a dividend roll against one instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DividendOutcome {
    /// The instrument was at or above par; holders were paid.
    Paid {
        /// Payout per share held, in hundredths.
        rate: Money,
        /// Every positive holder's payment, in player order. Empty when
        /// nobody holds the instrument.
        payouts: Vec<DividendPayout>,
    },
    /// The instrument was below par; nothing was paid.
    Skipped {
        /// Price that failed the eligibility check.
        price: Money,
    },
}

impl DividendOutcome {
    /// Total cash distributed by this event.
    #[must_use]
    pub fn total_paid(&self) -> Money {
        match self {
            Self::Paid { payouts, .. } => payouts
                .iter()
                .fold(Money::ZERO, |total, payout| total + payout.amount),
            Self::Skipped { .. } => Money::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_new_price_is_uniform() {
        let price = Money::from_cents(140);
        assert_eq!(PriceMovement::Moved { new_price: price }.new_price(), price);
        assert_eq!(PriceMovement::Split { new_price: price }.new_price(), price);
        assert_eq!(
            PriceMovement::Delisted { new_price: price }.new_price(),
            price
        );
    }

    #[test]
    fn corporate_action_flag() {
        let price = Money::from_cents(100);
        assert!(!PriceMovement::Moved { new_price: price }.is_corporate_action());
        assert!(PriceMovement::Split { new_price: price }.is_corporate_action());
        assert!(PriceMovement::Delisted { new_price: price }.is_corporate_action());
    }

    #[test]
    fn dividend_total_sums_payouts() {
        let outcome = DividendOutcome::Paid {
            rate: Money::from_cents(10),
            payouts: vec![
                DividendPayout {
                    player: "ann".to_string(),
                    amount: Money::from_cents(5_000),
                },
                DividendPayout {
                    player: "bob".to_string(),
                    amount: Money::from_cents(10_000),
                },
            ],
        };
        assert_eq!(outcome.total_paid(), Money::from_cents(15_000));
    }

    #[test]
    fn skipped_dividend_pays_nothing() {
        let outcome = DividendOutcome::Skipped {
            price: Money::from_cents(95),
        };
        assert_eq!(outcome.total_paid(), Money::ZERO);
    }

    #[test]
    fn movement_serde_is_tagged() {
        let movement = PriceMovement::Split {
            new_price: Money::from_cents(100),
        };
        let json = serde_json::to_string(&movement).unwrap();
        assert!(json.contains("\"type\":\"SPLIT\""));

        let parsed: PriceMovement = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, movement);
    }
}
