//! What the session reports back after rolls and at the end of the game.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::dice::DiceAction;
use crate::domain::market::{DividendOutcome, PriceMovement};
use crate::domain::shared::{InstrumentId, Money};

/// What a roll did to the market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RollOutcome {
    /// The price moved, split, or delisted.
    Movement(PriceMovement),
    /// A dividend was paid or skipped.
    Dividend(DividendOutcome),
}

/// A fully resolved roll: the dice plus what they did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollReport {
    /// Turn the roll belongs to, 1-based.
    pub turn: u32,
    /// Roll number within the turn, 1-based.
    pub roll: u32,
    /// The instrument the dice picked.
    pub instrument: InstrumentId,
    /// Its display name at the time of the roll.
    pub instrument_name: String,
    /// The action die.
    pub action: DiceAction,
    /// The magnitude die, in hundredths.
    pub magnitude: Money,
    /// How the market resolved the roll.
    pub outcome: RollOutcome,
}

impl fmt::Display for RollReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "turn {}, roll {}: {} {} {}",
            self.turn, self.roll, self.instrument_name, self.action, self.magnitude
        )?;
        match &self.outcome {
            RollOutcome::Movement(PriceMovement::Moved { new_price }) => {
                write!(f, ", price now {new_price}")
            }
            RollOutcome::Movement(PriceMovement::Split { new_price }) => {
                write!(
                    f,
                    ", stock split, holdings doubled, price reset to {new_price}"
                )
            }
            RollOutcome::Movement(PriceMovement::Delisted { new_price }) => {
                write!(
                    f,
                    ", delisted, holdings wiped, price reset to {new_price}"
                )
            }
            RollOutcome::Dividend(outcome @ DividendOutcome::Paid { payouts, .. }) => {
                write!(
                    f,
                    ", paid {} across {} holder(s)",
                    outcome.total_paid(),
                    payouts.len()
                )
            }
            RollOutcome::Dividend(DividendOutcome::Skipped { price }) => {
                write!(f, ", no dividend while below par (price {price})")
            }
        }
    }
}

/// One player's final position at closing prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStanding {
    /// Player name.
    pub player: String,
    /// Cash on hand.
    pub cash: Money,
    /// Holdings valued at closing prices.
    pub holdings_value: Money,
    /// Cash plus holdings value.
    pub total: Money,
}

/// Final standings, sorted richest first, with the winner(s) called out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerReport {
    /// All players, descending by total.
    pub standings: Vec<PlayerStanding>,
    /// Every player tied for the highest total.
    pub winners: Vec<String>,
}

impl WinnerReport {
    /// The total the winners finished with, if any player is present.
    #[must_use]
    pub fn winning_total(&self) -> Option<Money> {
        self.standings.first().map(|standing| standing.total)
    }
}

impl fmt::Display for WinnerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Final standings:")?;
        for standing in &self.standings {
            writeln!(
                f,
                "  {}: cash {} + holdings {} = {}",
                standing.player, standing.cash, standing.holdings_value, standing.total
            )?;
        }
        match self.winners.as_slice() {
            [] => write!(f, "No players"),
            [winner] if self.standings.len() == 1 => {
                write!(f, "Winner: {winner}, who is also the loser")
            }
            [winner] => write!(f, "Winner: {winner}"),
            winners => write!(f, "Winners (tie): {}", winners.join(", ")),
        }
    }
}
