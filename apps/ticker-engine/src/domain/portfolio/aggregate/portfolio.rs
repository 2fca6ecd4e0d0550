//! Portfolio aggregate: one player's cash and holdings.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::domain::market::Market;
use crate::domain::shared::{InstrumentId, Money, Shares};

/// One player's position in the game: cash, per-instrument share counts,
/// and a count of bankruptcies taken.
///
/// Holdings are keyed by market position, so `holdings[i]` always refers to
/// the instrument at `Market` position `i`. Trades and corporate actions are
/// the only writers; both go through the crate-internal mutators so a
/// rejected request can never leave a partial change behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portfolio {
    name: String,
    cash: Money,
    holdings: Vec<Shares>,
    loan_count: u32,
}

impl Portfolio {
    /// Create a portfolio with starting cash and no shares.
    #[must_use]
    pub fn new(name: impl Into<String>, starting_cash: Money, instrument_count: usize) -> Self {
        Self {
            name: name.into(),
            cash: starting_cash,
            holdings: vec![Shares::ZERO; instrument_count],
            loan_count: 0,
        }
    }

    /// The player's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current cash balance.
    #[must_use]
    pub const fn cash(&self) -> Money {
        self.cash
    }

    /// How many times this portfolio went bankrupt.
    #[must_use]
    pub const fn loan_count(&self) -> u32 {
        self.loan_count
    }

    /// Shares held of the given instrument.
    #[must_use]
    pub fn holding(&self, id: InstrumentId) -> Shares {
        self.holdings.get(id.index()).copied().unwrap_or(Shares::ZERO)
    }

    /// All holdings in market order.
    #[must_use]
    pub fn holdings(&self) -> &[Shares] {
        &self.holdings
    }

    /// True when no instrument is held.
    #[must_use]
    pub fn is_all_cash(&self) -> bool {
        self.holdings.iter().all(Shares::is_zero)
    }

    pub(crate) fn credit(&mut self, amount: Money) {
        self.cash += amount;
    }

    pub(crate) fn debit(&mut self, amount: Money) {
        self.cash -= amount;
    }

    pub(crate) fn add_shares(&mut self, id: InstrumentId, shares: Shares) {
        if let Some(holding) = self.holdings.get_mut(id.index()) {
            *holding += shares;
        }
    }

    pub(crate) fn remove_shares(&mut self, id: InstrumentId, shares: Shares) {
        if let Some(holding) = self.holdings.get_mut(id.index()) {
            *holding -= shares;
        }
    }

    /// Double the holding at `id` during a split. Returns the new count.
    pub(crate) fn double_holding(&mut self, id: InstrumentId) -> Shares {
        match self.holdings.get_mut(id.index()) {
            Some(holding) => {
                *holding = holding.doubled();
                *holding
            }
            None => Shares::ZERO,
        }
    }

    /// Wipe the holding at `id` during a delisting. Returns the wiped count.
    pub(crate) fn clear_holding(&mut self, id: InstrumentId) -> Shares {
        match self.holdings.get_mut(id.index()) {
            Some(holding) => {
                let wiped = *holding;
                *holding = Shares::ZERO;
                wiped
            }
            None => Shares::ZERO,
        }
    }

    /// Cash value of the whole portfolio at current market prices:
    /// `cash + sum(holding * price)`.
    #[must_use]
    pub fn valuation(&self, market: &Market) -> Money {
        self.holdings_value(market) + self.cash
    }

    /// Cash the holdings would fetch at current market prices.
    #[must_use]
    pub fn holdings_value(&self, market: &Market) -> Money {
        market
            .instruments()
            .zip(self.holdings.iter())
            .fold(Money::ZERO, |total, (instrument, holding)| {
                total + instrument.price() * *holding
            })
    }

    /// Take a bankruptcy: count a loan, reset cash to the floor, and give up
    /// every holding.
    ///
    /// Nothing in the round loop calls this; it is an operation for rule
    /// variants that want a rescue path instead of a stuck player.
    pub fn declare_bankruptcy(&mut self, floor: Money) {
        self.loan_count += 1;
        self.cash = floor;
        for holding in &mut self.holdings {
            *holding = Shares::ZERO;
        }
        tracing::info!(
            player = %self.name,
            loan_count = self.loan_count,
            cash = %self.cash,
            "bankruptcy declared"
        );
    }

    /// Render the player's statement against current market prices.
    #[must_use]
    pub fn display(&self, market: &Market) -> String {
        let mut out = format!("{}: cash {}", self.name, self.cash);
        if self.loan_count > 0 {
            let _ = write!(out, ", loans {}", self.loan_count);
        }
        out.push('\n');

        let width = market.name_width();
        for (instrument, holding) in market.instruments().zip(self.holdings.iter()) {
            if holding.is_zero() {
                continue;
            }
            let value = instrument.price() * *holding;
            let _ = writeln!(
                out,
                "  {:<width$} {:>7} shares at {} worth {}",
                instrument.name(),
                holding,
                instrument.price(),
                value,
            );
        }
        if self.is_all_cash() {
            out.push_str("  no shares held\n");
        }
        let _ = write!(out, "  portfolio value {}", self.valuation(market));
        out
    }
}
