//! Market aggregate: the ordered instrument collection.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::domain::market::events::{DividendOutcome, DividendPayout, PriceMovement};
use crate::domain::portfolio::Portfolio;
use crate::domain::shared::{GameRules, InstrumentId, Money, Shares};

use super::Instrument;

/// The fixed, ordered set of instruments in play.
///
/// The order never changes after construction: it defines the index space
/// shared by portfolio holdings and the instrument die. Corporate actions
/// and dividend distribution are market-level operations because they touch
/// every portfolio in one atomic step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    rules: GameRules,
    instruments: Vec<Instrument>,
}

impl Market {
    /// Build a market with every instrument at par, in the given order.
    #[must_use]
    pub fn new<S: AsRef<str>>(names: &[S], rules: &GameRules) -> Self {
        let instruments = names
            .iter()
            .enumerate()
            .map(|(index, name)| {
                Instrument::new(InstrumentId::new(index), name.as_ref(), rules.par_price)
            })
            .collect();
        Self {
            rules: rules.clone(),
            instruments,
        }
    }

    /// Number of instruments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    /// True when the market has no instruments. Configuration validation
    /// rejects this before a game starts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    /// The rules this market was built with.
    #[must_use]
    pub const fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// Look up an instrument by id.
    #[must_use]
    pub fn instrument(&self, id: InstrumentId) -> Option<&Instrument> {
        self.instruments.get(id.index())
    }

    /// All instruments in market order.
    pub fn instruments(&self) -> impl Iterator<Item = &Instrument> {
        self.instruments.iter()
    }

    /// Current price of an instrument.
    #[must_use]
    pub fn price(&self, id: InstrumentId) -> Option<Money> {
        self.instrument(id).map(Instrument::price)
    }

    /// Whether a dividend roll against this instrument would pay.
    #[must_use]
    pub fn dividend_eligible(&self, id: InstrumentId) -> Option<bool> {
        self.instrument(id)
            .map(|instrument| instrument.dividend_eligible(self.rules.par_price))
    }

    /// Width of the longest instrument name, for aligned tables.
    #[must_use]
    pub fn name_width(&self) -> usize {
        self.instruments
            .iter()
            .map(|instrument| instrument.name().len())
            .max()
            .unwrap_or(0)
    }

    /// Render the price table.
    #[must_use]
    pub fn display(&self) -> String {
        let width = self.name_width();
        let mut out = String::new();
        for instrument in &self.instruments {
            let _ = writeln!(
                out,
                "{:<width$} {:>9}",
                instrument.name(),
                instrument.price().to_string(),
            );
        }
        out
    }

    /// Raise an instrument's price, splitting it if the result would reach
    /// the split threshold. Returns `None` for an unknown id.
    ///
    /// On a split every portfolio's holding at that position is doubled in
    /// the same step that resets the price; callers never observe one
    /// without the other.
    pub fn apply_increase(
        &mut self,
        id: InstrumentId,
        delta: Money,
        portfolios: &mut [Portfolio],
    ) -> Option<PriceMovement> {
        let rules = self.rules.clone();
        let instrument = self.instruments.get_mut(id.index())?;
        let movement = instrument.apply_increase(delta, &rules, portfolios);
        if let PriceMovement::Split { new_price } = movement {
            tracing::info!(
                instrument = %instrument.name(),
                new_price = %new_price,
                "split: all holdings doubled, price reset to par"
            );
        }
        Some(movement)
    }

    /// Lower an instrument's price, delisting it if the result would reach
    /// zero. Returns `None` for an unknown id.
    ///
    /// On a delisting every portfolio's holding at that position is wiped in
    /// the same step that resets the price.
    pub fn apply_decrease(
        &mut self,
        id: InstrumentId,
        delta: Money,
        portfolios: &mut [Portfolio],
    ) -> Option<PriceMovement> {
        let rules = self.rules.clone();
        let instrument = self.instruments.get_mut(id.index())?;
        let movement = instrument.apply_decrease(delta, &rules, portfolios);
        if let PriceMovement::Delisted { new_price } = movement {
            tracing::info!(
                instrument = %instrument.name(),
                new_price = %new_price,
                "delisted: all holdings wiped, price reset to par"
            );
        }
        Some(movement)
    }

    /// Pay a dividend on an instrument at `rate` hundredths per share held.
    /// Returns `None` for an unknown id.
    ///
    /// Pays only when the price is at or above par, and only to portfolios
    /// with a positive holding. An eligible instrument nobody holds reports
    /// a payout list with no entries.
    pub fn distribute_dividend(
        &self,
        id: InstrumentId,
        rate: Money,
        portfolios: &mut [Portfolio],
    ) -> Option<DividendOutcome> {
        let instrument = self.instrument(id)?;
        if !instrument.dividend_eligible(self.rules.par_price) {
            return Some(DividendOutcome::Skipped {
                price: instrument.price(),
            });
        }

        let mut payouts = Vec::new();
        for portfolio in portfolios.iter_mut() {
            let holding = portfolio.holding(id);
            if holding.is_zero() {
                continue;
            }
            let amount = rate * holding;
            portfolio.credit(amount);
            payouts.push(DividendPayout {
                player: portfolio.name().to_string(),
                amount,
            });
        }

        let outcome = DividendOutcome::Paid {
            rate,
            payouts,
        };
        tracing::info!(
            instrument = %instrument.name(),
            rate = %rate,
            total = %outcome.total_paid(),
            "dividend distributed"
        );
        Some(outcome)
    }
}
