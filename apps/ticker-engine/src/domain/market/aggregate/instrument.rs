//! Instrument aggregate: one tradable security.

use serde::{Deserialize, Serialize};

use crate::domain::market::events::PriceMovement;
use crate::domain::portfolio::Portfolio;
use crate::domain::shared::{GameRules, InstrumentId, Money};

/// One security on the market: a name, a price, and a count of the times it
/// has been taken off the market and reset.
///
/// The price is always strictly positive while the instrument is on the
/// market; movements that would leave that range trigger a corporate action
/// instead (see [`PriceMovement`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    id: InstrumentId,
    name: String,
    price: Money,
    delist_count: u32,
}

impl Instrument {
    /// Create an instrument at par. Instruments are built by the market so
    /// that ids always match market positions.
    pub(crate) fn new(id: InstrumentId, name: impl Into<String>, par_price: Money) -> Self {
        Self {
            id,
            name: name.into(),
            price: par_price,
            delist_count: 0,
        }
    }

    /// The instrument's stable market position.
    #[must_use]
    pub const fn id(&self) -> InstrumentId {
        self.id
    }

    /// The instrument's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current price in hundredths.
    #[must_use]
    pub const fn price(&self) -> Money {
        self.price
    }

    /// How many times this instrument split or was delisted.
    #[must_use]
    pub const fn delist_count(&self) -> u32 {
        self.delist_count
    }

    /// True when the price is at or above par, making dividend rolls pay.
    #[must_use]
    pub fn dividend_eligible(&self, par_price: Money) -> bool {
        self.price >= par_price
    }

    /// Raise the price by `delta`, or split when the result would reach the
    /// split threshold.
    ///
    /// A split doubles the holding of every portfolio at this instrument's
    /// position, including zero holdings, and resets the price to par. The
    /// doubling and the reset happen inside this one call; callers never see
    /// an intermediate state.
    pub(crate) fn apply_increase(
        &mut self,
        delta: Money,
        rules: &GameRules,
        portfolios: &mut [Portfolio],
    ) -> PriceMovement {
        if self.price + delta < rules.split_threshold {
            self.price += delta;
            return PriceMovement::Moved {
                new_price: self.price,
            };
        }

        for portfolio in portfolios.iter_mut() {
            portfolio.double_holding(self.id);
        }
        self.delist_count += 1;
        self.price = rules.par_price;
        PriceMovement::Split {
            new_price: self.price,
        }
    }

    /// Lower the price by `delta`, or delist when the result would reach
    /// zero.
    ///
    /// A delisting wipes the holding of every portfolio at this instrument's
    /// position and resets the price to par, atomically with the wipe.
    pub(crate) fn apply_decrease(
        &mut self,
        delta: Money,
        rules: &GameRules,
        portfolios: &mut [Portfolio],
    ) -> PriceMovement {
        if (self.price - delta).is_positive() {
            self.price -= delta;
            return PriceMovement::Moved {
                new_price: self.price,
            };
        }

        for portfolio in portfolios.iter_mut() {
            portfolio.clear_holding(self.id);
        }
        self.delist_count += 1;
        self.price = rules.par_price;
        PriceMovement::Delisted {
            new_price: self.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::Shares;
    use test_case::test_case;

    fn make_rules() -> GameRules {
        GameRules::default()
    }

    fn make_instrument(price_cents: i64) -> Instrument {
        let mut instrument =
            Instrument::new(InstrumentId::new(0), "Industrial", Money::from_cents(100));
        instrument.price = Money::from_cents(price_cents);
        instrument
    }

    fn make_holder(shares: u64) -> Portfolio {
        let mut portfolio = Portfolio::new("ann", Money::from_cents(500_000), 1);
        portfolio.add_shares(InstrumentId::new(0), Shares::from_count(shares));
        portfolio
    }

    #[test]
    fn new_instrument_starts_at_par() {
        let instrument = Instrument::new(InstrumentId::new(2), "Oil", Money::from_cents(100));
        assert_eq!(instrument.id(), InstrumentId::new(2));
        assert_eq!(instrument.name(), "Oil");
        assert_eq!(instrument.price(), Money::from_cents(100));
        assert_eq!(instrument.delist_count(), 0);
    }

    #[test]
    fn ordinary_increase_moves_the_price() {
        let mut instrument = make_instrument(100);
        let mut portfolios = [make_holder(500)];

        let movement = instrument.apply_increase(
            Money::from_cents(20),
            &make_rules(),
            &mut portfolios,
        );

        assert_eq!(
            movement,
            PriceMovement::Moved {
                new_price: Money::from_cents(120)
            }
        );
        assert_eq!(instrument.price(), Money::from_cents(120));
        assert_eq!(instrument.delist_count(), 0);
        assert_eq!(
            portfolios[0].holding(InstrumentId::new(0)),
            Shares::from_count(500)
        );
    }

    #[test]
    fn ordinary_decrease_moves_the_price() {
        let mut instrument = make_instrument(100);
        let mut portfolios = [make_holder(500)];

        let movement = instrument.apply_decrease(
            Money::from_cents(20),
            &make_rules(),
            &mut portfolios,
        );

        assert_eq!(
            movement,
            PriceMovement::Moved {
                new_price: Money::from_cents(80)
            }
        );
        assert_eq!(instrument.delist_count(), 0);
    }

    // Reaching the threshold exactly splits; one short does not.
    #[test_case(190, 20 => true; "well past the threshold")]
    #[test_case(195, 5 => true; "exactly at the threshold")]
    #[test_case(194, 5 => false; "one below the threshold")]
    fn split_triggers_at_threshold(price_cents: i64, delta_cents: i64) -> bool {
        let mut instrument = make_instrument(price_cents);
        let mut portfolios = [make_holder(500)];

        let movement = instrument.apply_increase(
            Money::from_cents(delta_cents),
            &make_rules(),
            &mut portfolios,
        );
        matches!(movement, PriceMovement::Split { .. })
    }

    #[test]
    fn split_doubles_every_holding_and_resets_to_par() {
        let mut instrument = make_instrument(190);
        let mut portfolios = [make_holder(1000), make_holder(0), make_holder(500)];

        let movement = instrument.apply_increase(
            Money::from_cents(20),
            &make_rules(),
            &mut portfolios,
        );

        assert_eq!(
            movement,
            PriceMovement::Split {
                new_price: Money::from_cents(100)
            }
        );
        assert_eq!(instrument.price(), Money::from_cents(100));
        assert_eq!(instrument.delist_count(), 1);

        let id = InstrumentId::new(0);
        assert_eq!(portfolios[0].holding(id), Shares::from_count(2000));
        // Doubling a zero holding is inert but still applied.
        assert_eq!(portfolios[1].holding(id), Shares::ZERO);
        assert_eq!(portfolios[2].holding(id), Shares::from_count(1000));
    }

    #[test_case(15, 20 => true; "well past zero")]
    #[test_case(5, 5 => true; "exactly zero")]
    #[test_case(6, 5 => false; "one above zero")]
    fn delisting_triggers_at_zero(price_cents: i64, delta_cents: i64) -> bool {
        let mut instrument = make_instrument(price_cents);
        let mut portfolios = [make_holder(500)];

        let movement = instrument.apply_decrease(
            Money::from_cents(delta_cents),
            &make_rules(),
            &mut portfolios,
        );
        matches!(movement, PriceMovement::Delisted { .. })
    }

    #[test]
    fn delisting_wipes_every_holding_and_resets_to_par() {
        let mut instrument = make_instrument(15);
        let mut portfolios = [make_holder(1000), make_holder(500)];

        let movement = instrument.apply_decrease(
            Money::from_cents(20),
            &make_rules(),
            &mut portfolios,
        );

        assert_eq!(
            movement,
            PriceMovement::Delisted {
                new_price: Money::from_cents(100)
            }
        );
        assert_eq!(instrument.price(), Money::from_cents(100));
        assert_eq!(instrument.delist_count(), 1);

        let id = InstrumentId::new(0);
        assert_eq!(portfolios[0].holding(id), Shares::ZERO);
        assert_eq!(portfolios[1].holding(id), Shares::ZERO);
    }

    #[test]
    fn delist_count_accumulates_across_both_actions() {
        let mut instrument = make_instrument(190);
        let mut portfolios = [make_holder(500)];
        let rules = make_rules();

        instrument.apply_increase(Money::from_cents(20), &rules, &mut portfolios);
        assert_eq!(instrument.delist_count(), 1);

        instrument.price = Money::from_cents(10);
        instrument.apply_decrease(Money::from_cents(20), &rules, &mut portfolios);
        assert_eq!(instrument.delist_count(), 2);
    }

    #[test]
    fn dividend_eligibility_is_at_or_above_par() {
        let par = Money::from_cents(100);
        assert!(make_instrument(100).dividend_eligible(par));
        assert!(make_instrument(150).dividend_eligible(par));
        assert!(!make_instrument(99).dividend_eligible(par));
    }

    // Movement outcomes always leave the price inside (0, threshold) or at par.
    #[test]
    fn price_stays_in_range_across_many_movements() {
        let rules = make_rules();
        let mut instrument = make_instrument(100);
        let mut portfolios = [make_holder(500)];
        let deltas = [5, 20, 10, 20, 20, 20, 20, 5, 10, 20, 20, 20];

        for (step, delta_cents) in deltas.iter().enumerate() {
            let delta = Money::from_cents(*delta_cents);
            if step % 3 == 0 {
                instrument.apply_decrease(delta, &rules, &mut portfolios);
            } else {
                instrument.apply_increase(delta, &rules, &mut portfolios);
            }
            assert!(instrument.price().is_positive());
            assert!(instrument.price() < rules.split_threshold);
        }
    }
}
