//! Trade validation and execution.

use crate::domain::market::Instrument;
use crate::domain::portfolio::Portfolio;
use crate::domain::shared::{GameRules, Shares};
use crate::domain::trading::errors::TradeError;
use crate::domain::trading::value_objects::{TradeReceipt, TradeSide};

/// Validates and executes buy/sell requests against one portfolio.
///
/// Every check runs before any mutation, so a request either applies fully
/// or not at all. The engine itself knows nothing about turns; the session
/// protocol decides when a player may trade.
#[derive(Debug, Clone)]
pub struct TradeEngine {
    rules: GameRules,
}

impl TradeEngine {
    /// Create an engine bound to the game's rules.
    #[must_use]
    pub const fn new(rules: GameRules) -> Self {
        Self { rules }
    }

    /// The rules this engine enforces.
    #[must_use]
    pub const fn rules(&self) -> &GameRules {
        &self.rules
    }

    /// Buy `shares` of `instrument` for the portfolio.
    ///
    /// # Errors
    ///
    /// `InvalidLotSize` when the amount is not a whole number of lots,
    /// `InsufficientFunds` when the cost exceeds available cash. On error
    /// nothing is debited or credited.
    pub fn execute_buy(
        &self,
        portfolio: &mut Portfolio,
        instrument: &Instrument,
        shares: Shares,
    ) -> Result<TradeReceipt, TradeError> {
        self.validate_lot(shares)?;

        let cost = instrument.price() * shares;
        if cost > portfolio.cash() {
            return Err(TradeError::InsufficientFunds {
                required: cost,
                available: portfolio.cash(),
            });
        }

        portfolio.debit(cost);
        portfolio.add_shares(instrument.id(), shares);

        Ok(TradeReceipt::new(
            TradeSide::Buy,
            instrument.id(),
            instrument.name(),
            shares,
            instrument.price(),
        ))
    }

    /// Sell `shares` of `instrument` from the portfolio.
    ///
    /// # Errors
    ///
    /// `InvalidLotSize` when the amount is not a whole number of lots,
    /// `InsufficientShares` when the amount exceeds the holding. On error
    /// nothing is debited or credited.
    pub fn execute_sell(
        &self,
        portfolio: &mut Portfolio,
        instrument: &Instrument,
        shares: Shares,
    ) -> Result<TradeReceipt, TradeError> {
        self.validate_lot(shares)?;

        let held = portfolio.holding(instrument.id());
        if shares > held {
            return Err(TradeError::InsufficientShares {
                requested: shares,
                held,
            });
        }

        let proceeds = instrument.price() * shares;
        portfolio.remove_shares(instrument.id(), shares);
        portfolio.credit(proceeds);

        Ok(TradeReceipt::new(
            TradeSide::Sell,
            instrument.id(),
            instrument.name(),
            shares,
            instrument.price(),
        ))
    }

    // Zero is a whole number of lots: a zero-share trade is a valid no-op.
    fn validate_lot(&self, shares: Shares) -> Result<(), TradeError> {
        if !shares.is_whole_lots(self.rules.lot_size) {
            return Err(TradeError::InvalidLotSize {
                requested: shares,
                lot_size: self.rules.lot_size,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::Market;
    use crate::domain::shared::{InstrumentId, Money};
    use proptest::prelude::*;

    fn make_rules_at(price_cents: i64) -> GameRules {
        GameRules {
            par_price: Money::from_cents(price_cents),
            split_threshold: Money::from_cents(price_cents + 100_000),
            ..GameRules::default()
        }
    }

    // A one-instrument market whose price is the given value.
    fn make_market_at(price_cents: i64) -> Market {
        Market::new(&["Industrial"], &make_rules_at(price_cents))
    }

    fn make_portfolio(cash_cents: i64) -> Portfolio {
        Portfolio::new("ann", Money::from_cents(cash_cents), 1)
    }

    fn engine() -> TradeEngine {
        TradeEngine::new(GameRules::default())
    }

    #[test]
    fn buy_debits_cash_and_credits_shares() {
        let market = make_market_at(100);
        let instrument = market.instrument(InstrumentId::new(0)).unwrap();
        let mut portfolio = make_portfolio(500_000);

        let receipt = engine()
            .execute_buy(&mut portfolio, instrument, Shares::from_count(500))
            .unwrap();

        assert_eq!(receipt.side, TradeSide::Buy);
        assert_eq!(receipt.total, Money::from_cents(50_000));
        assert_eq!(portfolio.cash(), Money::from_cents(450_000));
        assert_eq!(portfolio.holding(InstrumentId::new(0)), Shares::from_count(500));
    }

    #[test]
    fn buy_spending_exact_cash_is_allowed() {
        let market = make_market_at(100);
        let instrument = market.instrument(InstrumentId::new(0)).unwrap();
        let mut portfolio = make_portfolio(50_000);

        let receipt = engine()
            .execute_buy(&mut portfolio, instrument, Shares::from_count(500))
            .unwrap();

        assert_eq!(receipt.total, Money::from_cents(50_000));
        assert_eq!(portfolio.cash(), Money::ZERO);
    }

    #[test]
    fn buy_rejects_unaffordable_cost() {
        let market = make_market_at(100);
        let instrument = market.instrument(InstrumentId::new(0)).unwrap();
        let mut portfolio = make_portfolio(49_999);

        let err = engine()
            .execute_buy(&mut portfolio, instrument, Shares::from_count(500))
            .unwrap_err();

        assert_eq!(
            err,
            TradeError::InsufficientFunds {
                required: Money::from_cents(50_000),
                available: Money::from_cents(49_999),
            }
        );
        assert_eq!(portfolio.cash(), Money::from_cents(49_999));
        assert!(portfolio.is_all_cash());
    }

    #[test]
    fn odd_lots_are_rejected_both_ways() {
        let market = make_market_at(100);
        let instrument = market.instrument(InstrumentId::new(0)).unwrap();
        let mut portfolio = make_portfolio(500_000);
        let engine = engine();

        for amount in [1, 300, 501, 750] {
            let shares = Shares::from_count(amount);
            assert!(matches!(
                engine.execute_buy(&mut portfolio, instrument, shares),
                Err(TradeError::InvalidLotSize { .. })
            ));
            assert!(matches!(
                engine.execute_sell(&mut portfolio, instrument, shares),
                Err(TradeError::InvalidLotSize { .. })
            ));
        }
        assert_eq!(portfolio.cash(), Money::from_cents(500_000));
    }

    #[test]
    fn zero_shares_trades_as_a_no_op() {
        let market = make_market_at(100);
        let instrument = market.instrument(InstrumentId::new(0)).unwrap();
        let mut portfolio = make_portfolio(500_000);
        let engine = engine();

        let receipt = engine
            .execute_buy(&mut portfolio, instrument, Shares::ZERO)
            .unwrap();
        assert_eq!(receipt.total, Money::ZERO);

        engine
            .execute_sell(&mut portfolio, instrument, Shares::ZERO)
            .unwrap();
        assert_eq!(portfolio.cash(), Money::from_cents(500_000));
        assert!(portfolio.is_all_cash());
    }

    #[test]
    fn absurd_share_counts_fail_the_affordability_check() {
        let market = make_market_at(100);
        let instrument = market.instrument(InstrumentId::new(0)).unwrap();
        let mut portfolio = make_portfolio(500_000);

        // A multiple of the lot size whose cost wraps i64; the saturated
        // cost must surface as InsufficientFunds, never a credit.
        let err = engine()
            .execute_buy(&mut portfolio, instrument, Shares::from_count(18_446_744_073_709_551_500))
            .unwrap_err();
        assert!(matches!(err, TradeError::InsufficientFunds { .. }));
        assert_eq!(portfolio.cash(), Money::from_cents(500_000));
        assert!(portfolio.is_all_cash());
    }

    #[test]
    fn sell_credits_cash_and_debits_shares() {
        let market = make_market_at(120);
        let instrument = market.instrument(InstrumentId::new(0)).unwrap();
        let mut portfolio = make_portfolio(100_000);
        portfolio.add_shares(InstrumentId::new(0), Shares::from_count(1000));

        let receipt = engine()
            .execute_sell(&mut portfolio, instrument, Shares::from_count(500))
            .unwrap();

        assert_eq!(receipt.side, TradeSide::Sell);
        assert_eq!(receipt.total, Money::from_cents(60_000));
        assert_eq!(portfolio.cash(), Money::from_cents(160_000));
        assert_eq!(portfolio.holding(InstrumentId::new(0)), Shares::from_count(500));
    }

    #[test]
    fn sell_rejects_more_than_held() {
        let market = make_market_at(100);
        let instrument = market.instrument(InstrumentId::new(0)).unwrap();
        let mut portfolio = make_portfolio(100_000);
        portfolio.add_shares(InstrumentId::new(0), Shares::from_count(500));

        let err = engine()
            .execute_sell(&mut portfolio, instrument, Shares::from_count(1000))
            .unwrap_err();

        assert_eq!(
            err,
            TradeError::InsufficientShares {
                requested: Shares::from_count(1000),
                held: Shares::from_count(500),
            }
        );
        assert_eq!(portfolio.cash(), Money::from_cents(100_000));
        assert_eq!(portfolio.holding(InstrumentId::new(0)), Shares::from_count(500));
    }

    #[test]
    fn custom_lot_size_is_honored() {
        let rules = GameRules {
            lot_size: 100,
            ..GameRules::default()
        };
        let market = Market::new(&["Industrial"], &rules);
        let instrument = market.instrument(InstrumentId::new(0)).unwrap();
        let mut portfolio = make_portfolio(500_000);
        let engine = TradeEngine::new(rules);

        assert!(engine
            .execute_buy(&mut portfolio, instrument, Shares::from_count(300))
            .is_ok());
        assert!(matches!(
            engine.execute_buy(&mut portfolio, instrument, Shares::from_count(350)),
            Err(TradeError::InvalidLotSize { .. })
        ));
    }

    proptest! {
        // Any rejected request leaves the portfolio byte-for-byte unchanged.
        #[test]
        fn prop_rejected_requests_mutate_nothing(
            amount in 0u64..5_000,
            price in 1i64..400,
            cash in 0i64..200_000,
            held_lots in 0u64..4,
        ) {
            let market = make_market_at(price);
            let instrument = market.instrument(InstrumentId::new(0)).unwrap();
            let mut portfolio = make_portfolio(cash);
            portfolio.add_shares(InstrumentId::new(0), Shares::from_count(held_lots * 500));
            let before = portfolio.clone();
            let engine = engine();

            let shares = Shares::from_count(amount);
            if engine.execute_buy(&mut portfolio, instrument, shares).is_err() {
                prop_assert_eq!(&portfolio, &before);
            }
            let after_buy = portfolio.clone();
            if engine.execute_sell(&mut portfolio, instrument, shares).is_err() {
                prop_assert_eq!(&portfolio, &after_buy);
            }
        }

        // Buying then selling the same amount at an unchanged price is a
        // perfect round trip.
        #[test]
        fn prop_buy_sell_round_trip_restores_state(
            lots in 1u64..5,
            price in 1i64..400,
        ) {
            let market = make_market_at(price);
            let instrument = market.instrument(InstrumentId::new(0)).unwrap();
            let mut portfolio = make_portfolio(1_000_000);
            let before = portfolio.clone();
            let engine = engine();

            let shares = Shares::from_count(lots * 500);
            engine.execute_buy(&mut portfolio, instrument, shares).unwrap();
            engine.execute_sell(&mut portfolio, instrument, shares).unwrap();

            prop_assert_eq!(portfolio, before);
        }

        // A successful buy moves exactly price * shares of cash.
        #[test]
        fn prop_buy_cost_is_exact(
            lots in 1u64..5,
            price in 1i64..400,
        ) {
            let market = make_market_at(price);
            let instrument = market.instrument(InstrumentId::new(0)).unwrap();
            let mut portfolio = make_portfolio(1_000_000);
            let engine = engine();

            let shares = Shares::from_count(lots * 500);
            let receipt = engine.execute_buy(&mut portfolio, instrument, shares).unwrap();

            let expected = price * i64::try_from(lots * 500).unwrap();
            prop_assert_eq!(receipt.total.as_cents(), expected);
            prop_assert_eq!(portfolio.cash().as_cents(), 1_000_000 - expected);
        }
    }
}
