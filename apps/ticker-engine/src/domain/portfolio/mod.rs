//! Portfolio Bounded Context
//!
//! One player's cash and share holdings: trade mutations applied by the
//! trading engine, broadcast mutations applied by corporate actions, and
//! the valuation used to pick winners.

pub mod aggregate;

pub use aggregate::Portfolio;
