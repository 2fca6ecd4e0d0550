// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Ticker Engine - Rust Core Library
//!
//! A turn-based market game: dice move instrument prices, pay dividends,
//! and trigger splits and delistings, while players trade in fixed
//! windows until the configured number of turns runs out.
//!
//! # Architecture
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core market logic
//!   - `market`: instruments, price movement, splits, delistings, dividends
//!   - `portfolio`: player cash, holdings, loans, and valuation
//!   - `trading`: lot validation and atomic buy/sell execution
//!   - `shared`: the value objects the contexts exchange
//!
//! - **Game**: The session protocol
//!   - `session`: phases, trading windows, and winner declaration
//!   - `dice`: the three-die randomizer
//!   - `report`: what each roll and the final standings look like
//!
//! - **Config**: YAML settings with environment variable interpolation
//!
//! - **Shell**: The interactive text interface

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Layers
// =============================================================================

/// Domain layer - market, portfolio, and trading logic.
pub mod domain;

/// Game layer - the session protocol, dice, and reports.
pub mod game;

/// Configuration - YAML loading, validation, and env interpolation.
pub mod config;

/// Shell - the interactive text interface.
pub mod shell;

// =============================================================================
// Re-exports
// =============================================================================

// Domain re-exports
pub use domain::market::{DividendOutcome, Instrument, Market, PriceMovement};
pub use domain::portfolio::Portfolio;
pub use domain::shared::{GameRules, InstrumentId, Money, Shares};
pub use domain::trading::{TradeEngine, TradeError, TradeReceipt, TradeSide};

// Game re-exports
pub use game::{
    DiceAction, GameError, GamePhase, GameSession, PolicyViolation, RollOutcome, RollReport,
    WinnerReport,
};

// Config re-exports
pub use config::{Config, ConfigError, GameSettings, load_config};

// Shell re-exports
pub use shell::GameShell;
