//! Session protocol errors.

use std::fmt;

use super::session::GamePhase;
use crate::domain::shared::InstrumentId;
use crate::domain::trading::TradeError;

/// House rules a request can break even when the trade itself is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyViolation {
    /// Selling is banned for the whole of the initial trading session.
    SellDuringInitialTrading,

    /// A player may not end their initial trading session empty-handed.
    CloseWithoutPurchase,
}

impl fmt::Display for PolicyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SellDuringInitialTrading => {
                write!(f, "Selling is not allowed during the initial trading session")
            }
            Self::CloseWithoutPurchase => {
                write!(
                    f,
                    "Buy at least one lot before ending your initial trading session"
                )
            }
        }
    }
}

impl std::error::Error for PolicyViolation {}

/// Errors that can occur while driving a game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The trade itself was rejected.
    Trade(TradeError),

    /// A house rule was broken.
    Policy(PolicyViolation),

    /// The operation is not legal in the current phase.
    WrongPhase {
        /// What was attempted.
        operation: &'static str,
        /// The phase the game is in.
        phase: GamePhase,
    },

    /// A trade or close arrived while no trading window was open.
    NoOpenWindow,

    /// A window was requested while another player's window is open.
    WindowAlreadyOpen {
        /// The player whose window is open.
        player: String,
    },

    /// The named player is not part of this game.
    UnknownPlayer {
        /// The requested name.
        name: String,
    },

    /// Trading windows must be claimed in seating order.
    OutOfTurn {
        /// The player whose turn it is.
        expected: String,
        /// The player who asked.
        requested: String,
    },

    /// The instrument id is outside the market.
    UnknownInstrument {
        /// The requested id.
        id: InstrumentId,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trade(err) => write!(f, "{err}"),
            Self::Policy(violation) => write!(f, "{violation}"),
            Self::WrongPhase { operation, phase } => {
                write!(f, "Cannot {operation}: game is in the {phase} phase")
            }
            Self::NoOpenWindow => {
                write!(f, "No trading window is open")
            }
            Self::WindowAlreadyOpen { player } => {
                write!(f, "A trading window is already open for {player}")
            }
            Self::UnknownPlayer { name } => {
                write!(f, "Unknown player: {name}")
            }
            Self::OutOfTurn {
                expected,
                requested,
            } => {
                write!(f, "It is {expected}'s turn to trade, not {requested}'s")
            }
            Self::UnknownInstrument { id } => {
                write!(f, "Unknown instrument id: {id}")
            }
        }
    }
}

impl std::error::Error for GameError {}

impl From<TradeError> for GameError {
    fn from(err: TradeError) -> Self {
        Self::Trade(err)
    }
}

impl From<PolicyViolation> for GameError {
    fn from(violation: PolicyViolation) -> Self {
        Self::Policy(violation)
    }
}
