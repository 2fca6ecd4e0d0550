//! Game layer: the session protocol, the dice, and roll reporting.

pub mod dice;
pub mod errors;
pub mod report;
pub mod session;

pub use dice::{Dice, DiceAction, DiceRoll};
pub use errors::{GameError, PolicyViolation};
pub use report::{PlayerStanding, RollOutcome, RollReport, WinnerReport};
pub use session::{GamePhase, GameSession};
