//! The three-die randomizer that drives each market event.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::shared::{InstrumentId, Money};

/// What the action die says happens to the rolled instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiceAction {
    /// Price moves up by the rolled magnitude.
    Up,
    /// Price moves down by the rolled magnitude.
    Down,
    /// Holders are paid a dividend at the rolled magnitude per share.
    Dividend,
}

impl DiceAction {
    fn random<R: Rng>(rng: &mut R) -> Self {
        match rng.random_range(0..3u8) {
            0 => Self::Up,
            1 => Self::Down,
            _ => Self::Dividend,
        }
    }
}

impl fmt::Display for DiceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "UP"),
            Self::Down => write!(f, "DOWN"),
            Self::Dividend => write!(f, "DIVIDEND"),
        }
    }
}

/// One complete roll: which instrument, which action, how much.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    /// The instrument the event applies to.
    pub instrument: InstrumentId,
    /// The kind of market event.
    pub action: DiceAction,
    /// Price delta or dividend rate, in hundredths per share.
    pub magnitude: Money,
}

/// Rolls the instrument, action, and magnitude dice.
///
/// Each die is drawn independently and uniformly. The three draws happen
/// in a fixed order (instrument, action, magnitude) so a seeded roller
/// replays the same sequence every time.
#[derive(Debug)]
pub struct Dice {
    rng: StdRng,
    instrument_count: usize,
    magnitudes: Vec<Money>,
}

impl Dice {
    /// Create a roller seeded from the operating system.
    ///
    /// `instrument_count` and `magnitudes` must be non-empty; settings
    /// validation enforces this before a session is built.
    #[must_use]
    pub fn new(instrument_count: usize, magnitudes: Vec<Money>) -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            instrument_count,
            magnitudes,
        }
    }

    /// Create a roller that replays the same sequence for the same seed.
    #[must_use]
    pub fn with_seed(instrument_count: usize, magnitudes: Vec<Money>, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            instrument_count,
            magnitudes,
        }
    }

    /// Roll all three dice.
    pub fn roll(&mut self) -> DiceRoll {
        let instrument = InstrumentId::new(self.rng.random_range(0..self.instrument_count));
        let action = DiceAction::random(&mut self.rng);
        let magnitude = self.magnitudes[self.rng.random_range(0..self.magnitudes.len())];
        DiceRoll {
            instrument,
            action,
            magnitude,
        }
    }
}
