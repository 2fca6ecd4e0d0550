//! The game session: phases, trading windows, dice rolls, and winners.
//!
//! A session owns the market, every player's portfolio, the trade engine,
//! and the dice, and enforces the protocol between them. The lifecycle is
//! fixed: an initial buy-only trading session, then alternating rolling
//! phases and between-turn trading windows, and finally game over after
//! the last roll of the last turn.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::dice::{Dice, DiceAction};
use super::errors::{GameError, PolicyViolation};
use super::report::{PlayerStanding, RollOutcome, RollReport, WinnerReport};
use crate::config::{ConfigError, GameSettings, MAX_PLAYERS};
use crate::domain::market::Market;
use crate::domain::portfolio::Portfolio;
use crate::domain::shared::{InstrumentId, Shares};
use crate::domain::trading::{TradeEngine, TradeReceipt};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    /// The buy-only session before the first roll.
    InitialTrading,
    /// Dice are being rolled; no trading.
    Rolling,
    /// The between-turns session where every player may trade.
    TradingWindow,
    /// All turns are done; winners can be declared.
    GameOver,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InitialTrading => write!(f, "INITIAL_TRADING"),
            Self::Rolling => write!(f, "ROLLING"),
            Self::TradingWindow => write!(f, "TRADING_WINDOW"),
            Self::GameOver => write!(f, "GAME_OVER"),
        }
    }
}

/// The one trading window that may be open at a time.
#[derive(Debug)]
struct WindowState {
    /// Index of the player holding the window.
    player: usize,
    /// Whether the player has bought anything in this window.
    bought: bool,
}

/// A complete game in progress.
///
/// Trading windows are claimed strictly in seating order, one player at a
/// time. Construction validates the settings and the player list; after
/// that every operation either succeeds or returns a [`GameError`] without
/// changing any state.
#[derive(Debug)]
pub struct GameSession {
    market: Market,
    portfolios: Vec<Portfolio>,
    engine: TradeEngine,
    dice: Dice,
    phase: GamePhase,
    /// 0 during the initial trading session, then 1-based.
    turn: u32,
    /// Rolls taken in the current turn, 1-based after the first roll.
    roll_in_turn: u32,
    turns: u32,
    rolls_per_turn: u32,
    window: Option<WindowState>,
    /// Index of the player who must claim the next window.
    next_window: usize,
}

impl GameSession {
    /// Start a new game.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` for invalid settings, a
    /// player count outside 1..=[`MAX_PLAYERS`], or blank or duplicate
    /// player names.
    pub fn new<S: AsRef<str>>(
        settings: &GameSettings,
        players: &[S],
    ) -> Result<Self, ConfigError> {
        settings.validate()?;

        if players.is_empty() || players.len() > MAX_PLAYERS {
            return Err(ConfigError::ValidationError(format!(
                "player count must be between 1 and {MAX_PLAYERS}"
            )));
        }
        for name in players {
            if name.as_ref().trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "player names must not be blank".to_string(),
                ));
            }
        }
        let mut names: Vec<&str> = players.iter().map(AsRef::as_ref).collect();
        names.sort_unstable();
        names.dedup();
        if names.len() != players.len() {
            return Err(ConfigError::ValidationError(
                "player names must be distinct".to_string(),
            ));
        }

        let market = Market::new(&settings.instruments, &settings.rules);
        let portfolios = players
            .iter()
            .map(|name| {
                Portfolio::new(name.as_ref(), settings.rules.starting_cash, market.len())
            })
            .collect();
        let dice = match settings.seed {
            Some(seed) => Dice::with_seed(market.len(), settings.magnitudes.clone(), seed),
            None => Dice::new(market.len(), settings.magnitudes.clone()),
        };

        tracing::info!(
            players = players.len(),
            instruments = market.len(),
            turns = settings.turns,
            rolls_per_turn = settings.rolls_per_turn,
            "game session started"
        );

        Ok(Self {
            market,
            portfolios,
            engine: TradeEngine::new(settings.rules.clone()),
            dice,
            phase: GamePhase::InitialTrading,
            turn: 0,
            roll_in_turn: 0,
            turns: settings.turns,
            rolls_per_turn: settings.rolls_per_turn,
            window: None,
            next_window: 0,
        })
    }

    /// The current phase.
    #[must_use]
    pub const fn phase(&self) -> GamePhase {
        self.phase
    }

    /// The current turn, 0 until the first rolling phase starts.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Rolls taken so far in the current turn.
    #[must_use]
    pub const fn roll_in_turn(&self) -> u32 {
        self.roll_in_turn
    }

    /// Turns in the full game.
    #[must_use]
    pub const fn turns(&self) -> u32 {
        self.turns
    }

    /// Dice rolls per turn.
    #[must_use]
    pub const fn rolls_per_turn(&self) -> u32 {
        self.rolls_per_turn
    }

    /// The market being played.
    #[must_use]
    pub const fn market(&self) -> &Market {
        &self.market
    }

    /// Every portfolio, in seating order.
    #[must_use]
    pub fn portfolios(&self) -> &[Portfolio] {
        &self.portfolios
    }

    /// Look up one player's portfolio by name.
    #[must_use]
    pub fn portfolio(&self, player: &str) -> Option<&Portfolio> {
        self.portfolios.iter().find(|p| p.name() == player)
    }

    /// The player whose trading window is open, if any.
    #[must_use]
    pub fn current_window(&self) -> Option<&str> {
        self.window
            .as_ref()
            .and_then(|window| self.portfolios.get(window.player))
            .map(Portfolio::name)
    }

    /// The player who must claim the next trading window.
    ///
    /// `None` while a window is open, and outside window phases.
    #[must_use]
    pub fn next_trader(&self) -> Option<&str> {
        if self.window.is_some() {
            return None;
        }
        match self.phase {
            GamePhase::InitialTrading | GamePhase::TradingWindow => {
                self.portfolios.get(self.next_window).map(Portfolio::name)
            }
            GamePhase::Rolling | GamePhase::GameOver => None,
        }
    }

    /// Whether the game has finished.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Open the trading window for `player`.
    ///
    /// # Errors
    ///
    /// Rejects the request outside window phases, while another window is
    /// open, for unknown players, and for players asking ahead of their
    /// seat.
    pub fn open_window(&mut self, player: &str) -> Result<(), GameError> {
        match self.phase {
            GamePhase::InitialTrading | GamePhase::TradingWindow => {}
            phase => {
                return Err(GameError::WrongPhase {
                    operation: "open a trading window",
                    phase,
                });
            }
        }
        if let Some(window) = &self.window {
            return Err(GameError::WindowAlreadyOpen {
                player: self.portfolios[window.player].name().to_string(),
            });
        }
        let Some(index) = self.portfolios.iter().position(|p| p.name() == player) else {
            return Err(GameError::UnknownPlayer {
                name: player.to_string(),
            });
        };
        if index != self.next_window {
            return Err(GameError::OutOfTurn {
                expected: self.portfolios[self.next_window].name().to_string(),
                requested: player.to_string(),
            });
        }

        self.window = Some(WindowState {
            player: index,
            bought: false,
        });
        tracing::debug!(player, phase = %self.phase, "trading window opened");
        Ok(())
    }

    /// Buy shares for the player holding the open window.
    ///
    /// # Errors
    ///
    /// Rejects the request outside window phases, without an open window,
    /// for unknown instruments, and for trades the engine refuses.
    pub fn buy(
        &mut self,
        instrument: InstrumentId,
        shares: Shares,
    ) -> Result<TradeReceipt, GameError> {
        let player = self.window_player("buy")?;
        let Some(listed) = self.market.instrument(instrument) else {
            return Err(GameError::UnknownInstrument { id: instrument });
        };

        let receipt = self
            .engine
            .execute_buy(&mut self.portfolios[player], listed, shares)?;
        if let Some(window) = self.window.as_mut() {
            window.bought = true;
        }

        tracing::info!(
            player = self.portfolios[player].name(),
            instrument = %receipt.instrument_name,
            side = %receipt.side,
            shares = %receipt.shares,
            total = %receipt.total,
            "trade executed"
        );
        Ok(receipt)
    }

    /// Sell shares for the player holding the open window.
    ///
    /// # Errors
    ///
    /// As [`Self::buy`], and additionally rejects every sell during the
    /// initial trading session.
    pub fn sell(
        &mut self,
        instrument: InstrumentId,
        shares: Shares,
    ) -> Result<TradeReceipt, GameError> {
        let player = self.window_player("sell")?;
        if self.phase == GamePhase::InitialTrading {
            return Err(PolicyViolation::SellDuringInitialTrading.into());
        }
        let Some(listed) = self.market.instrument(instrument) else {
            return Err(GameError::UnknownInstrument { id: instrument });
        };

        let receipt = self
            .engine
            .execute_sell(&mut self.portfolios[player], listed, shares)?;

        tracing::info!(
            player = self.portfolios[player].name(),
            instrument = %receipt.instrument_name,
            side = %receipt.side,
            shares = %receipt.shares,
            total = %receipt.total,
            "trade executed"
        );
        Ok(receipt)
    }

    /// Close the open trading window and pass to the next player.
    ///
    /// When the last player closes, the session advances: the initial
    /// trading session hands over to turn 1, a between-turns window hands
    /// over to the next turn.
    ///
    /// # Errors
    ///
    /// Rejects the request without an open window, and during the initial
    /// trading session when the player has not bought anything yet.
    pub fn close_window(&mut self) -> Result<(), GameError> {
        let player = self.window_player("close the trading window")?;
        if self.phase == GamePhase::InitialTrading
            && !self.window.as_ref().is_some_and(|w| w.bought)
        {
            return Err(PolicyViolation::CloseWithoutPurchase.into());
        }

        tracing::debug!(player = self.portfolios[player].name(), "trading window closed");
        self.window = None;
        self.next_window += 1;
        if self.next_window == self.portfolios.len() {
            self.next_window = 0;
            self.start_rolling();
        }
        Ok(())
    }

    /// Roll the dice and apply the result to the market.
    ///
    /// After the last roll of the last turn the session goes straight to
    /// game over; after the last roll of any other turn a trading window
    /// session starts.
    ///
    /// # Errors
    ///
    /// Rejects the request outside the rolling phase.
    pub fn roll(&mut self) -> Result<RollReport, GameError> {
        if self.phase != GamePhase::Rolling {
            return Err(GameError::WrongPhase {
                operation: "roll the dice",
                phase: self.phase,
            });
        }

        let dice_roll = self.dice.roll();
        let Some(listed) = self.market.instrument(dice_roll.instrument) else {
            return Err(GameError::UnknownInstrument {
                id: dice_roll.instrument,
            });
        };
        let instrument_name = listed.name().to_string();

        let outcome = match dice_roll.action {
            DiceAction::Up => {
                let Some(movement) = self.market.apply_increase(
                    dice_roll.instrument,
                    dice_roll.magnitude,
                    &mut self.portfolios,
                ) else {
                    return Err(GameError::UnknownInstrument {
                        id: dice_roll.instrument,
                    });
                };
                RollOutcome::Movement(movement)
            }
            DiceAction::Down => {
                let Some(movement) = self.market.apply_decrease(
                    dice_roll.instrument,
                    dice_roll.magnitude,
                    &mut self.portfolios,
                ) else {
                    return Err(GameError::UnknownInstrument {
                        id: dice_roll.instrument,
                    });
                };
                RollOutcome::Movement(movement)
            }
            DiceAction::Dividend => {
                let Some(dividend) = self.market.distribute_dividend(
                    dice_roll.instrument,
                    dice_roll.magnitude,
                    &mut self.portfolios,
                ) else {
                    return Err(GameError::UnknownInstrument {
                        id: dice_roll.instrument,
                    });
                };
                RollOutcome::Dividend(dividend)
            }
        };

        self.roll_in_turn += 1;
        tracing::info!(
            turn = self.turn,
            roll = self.roll_in_turn,
            instrument = %instrument_name,
            action = %dice_roll.action,
            magnitude = %dice_roll.magnitude,
            "dice rolled"
        );

        let report = RollReport {
            turn: self.turn,
            roll: self.roll_in_turn,
            instrument: dice_roll.instrument,
            instrument_name,
            action: dice_roll.action,
            magnitude: dice_roll.magnitude,
            outcome,
        };

        if self.roll_in_turn == self.rolls_per_turn {
            if self.turn == self.turns {
                self.phase = GamePhase::GameOver;
                tracing::info!(turns = self.turns, "game over");
            } else {
                self.phase = GamePhase::TradingWindow;
                self.next_window = 0;
                tracing::info!(turn = self.turn, "trading window session started");
            }
        }

        Ok(report)
    }

    /// Rank every player by final valuation and name the winner(s).
    ///
    /// Holdings are valued at closing prices. Every player tied for the
    /// highest total wins.
    ///
    /// # Errors
    ///
    /// Rejects the request before the game is over.
    pub fn winners(&self) -> Result<WinnerReport, GameError> {
        if self.phase != GamePhase::GameOver {
            return Err(GameError::WrongPhase {
                operation: "declare winners",
                phase: self.phase,
            });
        }

        let mut standings: Vec<PlayerStanding> = self
            .portfolios
            .iter()
            .map(|portfolio| PlayerStanding {
                player: portfolio.name().to_string(),
                cash: portfolio.cash(),
                holdings_value: portfolio.holdings_value(&self.market),
                total: portfolio.valuation(&self.market),
            })
            .collect();
        standings.sort_by(|a, b| b.total.cmp(&a.total));

        let winners = standings.first().map_or_else(Vec::new, |top| {
            standings
                .iter()
                .take_while(|standing| standing.total == top.total)
                .map(|standing| standing.player.clone())
                .collect()
        });

        Ok(WinnerReport { standings, winners })
    }

    fn window_player(&self, operation: &'static str) -> Result<usize, GameError> {
        match self.phase {
            GamePhase::InitialTrading | GamePhase::TradingWindow => {}
            phase => return Err(GameError::WrongPhase { operation, phase }),
        }
        self.window
            .as_ref()
            .map(|window| window.player)
            .ok_or(GameError::NoOpenWindow)
    }

    fn start_rolling(&mut self) {
        if self.phase == GamePhase::TradingWindow {
            self.turn += 1;
        } else {
            self.turn = 1;
        }
        self.roll_in_turn = 0;
        self.phase = GamePhase::Rolling;
        tracing::info!(turn = self.turn, "rolling phase started");
    }
}
