//! Interactive text shell for playing a complete game.
//!
//! The shell is generic over its input and output streams, so tests can
//! drive a whole game from a scripted `Cursor` and capture what a player
//! would see.

mod lookup;

pub use lookup::{resolve, LookupResult};

use std::io::{self, BufRead, Write};

use crate::config::{GameSettings, MAX_PLAYERS};
use crate::domain::shared::Shares;
use crate::domain::trading::TradeSide;
use crate::game::{GamePhase, GameSession};

/// Which window command the player typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Buy,
    Sell,
    Market,
    Done,
}

const COMMANDS: [(&str, Command); 4] = [
    ("buy", Command::Buy),
    ("sell", Command::Sell),
    ("market", Command::Market),
    ("done", Command::Done),
];

const USAGE: &str = "Commands: buy <stock> <shares>, sell <stock> <shares>, market, done";

/// Plays a complete game over any line-based input and output.
pub struct GameShell<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> GameShell<R, W> {
    /// Wrap the streams the game is played over.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run one complete game with the given settings.
    ///
    /// Returns after the winners are announced, or as soon as the input
    /// stream ends.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised by the underlying streams.
    pub fn run(&mut self, settings: &GameSettings) -> io::Result<()> {
        writeln!(
            self.output,
            "Ticker: {} turns of {} rolls each, starting cash {}.",
            settings.turns, settings.rolls_per_turn, settings.rules.starting_cash
        )?;

        let Some(players) = self.prompt_players()? else {
            return self.abandon();
        };
        let mut session = match GameSession::new(settings, &players) {
            Ok(session) => session,
            Err(err) => {
                writeln!(self.output, "{err}")?;
                return Ok(());
            }
        };

        writeln!(self.output, "\nInitial trading session. Everyone buys in.")?;
        if !self.run_window_session(&mut session)? {
            return self.abandon();
        }

        while !session.is_over() {
            match session.phase() {
                GamePhase::Rolling => self.run_rolls(&mut session)?,
                GamePhase::TradingWindow => {
                    writeln!(
                        self.output,
                        "\nTrading window after turn {}.",
                        session.turn()
                    )?;
                    if !self.run_window_session(&mut session)? {
                        return self.abandon();
                    }
                }
                GamePhase::InitialTrading | GamePhase::GameOver => break,
            }
        }

        self.announce_winners(&session)
    }

    /// Ask for the player count and names. `None` means the input ended.
    fn prompt_players(&mut self) -> io::Result<Option<Vec<String>>> {
        let count = loop {
            let Some(line) = self.prompt(&format!("How many players (1-{MAX_PLAYERS})? "))?
            else {
                return Ok(None);
            };
            match line.parse::<usize>() {
                Ok(n) if (1..=MAX_PLAYERS).contains(&n) => break n,
                _ => writeln!(
                    self.output,
                    "Enter a number between 1 and {MAX_PLAYERS}."
                )?,
            }
        };

        let mut players: Vec<String> = Vec::with_capacity(count);
        while players.len() < count {
            let ordinal = players.len() + 1;
            let Some(name) = self.prompt(&format!("Player {ordinal} name: "))? else {
                return Ok(None);
            };
            if name.is_empty() {
                writeln!(self.output, "Names must not be blank.")?;
                continue;
            }
            if players.iter().any(|player| player == &name) {
                writeln!(self.output, "Names must be distinct.")?;
                continue;
            }
            players.push(name);
        }
        Ok(Some(players))
    }

    /// Give every remaining player their trading window, in seating order.
    ///
    /// Returns `false` when the input ended mid-session.
    fn run_window_session(&mut self, session: &mut GameSession) -> io::Result<bool> {
        while let Some(name) = session.next_trader().map(str::to_string) {
            if let Err(err) = session.open_window(&name) {
                writeln!(self.output, "{err}")?;
                return Ok(true);
            }
            self.show_board(session, &name)?;
            if !self.run_window(session, &name)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// One player's command loop, until they close their window.
    fn run_window(&mut self, session: &mut GameSession, name: &str) -> io::Result<bool> {
        loop {
            let Some(line) = self.prompt(&format!("{name}> "))? else {
                return Ok(false);
            };
            if line.is_empty() {
                continue;
            }

            let mut parts = line.split_whitespace();
            let typed = parts.next().unwrap_or_default();
            let stock = parts.next();
            let shares = parts.next();

            match resolve(typed, COMMANDS) {
                LookupResult::Unique(Command::Buy) => {
                    self.execute_trade(session, TradeSide::Buy, stock, shares)?;
                }
                LookupResult::Unique(Command::Sell) => {
                    self.execute_trade(session, TradeSide::Sell, stock, shares)?;
                }
                LookupResult::Unique(Command::Market) => self.show_board(session, name)?,
                LookupResult::Unique(Command::Done) => match session.close_window() {
                    Ok(()) => return Ok(true),
                    Err(err) => writeln!(self.output, "{err}")?,
                },
                LookupResult::Ambiguous(_) | LookupResult::NotFound => {
                    writeln!(self.output, "{USAGE}")?;
                }
            }
        }
    }

    /// Resolve the typed instrument and hand the trade to the session.
    fn execute_trade(
        &mut self,
        session: &mut GameSession,
        side: TradeSide,
        stock: Option<&str>,
        shares: Option<&str>,
    ) -> io::Result<()> {
        let (Some(stock), Some(shares)) = (stock, shares) else {
            return writeln!(self.output, "{USAGE}");
        };
        let Ok(count) = shares.parse::<u64>() else {
            return writeln!(self.output, "Share amounts must be whole numbers.");
        };

        let resolved = resolve(
            stock,
            session
                .market()
                .instruments()
                .map(|instrument| (instrument.name(), instrument.id())),
        );
        match resolved {
            LookupResult::Unique(id) => {
                let result = match side {
                    TradeSide::Buy => session.buy(id, Shares::from_count(count)),
                    TradeSide::Sell => session.sell(id, Shares::from_count(count)),
                };
                match result {
                    Ok(receipt) => writeln!(self.output, "{receipt}"),
                    Err(err) => writeln!(self.output, "{err}"),
                }
            }
            LookupResult::Ambiguous(names) => {
                writeln!(self.output, "'{stock}' matches {}.", names.join(", "))
            }
            LookupResult::NotFound => {
                writeln!(self.output, "No instrument matches '{stock}'.")
            }
        }
    }

    /// Roll out the current turn, narrating every roll.
    fn run_rolls(&mut self, session: &mut GameSession) -> io::Result<()> {
        writeln!(
            self.output,
            "\nRolling turn {} of {}.",
            session.turn(),
            session.turns()
        )?;
        while session.phase() == GamePhase::Rolling {
            match session.roll() {
                Ok(report) => writeln!(self.output, "{report}")?,
                Err(err) => {
                    writeln!(self.output, "{err}")?;
                    break;
                }
            }
        }
        Ok(())
    }

    fn show_board(&mut self, session: &GameSession, player: &str) -> io::Result<()> {
        writeln!(self.output)?;
        write!(self.output, "{}", session.market().display())?;
        if let Some(portfolio) = session.portfolio(player) {
            writeln!(self.output, "{}", portfolio.display(session.market()))?;
        }
        Ok(())
    }

    fn announce_winners(&mut self, session: &GameSession) -> io::Result<()> {
        writeln!(self.output)?;
        match session.winners() {
            Ok(report) => writeln!(self.output, "{report}"),
            Err(err) => writeln!(self.output, "{err}"),
        }
    }

    fn abandon(&mut self) -> io::Result<()> {
        writeln!(self.output, "Input ended. Game abandoned.")
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
