//! Configuration module for the ticker engine.
//!
//! Provides configuration loading, validation, and environment variable
//! interpolation for the game rules and session pacing.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ticker_engine::config::{Config, load_config};
//!
//! // Load from default path (ticker.yaml); missing file means defaults
//! let config = load_config(None)?;
//!
//! // Load from custom path
//! let config = load_config(Some("custom/ticker.yaml"))?;
//!
//! // Access configuration values
//! println!("turns: {}", config.session.turns);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::shared::{GameRules, Money, Shares};

/// Most players a single game supports.
pub const MAX_PLAYERS: usize = 8;

/// Longest supported game, in turns.
pub const MAX_TURNS: u32 = 200;

/// Most dice rolls in a single turn.
pub const MAX_ROLLS_PER_TURN: u32 = 20;

const DEFAULT_CONFIG_PATH: &str = "ticker.yaml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Game rule overrides.
    #[serde(default)]
    pub game: GameConfig,
    /// Session pacing and randomness.
    #[serde(default)]
    pub session: SessionConfig,
}

/// Game rule configuration.
///
/// All money values are in hundredths, so `500000` is $5000.00.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Cash each player starts with.
    #[serde(default = "default_starting_cash")]
    pub starting_cash: Money,
    /// Shares per tradable lot.
    #[serde(default = "default_lot_size")]
    pub lot_size: u64,
    /// Price instruments open at, and the dividend cutoff.
    #[serde(default = "default_par_price")]
    pub par_price: Money,
    /// Price at which a stock splits and resets to par.
    #[serde(default = "default_split_threshold")]
    pub split_threshold: Money,
    /// Cash a bankrupt player restarts with.
    #[serde(default = "default_bankruptcy_floor")]
    pub bankruptcy_floor: Money,
    /// Tradable instruments, in board order.
    #[serde(default = "default_instruments")]
    pub instruments: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_cash: default_starting_cash(),
            lot_size: default_lot_size(),
            par_price: default_par_price(),
            split_threshold: default_split_threshold(),
            bankruptcy_floor: default_bankruptcy_floor(),
            instruments: default_instruments(),
        }
    }
}

const fn default_starting_cash() -> Money {
    Money::from_cents(500_000)
}
const fn default_lot_size() -> u64 {
    500
}
const fn default_par_price() -> Money {
    Money::from_cents(100)
}
const fn default_split_threshold() -> Money {
    Money::from_cents(200)
}
const fn default_bankruptcy_floor() -> Money {
    Money::from_cents(100_000)
}
fn default_instruments() -> Vec<String> {
    ["Industrial", "Grain", "Oil", "Bonds", "Gold", "Tech"]
        .map(str::to_string)
        .to_vec()
}

/// Session pacing and randomness configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Turns in a full game.
    #[serde(default = "default_turns")]
    pub turns: u32,
    /// Dice rolls per turn.
    #[serde(default = "default_rolls_per_turn")]
    pub rolls_per_turn: u32,
    /// Faces of the magnitude die, in hundredths.
    #[serde(default = "default_magnitudes")]
    pub magnitudes: Vec<Money>,
    /// Seed for reproducible games. Unset means seed from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            turns: default_turns(),
            rolls_per_turn: default_rolls_per_turn(),
            magnitudes: default_magnitudes(),
            seed: None,
        }
    }
}

const fn default_turns() -> u32 {
    10
}
const fn default_rolls_per_turn() -> u32 {
    10
}
fn default_magnitudes() -> Vec<Money> {
    vec![Money::from_cents(5), Money::from_cents(10), Money::from_cents(20)]
}

/// Everything a game session needs, extracted from a validated [`Config`].
#[derive(Debug, Clone)]
pub struct GameSettings {
    /// The rules every market and trade obeys.
    pub rules: GameRules,
    /// Instrument names, in board order.
    pub instruments: Vec<String>,
    /// Faces of the magnitude die.
    pub magnitudes: Vec<Money>,
    /// Turns in a full game.
    pub turns: u32,
    /// Dice rolls per turn.
    pub rolls_per_turn: u32,
    /// Seed for reproducible games.
    pub seed: Option<u64>,
}

impl Config {
    /// Extract the settings a game session is built from.
    #[must_use]
    pub fn settings(&self) -> GameSettings {
        GameSettings {
            rules: GameRules {
                par_price: self.game.par_price,
                split_threshold: self.game.split_threshold,
                lot_size: self.game.lot_size,
                starting_cash: self.game.starting_cash,
                bankruptcy_floor: self.game.bankruptcy_floor,
            },
            instruments: self.game.instruments.clone(),
            magnitudes: self.session.magnitudes.clone(),
            turns: self.session.turns,
            rolls_per_turn: self.session.rolls_per_turn,
            seed: self.session.seed,
        }
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Config::default().settings()
    }
}

impl GameSettings {
    /// Validate the settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` naming the first value that
    /// would make the game unplayable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rules.lot_size == 0 {
            return Err(ConfigError::ValidationError(
                "lot_size must be positive".to_string(),
            ));
        }

        if !self.rules.par_price.is_positive() {
            return Err(ConfigError::ValidationError(
                "par_price must be positive".to_string(),
            ));
        }

        if self.rules.split_threshold <= self.rules.par_price {
            return Err(ConfigError::ValidationError(
                "split_threshold must be above par_price".to_string(),
            ));
        }

        if self.rules.bankruptcy_floor.is_negative() {
            return Err(ConfigError::ValidationError(
                "bankruptcy_floor must not be negative".to_string(),
            ));
        }

        // Every player must be able to afford the opening buy-in. The
        // saturating multiply keeps an absurd lot size in this branch
        // instead of overflowing.
        let buy_in = self.rules.par_price * Shares::from_count(self.rules.lot_size);
        if self.rules.starting_cash < buy_in {
            return Err(ConfigError::ValidationError(
                "starting_cash must cover at least one lot at par".to_string(),
            ));
        }

        if self.instruments.is_empty() {
            return Err(ConfigError::ValidationError(
                "at least one instrument is required".to_string(),
            ));
        }
        for name in &self.instruments {
            if name.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "instrument names must not be blank".to_string(),
                ));
            }
        }
        let mut names: Vec<&str> = self.instruments.iter().map(String::as_str).collect();
        names.sort_unstable();
        names.dedup();
        if names.len() != self.instruments.len() {
            return Err(ConfigError::ValidationError(
                "instrument names must be distinct".to_string(),
            ));
        }

        if self.turns == 0 || self.turns > MAX_TURNS {
            return Err(ConfigError::ValidationError(format!(
                "turns must be between 1 and {MAX_TURNS}"
            )));
        }

        if self.rolls_per_turn == 0 || self.rolls_per_turn > MAX_ROLLS_PER_TURN {
            return Err(ConfigError::ValidationError(format!(
                "rolls_per_turn must be between 1 and {MAX_ROLLS_PER_TURN}"
            )));
        }

        if self.magnitudes.is_empty() {
            return Err(ConfigError::ValidationError(
                "at least one magnitude is required".to_string(),
            ));
        }
        if self.magnitudes.iter().any(|m| !m.is_positive()) {
            return Err(ConfigError::ValidationError(
                "magnitudes must all be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Load configuration from a YAML file.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "ticker.yaml".
///   When no path is given and the default file does not exist, the
///   built-in classic setup is returned.
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let explicit = path.is_some();
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && !explicit => {
            return Ok(Config::default());
        }
        Err(err) => {
            return Err(ConfigError::ReadError {
                path: path.to_string(),
                source: err,
            });
        }
    };

    // Interpolate environment variables
    let interpolated = interpolate_env_vars(&contents);

    // Parse YAML
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;

    // Validate configuration
    validate_config(&config)?;

    Ok(config)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = serde_yaml_bw::from_str(&interpolated)?;
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // The pattern is a literal; it always compiles.
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let mut result = input.to_string();

    // Match ${VAR} or ${VAR:-default} patterns
    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    for cap in re.captures_iter(input) {
        let Some(full_match) = cap.get(0) else {
            continue;
        };
        let Some(var_match) = cap.get(1) else {
            continue;
        };
        let full_match = full_match.as_str();
        let var_name = var_match.as_str();
        let default_value = cap.get(2).map(|m| m.as_str());

        let value = match std::env::var(var_name) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.map_or_else(String::new, str::to_string),
        };

        result = result.replace(full_match, &value);
    }

    result
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    config.settings().validate()
}
