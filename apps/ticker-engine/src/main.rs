//! Ticker Engine Binary
//!
//! Plays a complete game of the stock ticker market game in the terminal.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin ticker-engine
//! ```
//!
//! # Environment Variables
//!
//! ## Optional
//! - `TICKER_CONFIG`: Path to the YAML config file (default: ticker.yaml;
//!   a missing default file means the built-in classic setup)
//! - `TICKER_SEED`: Seed for a reproducible game, overrides the config
//! - `RUST_LOG`: Log level (default: ticker_engine=info)

use std::io;

use anyhow::Context;
use ticker_engine::config::{GameSettings, load_config};
use ticker_engine::shell::GameShell;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let settings = load_settings()?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = GameShell::new(stdin.lock(), stdout.lock());
    shell.run(&settings).context("game shell failed")?;
    Ok(())
}

/// Build game settings from the config file and environment overrides.
fn load_settings() -> anyhow::Result<GameSettings> {
    let path = std::env::var("TICKER_CONFIG").ok();
    let config = load_config(path.as_deref()).context("failed to load configuration")?;
    let mut settings = config.settings();

    if let Ok(seed) = std::env::var("TICKER_SEED") {
        let parsed = seed
            .parse::<u64>()
            .with_context(|| format!("TICKER_SEED must be an unsigned integer, got '{seed}'"))?;
        settings.seed = Some(parsed);
    }

    Ok(settings)
}

/// Log to stderr so the game board keeps stdout to itself.
#[allow(clippy::expect_used)] // Static directives always parse
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                "ticker_engine=info"
                    .parse()
                    .expect("static directive 'ticker_engine=info' is valid"),
            ),
        )
        .with_writer(std::io::stderr)
        .init();
}
