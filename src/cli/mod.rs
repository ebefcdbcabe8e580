//! CLI interface for turbo-bot
//!
//! Provides subcommands for:
//! - `simulate`: Replay a win/loss sequence through the stake manager
//! - `classify`: Show the entry strength for a signal count
//! - `config`: Show the effective configuration

mod classify;
mod simulate;

pub use classify::ClassifyArgs;
pub use simulate::SimulateArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "turbo-bot")]
#[command(about = "Short-duration binary options bot with stake progression and stop limits")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a win/loss sequence through the stake manager
    Simulate(SimulateArgs),
    /// Show the entry strength for a signal count
    Classify(ClassifyArgs),
    /// Show the effective configuration
    Config,
}
