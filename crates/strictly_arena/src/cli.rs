//! Command-line interface for strictly_arena.

use crate::config::Opponent;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Arena - console tic-tac-toe against a human, a search, or a model
#[derive(Parser, Debug)]
#[command(name = "strictly_arena")]
#[command(about = "Console tic-tac-toe with minimax and learned opponents", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true, default_value = "arena.toml")]
    pub config: PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play games at the console until you decline a rematch
    Play {
        /// Who plays O
        #[arg(short, long, value_enum)]
        opponent: Option<Opponent>,

        #[command(flatten)]
        model: ModelArgs,
    },

    /// Train the learned opponent and report held-out accuracy
    Evaluate {
        #[command(flatten)]
        model: ModelArgs,
    },
}

/// Overrides for the learned opponent's training run.
#[derive(Args, Debug, Default)]
pub struct ModelArgs {
    /// Training data: nine features and a cell label per line
    #[arg(long)]
    pub dataset: Option<PathBuf>,

    /// Number of nearest samples that vote on a move
    #[arg(long)]
    pub neighbors: Option<usize>,

    /// Fraction of samples held out for the accuracy report
    #[arg(long)]
    pub test_fraction: Option<f64>,

    /// Seed for the train/test shuffle
    #[arg(long)]
    pub seed: Option<u64>,
}
