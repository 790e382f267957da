//! Strictly Arena - console tic-tac-toe
//!
//! You play X; O is another person, a minimax search, or a model trained
//! on recorded optimal play.

#![warn(missing_docs)]

mod cli;
mod config;
mod console;
mod dataset;
mod input;
mod predictor;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use config::{ArenaConfig, Opponent};
use console::{ConsoleMoveSource, ConsoleRenderer, StdinInput, ask_replay};
use dataset::Dataset;
use predictor::NeighborPredictor;
use std::io;
use strictly_tictactoe::{
    GameError, GameSession, HumanStrategy, LearnedStrategy, MinimaxStrategy, Player, Strategy,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = ArenaConfig::load(&cli.config)?;

    match cli.command {
        Command::Play { opponent, model } => {
            if let Some(opponent) = opponent {
                config.set_opponent(opponent);
            }
            config.apply(&model)?;
            run_play(&config)
        }
        Command::Evaluate { model } => {
            config.apply(&model)?;
            train(&config).map(|_| ())
        }
    }
}

/// Loads the dataset, trains on the training split, and prints a held-out report.
#[instrument(skip(config), fields(dataset = %config.dataset().display()))]
fn train(config: &ArenaConfig) -> Result<NeighborPredictor> {
    let dataset = Dataset::from_file(config.dataset())
        .with_context(|| format!("loading {}", config.dataset().display()))?;
    println!("Loaded {} samples.", dataset.len());

    let (training, test) = dataset.split(*config.test_fraction(), *config.seed());
    println!("Training nearest-neighbour model (k = {})...", config.neighbors());
    let predictor = NeighborPredictor::train(&training, *config.neighbors());

    match predictor.report(&test) {
        Some(report) => {
            info!(accuracy = *report.accuracy(), test = test.len(), "Model evaluated");
            println!("Model evaluation on held-out test set:");
            println!("Accuracy: {:.4}", report.accuracy());
            println!("{report}");
        }
        None => println!("No held-out samples; skipping evaluation."),
    }
    Ok(predictor)
}

fn human(name: &str) -> Box<dyn Strategy> {
    Box::new(HumanStrategy::new(
        name,
        ConsoleMoveSource::new(StdinInput, io::stdout()),
    ))
}

/// Plays games until the player declines a rematch or input ends.
#[instrument(skip(config), fields(opponent = %config.opponent()))]
fn run_play(config: &ArenaConfig) -> Result<()> {
    let (player_o, humans): (Box<dyn Strategy>, &[Player]) = match config.opponent() {
        Opponent::Human => (human("Player O"), &[Player::X, Player::O]),
        Opponent::Minimax => (Box::new(MinimaxStrategy::new("Computer")), &[Player::X]),
        Opponent::Learned => {
            let predictor = train(config)?;
            println!("Model ready. Let's play!");
            (
                Box::new(LearnedStrategy::new("Computer", predictor)),
                &[Player::X],
            )
        }
    };

    let mode = match config.opponent() {
        Opponent::Human => "Player vs Player",
        Opponent::Minimax => "Player vs Computer (You are X; Computer is O)",
        Opponent::Learned => "Player vs ML Model (You are X; Computer is O)",
    };
    println!("Mode: {mode}.");

    let mut session = GameSession::new(
        human("Player X"),
        player_o,
        ConsoleRenderer::new(io::stdout(), humans),
    )
    .with_max_rejected_moves(*config.max_rejected_moves());

    let mut input = StdinInput;
    loop {
        match session.run() {
            Ok(outcome) => info!(%outcome, "Game finished"),
            Err(GameError::InputClosed) => {
                println!();
                println!("Goodbye!");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }

        if !ask_replay(&mut input, &mut io::stdout())? {
            break;
        }
        session.restart();
    }

    println!("Thank you for playing!");
    Ok(())
}
