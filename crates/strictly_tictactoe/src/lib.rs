//! Strictly Tic-Tac-Toe - the game core
//!
//! Board, rules, and turn state machine for 3x3 tic-tac-toe, plus the
//! pluggable strategies that choose moves for automated players.
//!
//! # Architecture
//!
//! - **Board & rules**: [`Board`] values and pure predicates in [`rules`]
//! - **Turn machine**: [`Game`] owns the board and whose turn it is
//! - **Strategies**: [`HumanStrategy`], [`MinimaxStrategy`], [`LearnedStrategy`]
//! - **Session**: [`GameSession`] plays one game, reporting to an [`EventSink`]
//!
//! # Example
//!
//! ```
//! use strictly_tictactoe::{GameSession, MinimaxStrategy, NullSink, GameOutcome};
//!
//! let mut session = GameSession::new(
//!     Box::new(MinimaxStrategy::new("X")),
//!     Box::new(MinimaxStrategy::new("O")),
//!     NullSink,
//! );
//! assert_eq!(session.run(), Ok(GameOutcome::Draw));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod error;
mod event;
mod features;
mod game;
mod invariants;
mod outcome;
mod position;
pub mod rules;
mod session;
mod strategy;
mod types;

pub use action::Move;
pub use error::GameError;
pub use event::{EventSink, GameEvent, NullSink};
pub use features::FeatureVector;
pub use game::{Game, TurnState};
pub use invariants::{
    AlternatingTurnInvariant, GameInvariants, HistoryConsistentInvariant, Invariant,
    InvariantSet, InvariantViolation,
};
pub use outcome::GameOutcome;
pub use position::{Position, SIZE};
pub use session::{DEFAULT_MAX_REJECTED_MOVES, GameSession};
pub use strategy::{
    DRAW_SCORE, HumanStrategy, LOSS_SCORE, LearnedStrategy, MinimaxStrategy, MoveSource,
    RankedPredictor, ScriptedMoves, Strategy, WIN_SCORE,
};
pub use types::{Board, Cell, Player};
