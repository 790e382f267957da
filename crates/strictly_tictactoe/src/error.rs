//! Error type for board, turn, and strategy operations.

use super::position::Position;
use super::types::Player;
use serde::{Deserialize, Serialize};

/// Error that can occur when validating or applying a move.
///
/// None of these are fatal: a failed operation leaves the game untouched
/// and the caller may re-prompt or reselect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum GameError {
    /// Row or column outside `0..=2`.
    #[display("Position ({row}, {col}) is out of range; rows and columns must be 0, 1, or 2")]
    OutOfRange {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The target cell already holds a mark.
    #[display("Cell {position} is already taken")]
    CellOccupied {
        /// Requested cell.
        position: Position,
    },

    /// A board mutation was attempted on an occupied cell.
    #[display("Illegal move: cell {position} is not empty")]
    IllegalMove {
        /// Requested cell.
        position: Position,
    },

    /// A recorded move names the player who is not on turn.
    #[display("It's not {player}'s turn")]
    WrongPlayer {
        /// Player named by the move.
        player: Player,
    },

    /// A strategy was asked to move on a full board.
    #[display("No legal moves remain")]
    NoLegalMoves,

    /// A move was attempted after the game reached an outcome.
    #[display("Game is already over")]
    GameOver,

    /// The human move source has no more input.
    #[display("Move input closed")]
    InputClosed,

    /// A feature vector held a value other than -1, 0, or +1.
    #[display("Invalid feature {value} at index {index}")]
    InvalidFeature {
        /// Index in the feature vector.
        index: usize,
        /// Offending value.
        value: i8,
    },
}

impl GameError {
    /// Returns true for errors a session answers by asking the same player again.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GameError::OutOfRange { .. } | GameError::CellOccupied { .. }
        )
    }
}

impl std::error::Error for GameError {}
