//! Validated board coordinates.

use super::error::GameError;
use super::types::Board;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Board dimension (rows and columns).
pub const SIZE: usize = 3;

/// A cell coordinate on the board.
///
/// A `Position` can only be built through a range check, so every
/// board accessor taking one is in range by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    row: usize,
    col: usize,
}

impl Position {
    /// All 9 positions in row-major order.
    ///
    /// Every enumeration of moves in this crate follows this order.
    pub const ALL: [Position; 9] = [
        Position { row: 0, col: 0 },
        Position { row: 0, col: 1 },
        Position { row: 0, col: 2 },
        Position { row: 1, col: 0 },
        Position { row: 1, col: 1 },
        Position { row: 1, col: 2 },
        Position { row: 2, col: 0 },
        Position { row: 2, col: 1 },
        Position { row: 2, col: 2 },
    ];

    /// Creates a position from raw row and column numbers.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfRange`] unless both are in `0..=2`.
    #[instrument]
    pub fn new(row: usize, col: usize) -> Result<Self, GameError> {
        if row >= SIZE || col >= SIZE {
            return Err(GameError::OutOfRange { row, col });
        }
        Ok(Self { row, col })
    }

    /// Creates a position from a row-major board index (0-8).
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Row number (0-2).
    pub fn row(self) -> usize {
        self.row
    }

    /// Column number (0-2).
    pub fn col(self) -> usize {
        self.col
    }

    /// Row-major board index (0-8).
    pub fn index(self) -> usize {
        self.row * SIZE + self.col
    }

    /// Returns the empty positions of `board` in row-major order.
    pub fn valid_moves(board: &Board) -> Vec<Position> {
        Self::ALL
            .iter()
            .copied()
            .filter(|pos| board.is_empty(*pos))
            .collect()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
