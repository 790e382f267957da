//! Core domain types for tic-tac-toe.

use super::error::GameError;
use super::position::Position;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Player in the game.
///
/// Iteration order (`Player::iter()`) is X then O, which is also the
/// order in which wins are checked.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second, the maximizing side in search).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A cell on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell marked by a player.
    Mark(Player),
}

impl Cell {
    /// Returns the player who marked this cell, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Mark(player) => Some(player),
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// A plain value: copying it is cheap, and the only mutation is
/// marking a single empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Builds a board from cells in row-major order.
    pub fn from_cells(cells: [Cell; 9]) -> Self {
        Self { cells }
    }

    /// Gets the cell at the given position.
    pub fn cell_at(&self, pos: Position) -> Cell {
        self.cells[pos.index()]
    }

    /// Checks if a cell holds a mark.
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.cell_at(pos) != Cell::Empty
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        !self.is_occupied(pos)
    }

    /// Marks an empty cell for `player`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::IllegalMove`] if the cell already holds a mark.
    #[instrument(skip(self))]
    pub fn set_cell(&mut self, pos: Position, player: Player) -> Result<(), GameError> {
        if self.is_occupied(pos) {
            return Err(GameError::IllegalMove { position: pos });
        }
        self.cells[pos.index()] = Cell::Mark(player);
        Ok(())
    }

    /// Returns all cells as a slice.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Counts the marks placed by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|cell| **cell == Cell::Mark(player))
            .count()
    }

    /// Returns a copy of this board with `pos` marked for `player`.
    ///
    /// Used by search, which explores branches on scratch copies.
    pub(crate) fn with_mark(mut self, pos: Position, player: Player) -> Self {
        self.cells[pos.index()] = Cell::Mark(player);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(Position::ALL.iter().all(|pos| board.is_empty(*pos)));
        assert_eq!(board, Board::default());
    }

    #[test]
    fn test_set_cell_marks_once() {
        let mut board = Board::new();
        let center = Position::new(1, 1).unwrap();

        board.set_cell(center, Player::X).unwrap();
        assert_eq!(board.cell_at(center), Cell::Mark(Player::X));

        let before = board;
        assert_eq!(
            board.set_cell(center, Player::O),
            Err(GameError::IllegalMove { position: center })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_count_marks() {
        let mut board = Board::new();
        board.set_cell(Position::new(0, 0).unwrap(), Player::X).unwrap();
        board.set_cell(Position::new(2, 2).unwrap(), Player::O).unwrap();
        board.set_cell(Position::new(0, 2).unwrap(), Player::X).unwrap();
        assert_eq!(board.count(Player::X), 2);
        assert_eq!(board.count(Player::O), 1);
    }

    #[test]
    fn test_opponent_toggles() {
        assert_eq!(Player::X.opponent(), Player::O);
        assert_eq!(Player::O.opponent().opponent(), Player::O);
    }
}
