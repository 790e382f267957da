//! Numeric board encoding for learned predictors.

use super::{Board, Cell, GameError, Player};
use serde::{Deserialize, Serialize};

/// Length-9 board encoding in row-major order.
///
/// X is `+1`, O is `-1`, and an empty cell is `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureVector([i8; 9]);

impl FeatureVector {
    /// Encodes a board.
    pub fn encode(board: &Board) -> Self {
        let cells = *board.cells();
        Self(cells.map(|cell| match cell.player() {
            Some(Player::X) => 1,
            Some(Player::O) => -1,
            None => 0,
        }))
    }

    /// Wraps raw values without checking them.
    pub fn from_values(values: [i8; 9]) -> Self {
        Self(values)
    }

    /// Decodes back into a board.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::InvalidFeature`] for any value outside
    /// `{-1, 0, +1}`.
    pub fn decode(&self) -> Result<Board, GameError> {
        let mut cells = [Cell::Empty; 9];
        for (index, (cell, value)) in cells.iter_mut().zip(self.0).enumerate() {
            *cell = match value {
                1 => Cell::Mark(Player::X),
                -1 => Cell::Mark(Player::O),
                0 => Cell::Empty,
                value => return Err(GameError::InvalidFeature { index, value }),
            };
        }
        Ok(Board::from_cells(cells))
    }

    /// Raw values in row-major order.
    pub fn values(&self) -> &[i8; 9] {
        &self.0
    }
}

impl From<&Board> for FeatureVector {
    fn from(board: &Board) -> Self {
        Self::encode(board)
    }
}
