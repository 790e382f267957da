//! Adapter for moves supplied from outside the core.

use super::Strategy;
use crate::{Board, GameError, Player, Position};
use std::collections::VecDeque;
use tracing::debug;

/// Supplier of raw `(row, col)` pairs, typically a person at a keyboard.
///
/// Values are handed over as-is; the core re-validates range and
/// occupancy.
pub trait MoveSource {
    /// Returns the next proposed move, or `None` when input has ended.
    fn next_move(&mut self, board: &Board, player: Player) -> Option<(usize, usize)>;
}

/// Strategy that defers to a [`MoveSource`].
#[derive(Debug)]
pub struct HumanStrategy<S> {
    name: String,
    source: S,
}

impl<S: MoveSource> HumanStrategy<S> {
    /// Creates a human strategy reading from `source`.
    pub fn new(name: impl Into<String>, source: S) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }
}

impl<S: MoveSource> Strategy for HumanStrategy<S> {
    fn choose_move(&mut self, board: &Board, player: Player) -> Result<Position, GameError> {
        let (row, col) = self
            .source
            .next_move(board, player)
            .ok_or(GameError::InputClosed)?;
        debug!(human = %self.name, row, col, "Received move");
        Position::new(row, col)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Move source that replays a fixed list of coordinates.
#[derive(Debug, Clone, Default)]
pub struct ScriptedMoves {
    moves: VecDeque<(usize, usize)>,
}

impl ScriptedMoves {
    /// Creates a source that yields `moves` in order.
    pub fn new(moves: impl IntoIterator<Item = (usize, usize)>) -> Self {
        Self {
            moves: moves.into_iter().collect(),
        }
    }
}

impl MoveSource for ScriptedMoves {
    fn next_move(&mut self, _board: &Board, _player: Player) -> Option<(usize, usize)> {
        self.moves.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_surfaces() {
        let mut human = HumanStrategy::new("Alice", ScriptedMoves::new([(5, 1)]));
        assert_eq!(
            human.choose_move(&Board::new(), Player::X),
            Err(GameError::OutOfRange { row: 5, col: 1 })
        );
        assert_eq!(
            human.choose_move(&Board::new(), Player::X),
            Err(GameError::InputClosed)
        );
    }
}
