//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. Rules are separated from board
//! storage so the turn machine and search can share them.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LINES, check_winner, has_win};

use super::{Board, GameOutcome, Position};

/// Returns every empty cell in row-major order.
pub fn legal_moves(board: &Board) -> Vec<Position> {
    Position::valid_moves(board)
}

/// Derives the outcome of a board.
///
/// Wins are checked for X then O before the board is checked for a draw.
pub fn outcome(board: &Board) -> GameOutcome {
    if let Some(winner) = check_winner(board) {
        GameOutcome::Win(winner)
    } else if is_full(board) {
        GameOutcome::Draw
    } else {
        GameOutcome::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Player;

    #[test]
    fn test_legal_moves_row_major() {
        let mut board = Board::new();
        board.set_cell(Position::new(0, 1).unwrap(), Player::X).unwrap();
        board.set_cell(Position::new(1, 1).unwrap(), Player::O).unwrap();

        let moves = legal_moves(&board);
        assert_eq!(moves.len(), 7);
        assert_eq!(moves[0], Position::new(0, 0).unwrap());
        assert_eq!(moves[1], Position::new(0, 2).unwrap());
        assert!(moves.windows(2).all(|w| w[0].index() < w[1].index()));
    }

    #[test]
    fn test_outcome_in_progress() {
        assert_eq!(outcome(&Board::new()), GameOutcome::InProgress);
    }
}
