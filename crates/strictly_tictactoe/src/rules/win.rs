//! Win detection logic for tic-tac-toe.

use super::super::{Board, Cell, Player};
use strum::IntoEnumIterator;

/// The 8 winning lines as row-major indices.
pub const LINES: [[usize; 3]; 8] = [
    // Rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonals
    [0, 4, 8],
    [2, 4, 6],
];

/// Checks if `player` holds all three cells of any line.
pub fn has_win(board: &Board, player: Player) -> bool {
    let mark = Cell::Mark(player);
    let cells = board.cells();
    LINES
        .iter()
        .any(|line| line.iter().all(|&index| cells[index] == mark))
}

/// Returns the winner, checking X before O.
pub fn check_winner(board: &Board) -> Option<Player> {
    Player::iter().find(|player| has_win(board, *player))
}
