//! Exhaustive minimax search.
//!
//! O is the maximizing side and X the minimizing side regardless of
//! which player the strategy moves for. Ties go to the first move in
//! row-major order.

use super::Strategy;
use crate::{Board, GameError, GameOutcome, Player, Position, rules};
use tracing::{debug, instrument};

/// Score of a position O has won.
pub const WIN_SCORE: i8 = 1;

/// Score of a position X has won.
pub const LOSS_SCORE: i8 = -1;

/// Score of a drawn position.
pub const DRAW_SCORE: i8 = 0;

/// Strategy that searches the full remaining game tree.
#[derive(Debug, Clone)]
pub struct MinimaxStrategy {
    name: String,
}

impl MinimaxStrategy {
    /// Creates a new minimax strategy.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Scores `board` with `to_move` about to play, under perfect play.
    pub fn evaluate(board: &Board, to_move: Player) -> i8 {
        let mut nodes = 0;
        score(*board, to_move, &mut nodes)
    }

    /// Picks the best cell for `player`, first in row-major order on ties.
    ///
    /// The caller's board is never modified; every branch is explored on
    /// its own copy.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::NoLegalMoves`] if the board is full.
    #[instrument(skip(board))]
    pub fn best_move(board: &Board, player: Player) -> Result<Position, GameError> {
        let mut nodes: u64 = 0;
        let mut best: Option<(Position, i8)> = None;

        for position in rules::legal_moves(board) {
            let value = score(board.with_mark(position, player), player.opponent(), &mut nodes);
            if best.is_none_or(|(_, best_value)| improves(player, value, best_value)) {
                best = Some((position, value));
            }
        }

        let (position, value) = best.ok_or(GameError::NoLegalMoves)?;
        debug!(%player, %position, value, nodes, "Search complete");
        Ok(position)
    }
}

impl Default for MinimaxStrategy {
    fn default() -> Self {
        Self::new("Minimax")
    }
}

impl Strategy for MinimaxStrategy {
    fn choose_move(&mut self, board: &Board, player: Player) -> Result<Position, GameError> {
        Self::best_move(board, player)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// True if `candidate` is strictly better than `best` for `player`.
fn improves(player: Player, candidate: i8, best: i8) -> bool {
    match player {
        Player::O => candidate > best,
        Player::X => candidate < best,
    }
}

fn score(board: Board, to_move: Player, nodes: &mut u64) -> i8 {
    *nodes += 1;

    match rules::outcome(&board) {
        GameOutcome::Win(Player::O) => return WIN_SCORE,
        GameOutcome::Win(Player::X) => return LOSS_SCORE,
        GameOutcome::Draw => return DRAW_SCORE,
        GameOutcome::InProgress => {}
    }

    let mut best: Option<i8> = None;
    for position in Position::ALL {
        if board.is_occupied(position) {
            continue;
        }
        let value = score(board.with_mark(position, to_move), to_move.opponent(), nodes);
        if best.is_none_or(|best_value| improves(to_move, value, best_value)) {
            best = Some(value);
        }
    }

    // An in-progress board always has an empty cell.
    best.unwrap_or(DRAW_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_improves_is_strict() {
        assert!(improves(Player::O, 1, 0));
        assert!(!improves(Player::O, 0, 0));
        assert!(improves(Player::X, -1, 0));
        assert!(!improves(Player::X, 0, 0));
    }

    #[test]
    fn test_terminal_scores() {
        let mut board = Board::new();
        for (index, player) in [(0, Player::O), (4, Player::O), (8, Player::O)] {
            board.set_cell(Position::from_index(index).unwrap(), player).unwrap();
        }
        assert_eq!(MinimaxStrategy::evaluate(&board, Player::X), WIN_SCORE);
    }

    #[test]
    fn test_full_board_has_no_move() {
        use Player::{O, X};
        let mut board = Board::new();
        for (pos, player) in Position::ALL.into_iter().zip([X, O, X, X, O, O, O, X, X]) {
            board.set_cell(pos, player).unwrap();
        }
        assert_eq!(
            MinimaxStrategy::best_move(&board, Player::O),
            Err(GameError::NoLegalMoves)
        );
    }
}
