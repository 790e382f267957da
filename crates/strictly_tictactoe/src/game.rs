//! Turn state machine for tic-tac-toe.
//!
//! [`Game`] is the single source of truth for whose turn it is and
//! whether the game has ended. Strategies and adapters read it; only
//! [`Game::apply_move`] and [`Game::play`] change it.

use super::invariants::{GameInvariants, InvariantSet};
use super::rules;
use super::{Board, GameError, GameOutcome, Move, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Phase of the turn state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    /// Waiting for the given player to move.
    AwaitingMove(Player),
    /// The game is decided; no further moves are accepted.
    Terminal(GameOutcome),
}

/// One game of tic-tac-toe from empty board to outcome.
///
/// X always moves first. Every failed move leaves the game exactly as
/// it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    state: TurnState,
    history: Vec<Move>,
}

impl Game {
    /// Creates a new game awaiting X's move on an empty board.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            state: TurnState::AwaitingMove(Player::X),
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current phase.
    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Returns the player to move, or `None` once the game is over.
    pub fn to_move(&self) -> Option<Player> {
        match self.state {
            TurnState::AwaitingMove(player) => Some(player),
            TurnState::Terminal(_) => None,
        }
    }

    /// Derives the outcome from the current board.
    pub fn outcome(&self) -> GameOutcome {
        rules::outcome(&self.board)
    }

    /// Returns true once the game is decided.
    pub fn is_over(&self) -> bool {
        matches!(self.state, TurnState::Terminal(_))
    }

    /// Returns every accepted move in order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Applies a move for the player on turn at raw coordinates.
    ///
    /// Coordinates from outside the core are always re-validated here.
    ///
    /// # Errors
    ///
    /// - [`GameError::OutOfRange`] if `row` or `col` is not in `0..=2`.
    /// - [`GameError::CellOccupied`] if the cell already holds a mark.
    /// - [`GameError::GameOver`] if the game is already decided.
    #[instrument(skip(self), fields(to_move = ?self.to_move()))]
    pub fn apply_move(&mut self, row: usize, col: usize) -> Result<TurnState, GameError> {
        let position = Position::new(row, col)?;
        self.play(position)
    }

    /// Applies a move for the player on turn at a validated position.
    ///
    /// # Errors
    ///
    /// - [`GameError::CellOccupied`] if the cell already holds a mark.
    /// - [`GameError::GameOver`] if the game is already decided.
    #[instrument(skip(self), fields(to_move = ?self.to_move()))]
    pub fn play(&mut self, position: Position) -> Result<TurnState, GameError> {
        let player = self.to_move().ok_or(GameError::GameOver)?;

        if self.board.is_occupied(position) {
            return Err(GameError::CellOccupied { position });
        }

        self.board.set_cell(position, player)?;
        self.history.push(Move::new(player, position));

        let outcome = self.outcome();
        self.state = if outcome.is_terminal() {
            TurnState::Terminal(outcome)
        } else {
            TurnState::AwaitingMove(player.opponent())
        };
        debug!(%player, %position, state = ?self.state, "Move applied");

        debug_assert!(
            GameInvariants::check_all(self).is_ok(),
            "Turn invariants violated after {player} played {position}"
        );

        Ok(self.state)
    }

    /// Rebuilds a game from a move list.
    ///
    /// # Errors
    ///
    /// Returns the first error met, including [`GameError::WrongPlayer`]
    /// when a move names the player who is not on turn.
    #[instrument]
    pub fn replay(moves: &[Move]) -> Result<Self, GameError> {
        let mut game = Self::new();
        for action in moves {
            match game.to_move() {
                Some(player) if player != action.player => {
                    return Err(GameError::WrongPlayer {
                        player: action.player,
                    });
                }
                _ => {}
            }
            game.play(action.position)?;
        }
        Ok(game)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
