//! First-class invariants for the turn state machine.
//!
//! Invariants are logical properties that must hold after every accepted
//! move. [`Game::play`] checks them in debug builds.

use super::{Cell, Game, Player, TurnState};
use tracing::warn;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            warn!(invariant = I1::description(), "Invariant violated");
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            warn!(invariant = I2::description(), "Invariant violated");
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: players alternate turns, X first.
///
/// While the game is running, the player on turn is X after an even
/// number of moves and O after an odd number.
pub struct AlternatingTurnInvariant;

impl Invariant<Game> for AlternatingTurnInvariant {
    fn holds(game: &Game) -> bool {
        let history = game.history();

        if history.first().is_some_and(|first| first.player != Player::X) {
            return false;
        }

        if history.windows(2).any(|w| w[0].player == w[1].player) {
            return false;
        }

        match game.state() {
            TurnState::AwaitingMove(player) => {
                let expected = if history.len() % 2 == 0 {
                    Player::X
                } else {
                    Player::O
                };
                player == expected
            }
            TurnState::Terminal(_) => true,
        }
    }

    fn description() -> &'static str {
        "Players alternate turns (X, O, X, O, ...)"
    }
}

/// Invariant: the board is exactly the marks recorded in history.
pub struct HistoryConsistentInvariant;

impl Invariant<Game> for HistoryConsistentInvariant {
    fn holds(game: &Game) -> bool {
        let board = game.board();
        let filled = board.cells().iter().filter(|c| **c != Cell::Empty).count();

        filled == game.history().len()
            && game
                .history()
                .iter()
                .all(|action| board.cell_at(action.position) == Cell::Mark(action.player))
    }

    fn description() -> &'static str {
        "History matches the marks on the board"
    }
}

/// All turn invariants as a composable set.
pub type GameInvariants = (AlternatingTurnInvariant, HistoryConsistentInvariant);
