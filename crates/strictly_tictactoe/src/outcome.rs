//! Game outcome, always derived from a board.

use super::Player;
use serde::{Deserialize, Serialize};

/// Outcome of a board position.
///
/// Never stored alongside a board; recompute it with
/// [`rules::outcome`](crate::rules::outcome).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// No winner yet and empty cells remain.
    InProgress,
    /// Player completed a line.
    Win(Player),
    /// Board is full with no line completed.
    Draw,
}

impl GameOutcome {
    /// Returns true once the game is decided.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameOutcome::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameOutcome::Win(player) => Some(*player),
            GameOutcome::InProgress | GameOutcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, GameOutcome::Draw)
    }
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOutcome::InProgress => write!(f, "In progress"),
            GameOutcome::Win(player) => write!(f, "Player {} wins", player),
            GameOutcome::Draw => write!(f, "Draw"),
        }
    }
}
