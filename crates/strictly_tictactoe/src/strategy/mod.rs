//! Move strategies.
//!
//! A [`Strategy`] picks a cell for the player on turn. The session owns
//! one per seat and dispatches through the trait; strategies read the
//! board and the player handed to them and never track turns themselves.

mod human;
mod learned;
mod minimax;

pub use human::{HumanStrategy, MoveSource, ScriptedMoves};
pub use learned::{LearnedStrategy, RankedPredictor};
pub use minimax::{DRAW_SCORE, LOSS_SCORE, MinimaxStrategy, WIN_SCORE};

use super::{Board, GameError, Player, Position};

/// Trait for anything that can choose a move.
pub trait Strategy {
    /// Chooses a cell for `player` on `board`.
    ///
    /// # Errors
    ///
    /// Automated strategies return [`GameError::NoLegalMoves`] on a full
    /// board. Human input may also yield [`GameError::OutOfRange`] or
    /// [`GameError::InputClosed`].
    fn choose_move(&mut self, board: &Board, player: Player) -> Result<Position, GameError>;

    /// Returns the strategy's display name.
    fn name(&self) -> &str;

    /// True if the last chosen move was a fallback rather than the
    /// strategy's own pick.
    fn used_fallback(&self) -> bool {
        false
    }
}
