//! State-change notifications for presentation layers.

use super::{Board, GameError, GameOutcome, Player, Position};
use serde::{Deserialize, Serialize};

/// Something that happened during a session.
///
/// The core emits these; rendering them is up to the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new game began on an empty board.
    GameStarted,
    /// A move was accepted.
    MoveApplied {
        /// Player who moved.
        player: Player,
        /// Cell that was marked.
        position: Position,
        /// Board after the move.
        board: Board,
        /// The strategy fell back instead of making its own pick.
        fallback: bool,
    },
    /// A proposed move was refused; the same player moves again.
    MoveRejected {
        /// Player whose move was refused.
        player: Player,
        /// Why it was refused.
        error: GameError,
    },
    /// The game reached a terminal outcome.
    OutcomeReached(GameOutcome),
}

/// Receiver of [`GameEvent`]s.
pub trait EventSink {
    /// Handles one event.
    fn notify(&mut self, event: &GameEvent);
}

impl EventSink for Vec<GameEvent> {
    fn notify(&mut self, event: &GameEvent) {
        self.push(event.clone());
    }
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn notify(&mut self, _event: &GameEvent) {}
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn notify(&mut self, event: &GameEvent) {
        (**self).notify(event);
    }
}
