//! Game orchestration between two strategies.

use super::strategy::Strategy;
use super::{EventSink, Game, GameError, GameEvent, GameOutcome, Player, TurnState};
use tracing::{debug, info, instrument, warn};

/// Default limit on consecutive rejected moves within one turn.
pub const DEFAULT_MAX_REJECTED_MOVES: u32 = 64;

/// Runs one game from empty board to outcome.
///
/// The session owns the turn machine and one strategy per seat. It asks
/// the strategy for the player on turn, hands the answer to the machine,
/// and reports what happened to the sink.
pub struct GameSession<E> {
    game: Game,
    player_x: Box<dyn Strategy>,
    player_o: Box<dyn Strategy>,
    sink: E,
    max_rejected_moves: u32,
    started: bool,
}

impl<E: EventSink> GameSession<E> {
    /// Creates a new session.
    pub fn new(player_x: Box<dyn Strategy>, player_o: Box<dyn Strategy>, sink: E) -> Self {
        Self {
            game: Game::new(),
            player_x,
            player_o,
            sink,
            max_rejected_moves: DEFAULT_MAX_REJECTED_MOVES,
            started: false,
        }
    }

    /// Sets how many moves in a row may be rejected before [`run`](Self::run) gives up.
    pub fn with_max_rejected_moves(mut self, limit: u32) -> Self {
        self.max_rejected_moves = limit;
        self
    }

    /// Returns the game being played.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Returns the event sink.
    pub fn sink(&self) -> &E {
        &self.sink
    }

    /// Consumes the session, returning the event sink.
    pub fn into_sink(self) -> E {
        self.sink
    }

    /// Plays until the game is decided.
    ///
    /// [`GameEvent::GameStarted`] is sent once per game, even if `run`
    /// is called again after an error.
    ///
    /// Recoverable errors (out-of-range or occupied cells) are reported to
    /// the sink and the same player is asked again.
    ///
    /// # Errors
    ///
    /// Returns any unrecoverable strategy error, such as
    /// [`GameError::InputClosed`], or the last rejection once the limit
    /// of consecutive rejected moves is exceeded.
    #[instrument(skip(self), fields(x = %self.player_x.name(), o = %self.player_o.name()))]
    pub fn run(&mut self) -> Result<GameOutcome, GameError> {
        if !self.started {
            info!("Starting game");
            self.started = true;
            self.sink.notify(&GameEvent::GameStarted);
        }

        let mut rejected = 0;
        loop {
            let player = match self.game.state() {
                TurnState::Terminal(outcome) => {
                    info!(%outcome, moves = self.game.history().len(), "Game over");
                    self.sink.notify(&GameEvent::OutcomeReached(outcome));
                    return Ok(outcome);
                }
                TurnState::AwaitingMove(player) => player,
            };

            let strategy = match player {
                Player::X => &mut self.player_x,
                Player::O => &mut self.player_o,
            };
            debug!(%player, strategy = %strategy.name(), "Waiting for move");
            let choice = strategy.choose_move(self.game.board(), player);

            match choice.and_then(|position| self.game.play(position).map(|_| position)) {
                Ok(position) => {
                    rejected = 0;
                    self.sink.notify(&GameEvent::MoveApplied {
                        player,
                        position,
                        board: *self.game.board(),
                        fallback: strategy.used_fallback(),
                    });
                }
                Err(error) if error.is_recoverable() => {
                    rejected += 1;
                    warn!(%player, %error, rejected, "Move rejected");
                    self.sink.notify(&GameEvent::MoveRejected {
                        player,
                        error: error.clone(),
                    });
                    if rejected > self.max_rejected_moves {
                        return Err(error);
                    }
                }
                Err(error) => return Err(error),
            }
        }
    }

    /// Starts over with an empty board, keeping both strategies.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        self.game = Game::new();
        self.started = false;
    }
}
