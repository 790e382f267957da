//! Strategy backed by an offline-trained ranking model.

use super::Strategy;
use crate::{Board, FeatureVector, GameError, Player, Position, rules};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use tracing::{debug, instrument, warn};

/// A trained model that ranks board cells.
///
/// Given a feature vector, returns cell indices (0-8) by descending
/// preference. The ranking may be partial or name occupied cells.
pub trait RankedPredictor {
    /// Ranks cells for the position described by `features`.
    fn rank(&self, features: &FeatureVector) -> Vec<usize>;
}

impl<F> RankedPredictor for F
where
    F: Fn(&FeatureVector) -> Vec<usize>,
{
    fn rank(&self, features: &FeatureVector) -> Vec<usize> {
        self(features)
    }
}

/// Strategy that plays the predictor's highest-ranked empty cell.
///
/// When no ranked cell is empty, it falls back to a uniformly random
/// legal move.
pub struct LearnedStrategy<P, R = StdRng> {
    name: String,
    predictor: P,
    rng: R,
    fell_back: bool,
}

impl<P: RankedPredictor> LearnedStrategy<P, StdRng> {
    /// Creates a learned strategy seeded from the operating system.
    pub fn new(name: impl Into<String>, predictor: P) -> Self {
        Self::with_rng(name, predictor, StdRng::from_os_rng())
    }
}

impl<P: RankedPredictor, R: rand::Rng> LearnedStrategy<P, R> {
    /// Creates a learned strategy with a caller-supplied randomness source.
    pub fn with_rng(name: impl Into<String>, predictor: P, rng: R) -> Self {
        Self {
            name: name.into(),
            predictor,
            rng,
            fell_back: false,
        }
    }
}

impl<P: RankedPredictor, R: rand::Rng> Strategy for LearnedStrategy<P, R> {
    /// Never fails while the board has an empty cell.
    #[instrument(skip(self, board), fields(strategy = %self.name))]
    fn choose_move(&mut self, board: &Board, player: Player) -> Result<Position, GameError> {
        self.fell_back = false;
        let legal = rules::legal_moves(board);
        if legal.is_empty() {
            return Err(GameError::NoLegalMoves);
        }

        let features = FeatureVector::encode(board);
        let ranking = self.predictor.rank(&features);

        if let Some(position) = ranking
            .iter()
            .filter_map(|&index| Position::from_index(index))
            .find(|position| board.is_empty(*position))
        {
            debug!(%player, %position, "Predictor chose cell");
            return Ok(position);
        }

        warn!(%player, ?ranking, "No ranked cell is empty; choosing at random");
        let position = legal
            .choose(&mut self.rng)
            .copied()
            .ok_or(GameError::NoLegalMoves)?;
        self.fell_back = true;
        Ok(position)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn used_fallback(&self) -> bool {
        self.fell_back
    }
}
