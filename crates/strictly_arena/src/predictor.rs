//! Nearest-neighbour ranking model.

use crate::dataset::{Dataset, Sample};
use derive_getters::Getters;
use std::collections::BTreeMap;
use std::fmt;
use strictly_tictactoe::{FeatureVector, RankedPredictor};
use tracing::{info, instrument, warn};

/// Ranks cells by the votes of the `k` training rows closest to a position.
///
/// Distance is the sum of absolute feature differences, so an exact
/// match is always nearest. Cells nobody voted for are left out of the
/// ranking.
#[derive(Debug, Clone)]
pub struct NeighborPredictor {
    samples: Vec<Sample>,
    k: usize,
}

impl NeighborPredictor {
    /// Builds a predictor from training rows.
    #[instrument(skip(training), fields(samples = training.len()))]
    pub fn train(training: &Dataset, k: usize) -> Self {
        Self {
            samples: training.samples().to_vec(),
            k: k.max(1),
        }
    }

    /// Scores the top-ranked cell against each `test` row's label.
    ///
    /// Returns `None` for an empty test set. A row the model cannot rank
    /// counts as a miss.
    #[instrument(skip(self, test), fields(samples = test.len()))]
    pub fn report(&self, test: &Dataset) -> Option<ClassificationReport> {
        if test.is_empty() {
            return None;
        }

        let mut counts: BTreeMap<usize, LabelCounts> = BTreeMap::new();
        let mut hits = 0;
        for sample in test.samples() {
            counts.entry(sample.label).or_default().support += 1;
            let Some(predicted) = self.rank(&sample.features).first().copied() else {
                continue;
            };
            counts.entry(predicted).or_default().predicted += 1;
            if predicted == sample.label {
                counts.entry(predicted).or_default().correct += 1;
                hits += 1;
            }
        }

        let classes = counts
            .into_iter()
            .map(|(label, counts)| counts.metrics(label))
            .collect();
        let accuracy = hits as f64 / test.len() as f64;
        info!(accuracy, hits, "Predictor scored");

        Some(ClassificationReport {
            classes,
            accuracy,
            total: test.len(),
        })
    }
}

#[derive(Debug, Default)]
struct LabelCounts {
    support: usize,
    predicted: usize,
    correct: usize,
}

impl LabelCounts {
    fn metrics(&self, label: usize) -> ClassMetrics {
        let precision = ratio(self.correct, self.predicted);
        let recall = ratio(self.correct, self.support);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        ClassMetrics {
            label,
            precision,
            recall,
            f1,
            support: self.support,
        }
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Scores for one cell label.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct ClassMetrics {
    /// Cell label, 0-8.
    label: usize,
    /// Share of predictions of this label that were right.
    precision: f64,
    /// Share of rows with this label that were predicted.
    recall: f64,
    /// Harmonic mean of precision and recall.
    f1: f64,
    /// Rows with this label.
    support: usize,
}

/// Per-label precision and recall plus overall accuracy.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct ClassificationReport {
    /// One entry per label seen in the rows or the predictions, ascending.
    classes: Vec<ClassMetrics>,
    /// Fraction of rows whose label was the top-ranked cell.
    accuracy: f64,
    /// Rows scored.
    total: usize,
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>12}{:>11}{:>10}{:>10}{:>10}",
            "label", "precision", "recall", "f1-score", "support"
        )?;
        for class in &self.classes {
            writeln!(
                f,
                "{:>12}{:>11.2}{:>10.2}{:>10.2}{:>10}",
                class.label, class.precision, class.recall, class.f1, class.support
            )?;
        }
        write!(f, "{:>12}{:>31.2}{:>10}", "accuracy", self.accuracy, self.total)
    }
}

impl RankedPredictor for NeighborPredictor {
    fn rank(&self, features: &FeatureVector) -> Vec<usize> {
        let mut by_distance: Vec<(u32, usize)> = self
            .samples
            .iter()
            .enumerate()
            .map(|(index, sample)| (distance(features, &sample.features), index))
            .collect();
        by_distance.sort_unstable();

        let mut votes = [0usize; 9];
        for (_, index) in by_distance.iter().take(self.k) {
            let label = self.samples[*index].label;
            match votes.get_mut(label) {
                Some(count) => *count += 1,
                None => warn!(label, "Ignoring vote for a cell outside the board"),
            }
        }

        let mut ranking: Vec<usize> = (0..9).filter(|cell| votes[*cell] > 0).collect();
        ranking.sort_by(|a, b| votes[*b].cmp(&votes[*a]).then(a.cmp(b)));
        ranking
    }
}

fn distance(a: &FeatureVector, b: &FeatureVector) -> u32 {
    a.values()
        .iter()
        .zip(b.values())
        .map(|(x, y)| u32::from(x.abs_diff(*y)))
        .sum()
}
