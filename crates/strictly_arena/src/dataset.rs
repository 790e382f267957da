//! Recorded optimal-play positions for training the learned opponent.

use derive_more::{Display, Error};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::BTreeMap;
use std::path::Path;
use strictly_tictactoe::FeatureVector;
use tracing::{debug, info, instrument};

/// One training row: a position and the cell optimal play picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    /// Encoded board.
    pub features: FeatureVector,
    /// Optimal cell, 0-8 in row-major order.
    pub label: usize,
}

/// A set of training rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    /// Wraps existing samples.
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Loads a whitespace-separated dataset file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| DatasetError::new(format!("Failed to read dataset: {}", e)))?;
        let dataset = Self::parse(&content)?;
        info!(samples = dataset.len(), "Dataset loaded");
        Ok(dataset)
    }

    /// Parses rows of at least ten integers: nine features then the label.
    ///
    /// Blank lines are skipped; columns past the tenth are ignored.
    pub fn parse(content: &str) -> Result<Self, DatasetError> {
        let mut samples = Vec::new();
        for (number, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            samples.push(parse_row(number + 1, line)?);
        }
        Ok(Self { samples })
    }

    /// Returns the samples.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if there are no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Splits off `test_fraction` of the rows, stratified by label.
    ///
    /// Rows are grouped by label and each group is shuffled with one
    /// `seed`ed generator, in ascending label order. The test set takes
    /// `ceil(group * test_fraction)` rows from every group, so each label
    /// keeps its share of the data.
    ///
    /// Returns `(train, test)`.
    #[instrument(skip(self), fields(samples = self.len()))]
    pub fn split(&self, test_fraction: f64, seed: u64) -> (Dataset, Dataset) {
        let mut groups: BTreeMap<usize, Vec<Sample>> = BTreeMap::new();
        for sample in &self.samples {
            groups.entry(sample.label).or_default().push(*sample);
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut train = Vec::with_capacity(self.len());
        let mut test = Vec::new();
        for mut group in groups.into_values() {
            group.shuffle(&mut rng);
            let test_len = ((group.len() as f64) * test_fraction).ceil() as usize;
            let held_out = group.split_off(group.len() - test_len.min(group.len()));
            train.extend(group);
            test.extend(held_out);
        }

        debug!(train = train.len(), test = test.len(), "Dataset split");
        (Dataset::new(train), Dataset::new(test))
    }
}

fn parse_row(number: usize, line: &str) -> Result<Sample, DatasetError> {
    let values = line
        .split_whitespace()
        .map(|token| {
            token.parse::<i64>().map_err(|_| {
                DatasetError::new(format!("Line {number}: '{token}' is not an integer"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if values.len() < 10 {
        return Err(DatasetError::new(format!(
            "Line {number}: expected at least 10 values, found {}",
            values.len()
        )));
    }

    let mut features = [0i8; 9];
    for (slot, value) in features.iter_mut().zip(&values[..9]) {
        *slot = i8::try_from(*value).map_err(|_| {
            DatasetError::new(format!("Line {number}: feature {value} out of range"))
        })?;
    }
    let features = FeatureVector::from_values(features);
    features
        .decode()
        .map_err(|e| DatasetError::new(format!("Line {number}: {e}")))?;

    let label = usize::try_from(values[9])
        .ok()
        .filter(|label| *label < 9)
        .ok_or_else(|| {
            DatasetError::new(format!(
                "Line {number}: label {} is not a cell 0-8",
                values[9]
            ))
        })?;

    Ok(Sample { features, label })
}

/// Dataset loading error.
#[derive(Debug, Clone, Display, Error)]
#[display("Dataset error: {} at {}:{}", message, file, line)]
pub struct DatasetError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl DatasetError {
    /// Creates a new dataset error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ROWS: &str = "\
1 0 0 0 0 0 0 0 0 4
1 -1 0 0 0 0 0 0 0 4 0 0
0 0 0 0 1 0 0 0 0 0

-1 1 0 0 1 0 0 0 0 7
";

    #[test]
    fn test_parse_rows() {
        let dataset = Dataset::parse(ROWS).unwrap();
        assert_eq!(dataset.len(), 4);
        assert_eq!(dataset.samples()[0].label, 4);
        assert_eq!(
            dataset.samples()[1].features.values(),
            &[1, -1, 0, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(dataset.samples()[3].label, 7);
    }

    #[test]
    fn test_parse_errors() {
        assert!(Dataset::parse("1 0 0 0 0 0 0 0 4").is_err());
        assert!(Dataset::parse("1 0 0 0 0 0 0 0 0 9").is_err());
        assert!(Dataset::parse("2 0 0 0 0 0 0 0 0 1").is_err());
        assert!(Dataset::parse("1 0 0 0 0 x 0 0 0 1").is_err());
        let error = Dataset::parse("0 0 0 0 0 0 0 0 0 0\n1 1").unwrap_err();
        assert!(error.message.starts_with("Line 2:"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{ROWS}").unwrap();
        let dataset = Dataset::from_file(file.path()).unwrap();
        assert_eq!(dataset, Dataset::parse(ROWS).unwrap());
    }

    #[test]
    fn test_split_is_seeded() {
        let dataset = Dataset::parse(ROWS).unwrap();
        let (train, test) = dataset.split(0.25, 42);
        assert_eq!(dataset.split(0.25, 42), (train.clone(), test.clone()));
        assert_eq!(train.len() + test.len(), dataset.len());

        let (train, test) = dataset.split(0.0, 1);
        assert_eq!(train.len(), 4);
        assert!(test.is_empty());
    }

    fn labelled(count: usize, label: usize) -> Vec<Sample> {
        (0..count)
            .map(|index| {
                let mut values = [0i8; 9];
                values[index % 9] = 1;
                Sample {
                    features: FeatureVector::from_values(values),
                    label,
                }
            })
            .collect()
    }

    fn count(dataset: &Dataset, label: usize) -> usize {
        dataset.samples().iter().filter(|s| s.label == label).count()
    }

    #[test]
    fn test_split_keeps_label_shares() {
        let mut samples = labelled(12, 4);
        samples.extend(labelled(8, 0));
        samples.extend(labelled(4, 8));
        let dataset = Dataset::new(samples);

        let (train, test) = dataset.split(0.25, 7);
        assert_eq!(test.len(), 6);
        assert_eq!(train.len(), 18);
        for (label, total) in [(4, 12), (0, 8), (8, 4)] {
            assert_eq!(count(&test, label) * 4, total);
            assert_eq!(count(&train, label) * 4, total * 3);
        }
    }

    #[test]
    fn test_split_rounds_each_label_up() {
        let mut samples = labelled(10, 2);
        samples.extend(labelled(3, 6));
        let dataset = Dataset::new(samples);

        let (train, test) = dataset.split(0.15, 42);
        // ceil(10 * 0.15) = 2 and ceil(3 * 0.15) = 1
        assert_eq!(count(&test, 2), 2);
        assert_eq!(count(&test, 6), 1);
        assert_eq!(count(&train, 2), 8);
        assert_eq!(count(&train, 6), 2);
    }
}
