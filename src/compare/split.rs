//! Seeded shuffle-split cross-validation plans.

use crate::error::Error;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// One train/dev partition of row indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// A repeated random-permutation split plan.
///
/// Each split reshuffles the full index range with a generator seeded
/// once for the whole plan, then takes the leading `train_fraction` of
/// rows for training and the following `test_fraction` for evaluation.
/// The fractions need not sum to one; leftover rows are held out of
/// both sides.
///
/// # Example
///
/// ```
/// use titanic_ml::compare::ShuffleSplit;
///
/// let plan = ShuffleSplit::default();
/// let splits = plan.splits(100).unwrap();
/// assert_eq!(splits.len(), 10);
/// assert_eq!(splits[0].train.len(), 60);
/// assert_eq!(splits[0].test.len(), 30);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShuffleSplit {
    pub n_splits: usize,
    pub train_fraction: f64,
    pub test_fraction: f64,
    pub seed: u64,
}

impl Default for ShuffleSplit {
    fn default() -> Self {
        Self {
            n_splits: 10,
            train_fraction: 0.6,
            test_fraction: 0.3,
            seed: 0,
        }
    }
}

impl ShuffleSplit {
    /// Produce the index partitions for a dataset of `n_rows` rows.
    pub fn splits(&self, n_rows: usize) -> Result<Vec<Split>, Error> {
        if self.n_splits == 0 {
            return Err(Error::InvalidParameter(
                "n_splits must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.train_fraction)
            || !(0.0..=1.0).contains(&self.test_fraction)
            || self.train_fraction + self.test_fraction > 1.0
        {
            return Err(Error::InvalidParameter(format!(
                "train fraction {} and test fraction {} must each lie in [0, 1] and sum to at most 1",
                self.train_fraction, self.test_fraction
            )));
        }
        let train_n = (n_rows as f64 * self.train_fraction).floor() as usize;
        let test_n = (n_rows as f64 * self.test_fraction).floor() as usize;
        if train_n == 0 || test_n == 0 {
            return Err(Error::EmptyData(format!(
                "{} rows leave an empty train or test side",
                n_rows
            )));
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut indices: Vec<usize> = (0..n_rows).collect();
        let mut splits = Vec::with_capacity(self.n_splits);
        for _ in 0..self.n_splits {
            indices.shuffle(&mut rng);
            splits.push(Split {
                train: indices[..train_n].to_vec(),
                test: indices[train_n..train_n + test_n].to_vec(),
            });
        }
        Ok(splits)
    }
}
