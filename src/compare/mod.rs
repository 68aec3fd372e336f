//! Cross-validated classifier comparison.
//!
//! The harness takes a battery of classifier descriptors and a split
//! plan, trains every classifier on every split and summarises each one
//! into a single ranked row: mean train accuracy, mean dev accuracy,
//! three population standard deviations of the dev accuracies and the
//! mean fit wall time.
//!
//! # Example
//!
//! ```
//! use titanic_ml::compare::ComparisonHarness;
//! use titanic_ml::model::linear::Perceptron;
//! use titanic_ml::model::Classifier;
//!
//! let registry: Vec<Box<dyn Classifier>> = vec![Box::new(Perceptron::default())];
//! let harness = ComparisonHarness::new(registry);
//!
//! let x: Vec<Vec<f64>> = (0..40).map(|i| vec![i as f64]).collect();
//! let y: Vec<f64> = (0..40).map(|i| if i < 20 { 0.0 } else { 1.0 }).collect();
//! let rows = harness.compare(&x, &y).unwrap();
//! assert_eq!(rows[0].name, "Perceptron");
//! ```

mod split;

pub use split::{ShuffleSplit, Split};

use crate::error::Error;
use crate::model::Classifier;
use serde::Serialize;
use std::cmp::Ordering;
use std::time::Instant;

/// The summary line for one classifier across all splits.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    pub name: String,
    pub train_accuracy_mean: f64,
    pub dev_accuracy_mean: f64,
    /// Three population standard deviations of the dev accuracies, a
    /// pessimistic spread estimate for the ranking column.
    pub dev_accuracy_3std: f64,
    pub fit_time_mean: f64,
}

/// Runs every registered classifier through the same split plan.
pub struct ComparisonHarness {
    registry: Vec<Box<dyn Classifier>>,
    plan: ShuffleSplit,
}

impl ComparisonHarness {
    /// Harness over `registry` with the default ten-way shuffle split.
    pub fn new(registry: Vec<Box<dyn Classifier>>) -> Self {
        Self {
            registry,
            plan: ShuffleSplit::default(),
        }
    }

    pub fn with_plan(registry: Vec<Box<dyn Classifier>>, plan: ShuffleSplit) -> Self {
        Self { registry, plan }
    }

    /// Fit and score the whole battery, returning one row per
    /// classifier sorted by descending mean dev accuracy. A fit failure
    /// on any split aborts the comparison.
    pub fn compare(&self, x: &[Vec<f64>], y: &[f64]) -> Result<Vec<ComparisonRow>, Error> {
        if x.len() != y.len() {
            return Err(Error::LengthMismatch {
                expected: x.len(),
                got: y.len(),
            });
        }
        let splits = self.plan.splits(x.len())?;
        let mut rows = Vec::with_capacity(self.registry.len());

        for classifier in &self.registry {
            let mut train_scores = Vec::with_capacity(splits.len());
            let mut dev_scores = Vec::with_capacity(splits.len());
            let mut fit_seconds = Vec::with_capacity(splits.len());

            for split in &splits {
                let (train_x, train_y) = gather(x, y, &split.train);
                let (dev_x, dev_y) = gather(x, y, &split.test);

                let started = Instant::now();
                let model = classifier.fit(&train_x, &train_y)?;
                fit_seconds.push(started.elapsed().as_secs_f64());

                train_scores.push(model.score(&train_x, &train_y)?);
                dev_scores.push(model.score(&dev_x, &dev_y)?);
            }

            let row = ComparisonRow {
                name: classifier.name().to_string(),
                train_accuracy_mean: mean(&train_scores),
                dev_accuracy_mean: mean(&dev_scores),
                dev_accuracy_3std: 3.0 * population_std(&dev_scores),
                fit_time_mean: mean(&fit_seconds),
            };
            tracing::debug!(
                name = row.name.as_str(),
                dev_accuracy = row.dev_accuracy_mean,
                "scored classifier"
            );
            rows.push(row);
        }

        rows.sort_by(|a, b| {
            b.dev_accuracy_mean
                .partial_cmp(&a.dev_accuracy_mean)
                .unwrap_or(Ordering::Equal)
        });
        Ok(rows)
    }
}

fn gather(x: &[Vec<f64>], y: &[f64], indices: &[usize]) -> (Vec<Vec<f64>>, Vec<f64>) {
    let rows = indices.iter().map(|&i| x[i].clone()).collect();
    let labels = indices.iter().map(|&i| y[i]).collect();
    (rows, labels)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let centre = mean(values);
    let variance = values.iter().map(|v| (v - centre).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Fitted;
    use approx::assert_relative_eq;

    /// Predicts by thresholding the first feature, ignoring training.
    struct Threshold(f64);

    struct FittedThreshold(f64);

    impl Fitted for FittedThreshold {
        fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>, Error> {
            Ok(x.iter()
                .map(|row| if row[0] > self.0 { 1.0 } else { 0.0 })
                .collect())
        }
    }

    impl Classifier for Threshold {
        fn name(&self) -> &'static str {
            "Threshold"
        }

        fn fit(&self, _x: &[Vec<f64>], _y: &[f64]) -> Result<Box<dyn Fitted>, Error> {
            Ok(Box::new(FittedThreshold(self.0)))
        }
    }

    /// Always predicts the negative class.
    struct AlwaysZero;

    struct FittedZero;

    impl Fitted for FittedZero {
        fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>, Error> {
            Ok(vec![0.0; x.len()])
        }
    }

    impl Classifier for AlwaysZero {
        fn name(&self) -> &'static str {
            "AlwaysZero"
        }

        fn fit(&self, _x: &[Vec<f64>], _y: &[f64]) -> Result<Box<dyn Fitted>, Error> {
            Ok(Box::new(FittedZero))
        }
    }

    struct AlwaysFails;

    impl Classifier for AlwaysFails {
        fn name(&self) -> &'static str {
            "AlwaysFails"
        }

        fn fit(&self, _x: &[Vec<f64>], _y: &[f64]) -> Result<Box<dyn Fitted>, Error> {
            Err(Error::Model("deliberate failure".to_string()))
        }
    }

    fn stepped_data() -> (Vec<Vec<f64>>, Vec<f64>) {
        let x: Vec<Vec<f64>> = (0..40).map(|i| vec![i as f64]).collect();
        let y: Vec<f64> = (0..40).map(|i| if i < 20 { 0.0 } else { 1.0 }).collect();
        (x, y)
    }

    #[test]
    fn test_rows_are_sorted_by_dev_accuracy() {
        let registry: Vec<Box<dyn Classifier>> =
            vec![Box::new(AlwaysZero), Box::new(Threshold(19.5))];
        let harness = ComparisonHarness::new(registry);
        let (x, y) = stepped_data();
        let rows = harness.compare(&x, &y).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Threshold");
        assert_relative_eq!(rows[0].train_accuracy_mean, 1.0);
        assert_relative_eq!(rows[0].dev_accuracy_mean, 1.0);
        assert_relative_eq!(rows[0].dev_accuracy_3std, 0.0);
        assert!(rows[1].dev_accuracy_mean < 1.0);
    }

    #[test]
    fn test_fit_failure_aborts_the_comparison() {
        let registry: Vec<Box<dyn Classifier>> =
            vec![Box::new(Threshold(19.5)), Box::new(AlwaysFails)];
        let harness = ComparisonHarness::new(registry);
        let (x, y) = stepped_data();
        assert!(matches!(harness.compare(&x, &y), Err(Error::Model(_))));
    }

    #[test]
    fn test_mismatched_labels_are_rejected() {
        let harness = ComparisonHarness::new(vec![]);
        let (x, _) = stepped_data();
        let result = harness.compare(&x, &[0.0, 1.0]);
        assert!(matches!(result, Err(Error::LengthMismatch { .. })));
    }

    #[test]
    fn test_population_std_of_constant_scores_is_zero() {
        assert_relative_eq!(population_std(&[0.8, 0.8, 0.8]), 0.0);
    }

    #[test]
    fn test_population_std_matches_hand_computation() {
        // Values 0.0 and 1.0 have mean 0.5 and population std 0.5.
        assert_relative_eq!(population_std(&[0.0, 1.0]), 0.5);
    }
}
