//! Classifier interface and the algorithm families behind it.
//!
//! Every algorithm in the comparison battery is reachable through two
//! traits: [`Classifier`] (an unfitted descriptor with hyperparameters) and
//! [`Fitted`] (a trained model ready to predict and score). Descriptors are
//! constructed once at registry build time and `fit` takes `&self`, so a
//! descriptor carries no state between folds by construction.
//!
//! The numerically heavy families (forests, trees, nearest neighbours,
//! naive Bayes, logistic regression) delegate to `smartcore`; the remaining
//! families (perceptron, linear SVM, discriminant analysis, boosted stumps)
//! are implemented here.

pub mod adapters;
pub mod boosting;
pub mod discriminant;
pub mod linear;
pub mod registry;

use crate::error::Error;

/// An unfitted classifier descriptor.
pub trait Classifier {
    /// Display name used in the comparison table.
    fn name(&self) -> &'static str;

    /// Train on a feature matrix (rows of equal length) and binary labels.
    ///
    /// # Errors
    /// Propagates numerical failures (non-convergence, singular matrices)
    /// and shape errors immediately.
    fn fit(&self, x: &[Vec<f64>], y: &[f64]) -> Result<Box<dyn Fitted>, Error>;
}

/// A trained model ready for inference.
pub trait Fitted {
    /// Predict one label per row.
    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>, Error>;

    /// Mean accuracy of `predict` against the given labels.
    fn score(&self, x: &[Vec<f64>], y: &[f64]) -> Result<f64, Error> {
        let predicted = self.predict(x)?;
        Ok(accuracy(y, &predicted))
    }
}

/// Fraction of predictions matching the labels, with both sides rounded to
/// the nearest integer class.
pub fn accuracy(truth: &[f64], predicted: &[f64]) -> f64 {
    if truth.is_empty() {
        return 0.0;
    }
    let hits = truth
        .iter()
        .zip(predicted)
        .filter(|(t, p)| (t.round() - p.round()).abs() < f64::EPSILON)
        .count();
    hits as f64 / truth.len() as f64
}

/// Shape checks shared by the in-crate model families.
pub(crate) fn check_training_shape(x: &[Vec<f64>], y: &[f64]) -> Result<usize, Error> {
    if x.is_empty() {
        return Err(Error::EmptyData("cannot fit on an empty matrix".to_string()));
    }
    if x.len() != y.len() {
        return Err(Error::LengthMismatch {
            expected: x.len(),
            got: y.len(),
        });
    }
    let n_features = x[0].len();
    if x.iter().any(|row| row.len() != n_features) {
        return Err(Error::LengthMismatch {
            expected: n_features,
            got: x.iter().map(Vec::len).find(|&l| l != n_features).unwrap_or(0),
        });
    }
    Ok(n_features)
}
