//! Linear decision models: perceptron and a subgradient-trained linear SVM.
//!
//! Both learn a hyperplane `w . x + b` over labels remapped to -1/+1 and
//! share the fitted representation. Training is deterministic: samples are
//! visited in order, no shuffling.

use crate::error::Error;
use crate::model::{check_training_shape, Classifier, Fitted};

fn to_signed(y: &[f64]) -> Vec<f64> {
    y.iter().map(|&v| if v > 0.5 { 1.0 } else { -1.0 }).collect()
}

fn dot(w: &[f64], x: &[f64]) -> f64 {
    w.iter().zip(x).map(|(a, b)| a * b).sum()
}

/// A fitted hyperplane; predicts 1 on the positive side, 0 otherwise.
struct FittedLinear {
    weights: Vec<f64>,
    bias: f64,
}

impl Fitted for FittedLinear {
    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>, Error> {
        x.iter()
            .map(|row| {
                if row.len() != self.weights.len() {
                    return Err(Error::LengthMismatch {
                        expected: self.weights.len(),
                        got: row.len(),
                    });
                }
                let positive = dot(&self.weights, row) + self.bias > 0.0;
                Ok(if positive { 1.0 } else { 0.0 })
            })
            .collect()
    }
}

/// Rosenblatt perceptron, deliberately capped at a few epochs so it stays
/// an online baseline rather than a fully converged linear model.
pub struct Perceptron {
    epochs: usize,
    learning_rate: f64,
}

impl Perceptron {
    pub fn new(epochs: usize, learning_rate: f64) -> Self {
        Self {
            epochs,
            learning_rate,
        }
    }
}

impl Default for Perceptron {
    fn default() -> Self {
        Self::new(5, 1.0)
    }
}

impl Classifier for Perceptron {
    fn name(&self) -> &'static str {
        "Perceptron"
    }

    fn fit(&self, x: &[Vec<f64>], y: &[f64]) -> Result<Box<dyn Fitted>, Error> {
        let n_features = check_training_shape(x, y)?;
        let signed = to_signed(y);
        let mut weights = vec![0.0; n_features];
        let mut bias = 0.0;

        for _ in 0..self.epochs {
            for (row, &label) in x.iter().zip(&signed) {
                let activation = dot(&weights, row) + bias;
                if label * activation <= 0.0 {
                    for (w, &feature) in weights.iter_mut().zip(row) {
                        *w += self.learning_rate * label * feature;
                    }
                    bias += self.learning_rate * label;
                }
            }
        }
        Ok(Box::new(FittedLinear { weights, bias }))
    }
}

/// Linear support vector machine trained with the Pegasos subgradient
/// update on the hinge loss. The bias term is left unregularised.
pub struct LinearSvc {
    epochs: usize,
    lambda: f64,
}

impl LinearSvc {
    pub fn new(epochs: usize, lambda: f64) -> Self {
        Self { epochs, lambda }
    }
}

impl Default for LinearSvc {
    fn default() -> Self {
        Self::new(100, 1e-4)
    }
}

impl Classifier for LinearSvc {
    fn name(&self) -> &'static str {
        "LinearSVC"
    }

    fn fit(&self, x: &[Vec<f64>], y: &[f64]) -> Result<Box<dyn Fitted>, Error> {
        let n_features = check_training_shape(x, y)?;
        if self.lambda <= 0.0 {
            return Err(Error::InvalidParameter(
                "regularisation strength must be positive".to_string(),
            ));
        }
        let signed = to_signed(y);
        let mut weights = vec![0.0; n_features];
        let mut bias = 0.0;
        let mut step: u64 = 0;

        for _ in 0..self.epochs {
            for (row, &label) in x.iter().zip(&signed) {
                step += 1;
                let eta = 1.0 / (self.lambda * step as f64);
                let margin = label * (dot(&weights, row) + bias);
                let shrink = 1.0 - eta * self.lambda;
                for w in weights.iter_mut() {
                    *w *= shrink;
                }
                if margin < 1.0 {
                    for (w, &feature) in weights.iter_mut().zip(row) {
                        *w += eta * label * feature;
                    }
                    bias += eta * label;
                }
            }
        }
        Ok(Box::new(FittedLinear { weights, bias }))
    }
}
