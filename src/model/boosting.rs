//! AdaBoost over axis-aligned decision stumps.
//!
//! Covers the boosted-tree slot of the battery with a deterministic,
//! dependency-free learner: each round picks the stump (feature, threshold,
//! polarity) with the lowest weighted error, then reweights the samples.

use crate::error::Error;
use crate::model::{check_training_shape, Classifier, Fitted};

#[derive(Clone, Copy)]
struct Stump {
    feature: usize,
    threshold: f64,
    /// +1 predicts the positive class above the threshold, -1 below it.
    polarity: f64,
    alpha: f64,
}

impl Stump {
    fn decide(&self, row: &[f64]) -> f64 {
        if row[self.feature] > self.threshold {
            self.polarity
        } else {
            -self.polarity
        }
    }
}

/// Candidate thresholds for one feature: midpoints between consecutive
/// distinct values, plus one below the minimum.
fn thresholds(mut values: Vec<f64>) -> Vec<f64> {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    values.dedup();
    let mut candidates = Vec::with_capacity(values.len());
    if let Some(&first) = values.first() {
        candidates.push(first - 1.0);
    }
    for window in values.windows(2) {
        candidates.push((window[0] + window[1]) / 2.0);
    }
    candidates
}

/// Boosted decision stumps (discrete AdaBoost, two classes).
pub struct AdaBoostStumps {
    rounds: usize,
}

impl AdaBoostStumps {
    pub fn new(rounds: usize) -> Self {
        Self { rounds }
    }
}

impl Default for AdaBoostStumps {
    fn default() -> Self {
        Self::new(50)
    }
}

struct FittedAdaBoost {
    stumps: Vec<Stump>,
    n_features: usize,
}

impl Fitted for FittedAdaBoost {
    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>, Error> {
        x.iter()
            .map(|row| {
                if row.len() != self.n_features {
                    return Err(Error::LengthMismatch {
                        expected: self.n_features,
                        got: row.len(),
                    });
                }
                let vote: f64 = self
                    .stumps
                    .iter()
                    .map(|stump| stump.alpha * stump.decide(row))
                    .sum();
                Ok(if vote > 0.0 { 1.0 } else { 0.0 })
            })
            .collect()
    }
}

impl Classifier for AdaBoostStumps {
    fn name(&self) -> &'static str {
        "AdaBoostClassifier"
    }

    fn fit(&self, x: &[Vec<f64>], y: &[f64]) -> Result<Box<dyn Fitted>, Error> {
        let n_features = check_training_shape(x, y)?;
        if self.rounds == 0 {
            return Err(Error::InvalidParameter(
                "boosting needs at least one round".to_string(),
            ));
        }
        let n = x.len();
        let signed: Vec<f64> = y.iter().map(|&v| if v > 0.5 { 1.0 } else { -1.0 }).collect();
        let mut weights = vec![1.0 / n as f64; n];
        let mut stumps = Vec::new();

        for _ in 0..self.rounds {
            let mut best: Option<(Stump, f64)> = None;
            for feature in 0..n_features {
                let column: Vec<f64> = x.iter().map(|row| row[feature]).collect();
                for threshold in thresholds(column.clone()) {
                    for polarity in [1.0, -1.0] {
                        let stump = Stump {
                            feature,
                            threshold,
                            polarity,
                            alpha: 0.0,
                        };
                        let error: f64 = x
                            .iter()
                            .zip(&signed)
                            .zip(&weights)
                            .filter(|((row, &label), _)| stump.decide(row) != label)
                            .map(|(_, &weight)| weight)
                            .sum();
                        if best.map_or(true, |(_, e)| error < e) {
                            best = Some((stump, error));
                        }
                    }
                }
            }
            let (mut stump, error) = match best {
                Some(found) => found,
                None => break,
            };
            if error >= 0.5 {
                // No stump beats chance on the current weighting.
                break;
            }
            let bounded = error.clamp(1e-12, 1.0 - 1e-12);
            stump.alpha = 0.5 * ((1.0 - bounded) / bounded).ln();
            stumps.push(stump);

            if error < 1e-12 {
                // Perfect stump; further rounds cannot improve the vote.
                break;
            }
            let mut total = 0.0;
            for ((weight, row), &label) in weights.iter_mut().zip(x).zip(&signed) {
                *weight *= (-stump.alpha * label * stump.decide(row)).exp();
                total += *weight;
            }
            for weight in weights.iter_mut() {
                *weight /= total;
            }
        }

        if stumps.is_empty() {
            return Err(Error::Model(
                "no stump improved on chance; labels may be constant".to_string(),
            ));
        }
        Ok(Box::new(FittedAdaBoost { stumps, n_features }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_are_midpoints() {
        let candidates = thresholds(vec![3.0, 1.0, 2.0, 1.0]);
        assert_eq!(candidates, vec![0.0, 1.5, 2.5]);
    }

    #[test]
    fn test_single_stump_suffices_on_threshold_data() {
        let x: Vec<Vec<f64>> = (0..10).map(|i| vec![i as f64]).collect();
        let y: Vec<f64> = (0..10).map(|i| if i < 5 { 0.0 } else { 1.0 }).collect();
        let model = AdaBoostStumps::default().fit(&x, &y).unwrap();
        assert_eq!(model.score(&x, &y).unwrap(), 1.0);
    }

    #[test]
    fn test_boosting_combines_stumps_on_interval_data() {
        // Positive class sits inside an interval; one stump cannot cut it
        // out, a weighted pair can get close and three can solve it.
        let x: Vec<Vec<f64>> = (0..12).map(|i| vec![i as f64]).collect();
        let y: Vec<f64> = (0..12)
            .map(|i| if (4..8).contains(&i) { 1.0 } else { 0.0 })
            .collect();
        let model = AdaBoostStumps::default().fit(&x, &y).unwrap();
        let score = model.score(&x, &y).unwrap();
        assert!(score >= 0.75, "boosted score was {}", score);
    }

    #[test]
    fn test_indistinguishable_rows_are_error() {
        // Identical features with conflicting labels: every stump sits at
        // exactly chance level, so no round can be recorded.
        let x = vec![vec![1.0], vec![1.0]];
        let y = vec![0.0, 1.0];
        assert!(matches!(
            AdaBoostStumps::default().fit(&x, &y),
            Err(Error::Model(_))
        ));
    }
}
