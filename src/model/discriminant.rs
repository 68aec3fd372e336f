//! Linear and quadratic discriminant analysis for two classes.
//!
//! Both model each class as a Gaussian. LDA pools one covariance matrix
//! across classes and yields a linear decision rule; QDA keeps one
//! covariance per class. Covariances get a small ridge on the diagonal so
//! near-degenerate feature columns do not make them singular outright.

use crate::error::Error;
use crate::model::{check_training_shape, Classifier, Fitted};

fn class_partition(x: &[Vec<f64>], y: &[f64]) -> Result<(Vec<Vec<f64>>, Vec<Vec<f64>>), Error> {
    let mut negative = Vec::new();
    let mut positive = Vec::new();
    for (row, &label) in x.iter().zip(y) {
        if label > 0.5 {
            positive.push(row.clone());
        } else {
            negative.push(row.clone());
        }
    }
    if negative.len() < 2 || positive.len() < 2 {
        return Err(Error::EmptyData(
            "discriminant analysis needs at least two samples per class".to_string(),
        ));
    }
    Ok((negative, positive))
}

fn mean_vector(rows: &[Vec<f64>], n_features: usize) -> Vec<f64> {
    let mut mean = vec![0.0; n_features];
    for row in rows {
        for (m, &v) in mean.iter_mut().zip(row) {
            *m += v;
        }
    }
    for m in mean.iter_mut() {
        *m /= rows.len() as f64;
    }
    mean
}

/// Scatter matrix (sum of outer products of centred rows).
fn scatter(rows: &[Vec<f64>], mean: &[f64], n_features: usize) -> Vec<Vec<f64>> {
    let mut s = vec![vec![0.0; n_features]; n_features];
    for row in rows {
        for i in 0..n_features {
            let di = row[i] - mean[i];
            for j in 0..n_features {
                s[i][j] += di * (row[j] - mean[j]);
            }
        }
    }
    s
}

fn add_ridge(matrix: &mut [Vec<f64>], ridge: f64) {
    for (i, row) in matrix.iter_mut().enumerate() {
        row[i] += ridge;
    }
}

/// Solve `a * x = b` by Gaussian elimination with partial pivoting.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>, Error> {
    let n = b.len();
    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| {
                a[i][col]
                    .abs()
                    .partial_cmp(&a[j][col].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(col);
        if a[pivot][col].abs() < 1e-12 {
            return Err(Error::Model("singular covariance matrix".to_string()));
        }
        a.swap(col, pivot);
        b.swap(col, pivot);
        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }
    let mut x = vec![0.0; n];
    for col in (0..n).rev() {
        let mut sum = b[col];
        for k in col + 1..n {
            sum -= a[col][k] * x[k];
        }
        x[col] = sum / a[col][col];
    }
    Ok(x)
}

/// Invert a symmetric positive-definite matrix by Gauss-Jordan elimination,
/// also returning the log-determinant accumulated from the pivots.
fn invert_with_logdet(mut a: Vec<Vec<f64>>) -> Result<(Vec<Vec<f64>>, f64), Error> {
    let n = a.len();
    let mut inv: Vec<Vec<f64>> = (0..n)
        .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
        .collect();
    let mut log_det = 0.0;

    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| {
                a[i][col]
                    .abs()
                    .partial_cmp(&a[j][col].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(col);
        if a[pivot][col].abs() < 1e-12 {
            return Err(Error::Model("singular covariance matrix".to_string()));
        }
        a.swap(col, pivot);
        inv.swap(col, pivot);

        let pivot_value = a[col][col];
        log_det += pivot_value.abs().ln();
        for k in 0..n {
            a[col][k] /= pivot_value;
            inv[col][k] /= pivot_value;
        }
        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = a[row][col];
            if factor != 0.0 {
                for k in 0..n {
                    a[row][k] -= factor * a[col][k];
                    inv[row][k] -= factor * inv[col][k];
                }
            }
        }
    }
    Ok((inv, log_det))
}

fn mahalanobis(inv: &[Vec<f64>], centred: &[f64]) -> f64 {
    let n = centred.len();
    let mut total = 0.0;
    for i in 0..n {
        let mut partial = 0.0;
        for j in 0..n {
            partial += inv[i][j] * centred[j];
        }
        total += centred[i] * partial;
    }
    total
}

/// Linear discriminant analysis with a pooled covariance estimate.
pub struct Lda {
    ridge: f64,
}

impl Lda {
    pub fn new(ridge: f64) -> Self {
        Self { ridge }
    }
}

impl Default for Lda {
    fn default() -> Self {
        Self::new(1e-6)
    }
}

struct FittedLda {
    weights: Vec<f64>,
    threshold: f64,
}

impl Fitted for FittedLda {
    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>, Error> {
        x.iter()
            .map(|row| {
                if row.len() != self.weights.len() {
                    return Err(Error::LengthMismatch {
                        expected: self.weights.len(),
                        got: row.len(),
                    });
                }
                let projection: f64 = self.weights.iter().zip(row).map(|(w, v)| w * v).sum();
                Ok(if projection > self.threshold { 1.0 } else { 0.0 })
            })
            .collect()
    }
}

impl Classifier for Lda {
    fn name(&self) -> &'static str {
        "LinearDiscriminantAnalysis"
    }

    fn fit(&self, x: &[Vec<f64>], y: &[f64]) -> Result<Box<dyn Fitted>, Error> {
        let n_features = check_training_shape(x, y)?;
        let (negative, positive) = class_partition(x, y)?;

        let mean_neg = mean_vector(&negative, n_features);
        let mean_pos = mean_vector(&positive, n_features);

        let mut pooled = scatter(&negative, &mean_neg, n_features);
        let scatter_pos = scatter(&positive, &mean_pos, n_features);
        let denom = (negative.len() + positive.len() - 2) as f64;
        for (row, pos_row) in pooled.iter_mut().zip(&scatter_pos) {
            for (cell, &p) in row.iter_mut().zip(pos_row) {
                *cell = (*cell + p) / denom;
            }
        }
        add_ridge(&mut pooled, self.ridge);

        let diff: Vec<f64> = mean_pos
            .iter()
            .zip(&mean_neg)
            .map(|(p, n)| p - n)
            .collect();
        let weights = solve(pooled, diff)?;

        // Decision threshold at the midpoint projection, shifted by the
        // class prior log-ratio.
        let midpoint: f64 = weights
            .iter()
            .zip(mean_neg.iter().zip(&mean_pos))
            .map(|(w, (n, p))| w * (n + p) / 2.0)
            .sum();
        let prior_shift = (positive.len() as f64 / negative.len() as f64).ln();
        Ok(Box::new(FittedLda {
            weights,
            threshold: midpoint - prior_shift,
        }))
    }
}

/// Quadratic discriminant analysis: one Gaussian per class.
pub struct Qda {
    ridge: f64,
}

impl Qda {
    pub fn new(ridge: f64) -> Self {
        Self { ridge }
    }
}

impl Default for Qda {
    fn default() -> Self {
        Self::new(1e-6)
    }
}

struct ClassGaussian {
    mean: Vec<f64>,
    inverse: Vec<Vec<f64>>,
    log_det: f64,
    log_prior: f64,
}

impl ClassGaussian {
    fn estimate(rows: &[Vec<f64>], total: usize, ridge: f64, n_features: usize) -> Result<Self, Error> {
        let mean = mean_vector(rows, n_features);
        let mut covariance = scatter(rows, &mean, n_features);
        let denom = (rows.len() - 1) as f64;
        for row in covariance.iter_mut() {
            for cell in row.iter_mut() {
                *cell /= denom;
            }
        }
        add_ridge(&mut covariance, ridge);
        let (inverse, log_det) = invert_with_logdet(covariance)?;
        Ok(Self {
            mean,
            inverse,
            log_det,
            log_prior: (rows.len() as f64 / total as f64).ln(),
        })
    }

    fn log_likelihood(&self, row: &[f64]) -> f64 {
        let centred: Vec<f64> = row.iter().zip(&self.mean).map(|(v, m)| v - m).collect();
        -0.5 * self.log_det - 0.5 * mahalanobis(&self.inverse, &centred) + self.log_prior
    }
}

struct FittedQda {
    negative: ClassGaussian,
    positive: ClassGaussian,
    n_features: usize,
}

impl Fitted for FittedQda {
    fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>, Error> {
        x.iter()
            .map(|row| {
                if row.len() != self.n_features {
                    return Err(Error::LengthMismatch {
                        expected: self.n_features,
                        got: row.len(),
                    });
                }
                let better = self.positive.log_likelihood(row) > self.negative.log_likelihood(row);
                Ok(if better { 1.0 } else { 0.0 })
            })
            .collect()
    }
}

impl Classifier for Qda {
    fn name(&self) -> &'static str {
        "QuadraticDiscriminantAnalysis"
    }

    fn fit(&self, x: &[Vec<f64>], y: &[f64]) -> Result<Box<dyn Fitted>, Error> {
        let n_features = check_training_shape(x, y)?;
        let (negative, positive) = class_partition(x, y)?;
        let total = x.len();
        Ok(Box::new(FittedQda {
            negative: ClassGaussian::estimate(&negative, total, self.ridge, n_features)?,
            positive: ClassGaussian::estimate(&positive, total, self.ridge, n_features)?,
            n_features,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn blobs() -> (Vec<Vec<f64>>, Vec<f64>) {
        let mut x = Vec::new();
        let mut y = Vec::new();
        for i in 0..8 {
            let jitter = (i as f64 - 3.5) * 0.2;
            x.push(vec![-3.0 + jitter, -3.0 - jitter]);
            y.push(0.0);
            x.push(vec![3.0 + jitter, 3.0 - jitter]);
            y.push(1.0);
        }
        (x, y)
    }

    #[test]
    fn test_solve_small_system() {
        let a = vec![vec![2.0, 1.0], vec![1.0, 3.0]];
        let b = vec![5.0, 10.0];
        let x = solve(a, b).unwrap();
        assert_relative_eq!(x[0], 1.0, epsilon = 1e-10);
        assert_relative_eq!(x[1], 3.0, epsilon = 1e-10);
    }

    #[test]
    fn test_solve_singular_is_error() {
        let a = vec![vec![1.0, 2.0], vec![2.0, 4.0]];
        let result = solve(a, vec![1.0, 2.0]);
        assert!(matches!(result, Err(Error::Model(_))));
    }

    #[test]
    fn test_invert_identity() {
        let a = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let (inv, log_det) = invert_with_logdet(a).unwrap();
        assert_relative_eq!(inv[0][0], 1.0);
        assert_relative_eq!(inv[0][1], 0.0);
        assert_relative_eq!(log_det, 0.0);
    }

    #[test]
    fn test_invert_diagonal_logdet() {
        let a = vec![vec![2.0, 0.0], vec![0.0, 4.0]];
        let (inv, log_det) = invert_with_logdet(a).unwrap();
        assert_relative_eq!(inv[0][0], 0.5, epsilon = 1e-10);
        assert_relative_eq!(inv[1][1], 0.25, epsilon = 1e-10);
        assert_relative_eq!(log_det, (8.0f64).ln(), epsilon = 1e-10);
    }

    #[test]
    fn test_lda_separates_blobs() {
        let (x, y) = blobs();
        let model = Lda::default().fit(&x, &y).unwrap();
        assert_relative_eq!(model.score(&x, &y).unwrap(), 1.0);
    }

    #[test]
    fn test_qda_separates_blobs() {
        let (x, y) = blobs();
        let model = Qda::default().fit(&x, &y).unwrap();
        assert_relative_eq!(model.score(&x, &y).unwrap(), 1.0);
    }

    #[test]
    fn test_single_sample_class_is_error() {
        let x = vec![vec![0.0], vec![1.0], vec![2.0]];
        let y = vec![0.0, 0.0, 1.0];
        assert!(matches!(
            Lda::default().fit(&x, &y),
            Err(Error::EmptyData(_))
        ));
    }
}
