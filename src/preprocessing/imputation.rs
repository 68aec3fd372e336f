//! Missing-value imputation steps.
//!
//! Constant fills for embarkation port, cabin and title, a group-conditional
//! mean fill for fare, and a k-nearest-neighbour fill for age over a fixed
//! numeric-encoded subset of columns.

use crate::error::Error;
use crate::frame::{Frame, Value};
use crate::pipeline::Operation;
use std::collections::BTreeSet;

/// Fill missing cells of one column with a constant value.
///
/// Covers the embarkation (`"S"`), cabin (`"U"`) and title (`"None"`)
/// fills of the canonical pipeline.
pub struct FillMissing {
    column: String,
    value: Value,
    name: String,
}

impl FillMissing {
    pub fn new(column: impl Into<String>, value: impl Into<Value>) -> Self {
        let column = column.into();
        let name = format!("fill_missing({})", column);
        Self {
            column,
            value: value.into(),
            name,
        }
    }
}

impl Operation for FillMissing {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, frame: Frame) -> Result<Frame, Error> {
        let filled = frame
            .column(&self.column)?
            .iter()
            .map(|cell| {
                if cell.is_missing() {
                    self.value.clone()
                } else {
                    cell.clone()
                }
            })
            .collect();
        frame.with_column(&self.column, filled)
    }
}

/// Fill missing fares with the mean fare of third-class passengers who
/// embarked at Southampton, the group the known missing-fare passenger
/// belongs to.
pub struct ImputeFare;

impl Operation for ImputeFare {
    fn name(&self) -> &str {
        "impute_fare"
    }

    fn apply(&self, frame: Frame) -> Result<Frame, Error> {
        let fares = frame.column("Fare")?;
        let embarked = frame.column("Embarked")?;
        let pclass = frame.column("Pclass")?;

        let mut sum = 0.0;
        let mut count = 0usize;
        for ((fare, port), class) in fares.iter().zip(embarked).zip(pclass) {
            if port.as_str() == Some("S") && class.as_num() == Some(3.0) {
                if let Some(f) = fare.as_num() {
                    sum += f;
                    count += 1;
                }
            }
        }
        if count == 0 {
            return Err(Error::EmptyData(
                "no third-class Southampton fares to average".to_string(),
            ));
        }
        let mean = sum / count as f64;

        let filled = fares
            .iter()
            .map(|cell| {
                if cell.is_missing() {
                    Value::Num(mean)
                } else {
                    cell.clone()
                }
            })
            .collect();
        frame.with_column("Fare", filled)
    }
}

/// K-nearest-neighbour imputation of missing ages.
///
/// Works over the numeric subset `[Age, Pclass, Sex, SibSp, Parch, Fare,
/// Embarked]`; `Sex` and `Embarked` are label-encoded on a working copy
/// (sorted distinct values mapped to their index), the frame itself keeps
/// its string columns. For each row with a missing age the Euclidean
/// distance over the six complete features selects the `k` nearest donor
/// rows (rows with a known age) and their mean age fills the gap.
pub struct ImputeAgeKnn {
    k: usize,
}

impl ImputeAgeKnn {
    pub fn new(k: usize) -> Self {
        Self { k }
    }
}

impl Default for ImputeAgeKnn {
    fn default() -> Self {
        Self::new(5)
    }
}

/// Label-encode a string column: sorted distinct values map to 0, 1, 2, ...
fn label_encode(frame: &Frame, column: &str) -> Result<Vec<f64>, Error> {
    let cells = frame.column(column)?;
    let mut distinct = BTreeSet::new();
    for cell in cells {
        let s = cell.as_str().ok_or(Error::TypeMismatch {
            column: column.to_string(),
            expected: "string",
        })?;
        distinct.insert(s.to_string());
    }
    let codes: Vec<String> = distinct.into_iter().collect();
    cells
        .iter()
        .map(|cell| {
            let s = cell.as_str().unwrap_or_default();
            codes
                .iter()
                .position(|c| c == s)
                .map(|idx| idx as f64)
                .ok_or(Error::TypeMismatch {
                    column: column.to_string(),
                    expected: "string",
                })
        })
        .collect()
}

impl Operation for ImputeAgeKnn {
    fn name(&self) -> &str {
        "impute_age_knn"
    }

    fn apply(&self, frame: Frame) -> Result<Frame, Error> {
        if self.k == 0 {
            return Err(Error::InvalidParameter("k must be at least 1".to_string()));
        }

        let ages = frame.column("Age")?.to_vec();
        let pclass = frame.numeric("Pclass")?;
        let sibsp = frame.numeric("SibSp")?;
        let parch = frame.numeric("Parch")?;
        let fare = frame.numeric("Fare")?;
        let sex = label_encode(&frame, "Sex")?;
        let embarked = label_encode(&frame, "Embarked")?;

        let features: Vec<[f64; 6]> = (0..frame.n_rows())
            .map(|i| [pclass[i], sex[i], sibsp[i], parch[i], fare[i], embarked[i]])
            .collect();

        let donors: Vec<usize> = (0..ages.len())
            .filter(|&i| ages[i].as_num().is_some())
            .collect();
        if donors.is_empty() {
            return Err(Error::EmptyData(
                "no rows with a known age to impute from".to_string(),
            ));
        }

        let mut filled = Vec::with_capacity(ages.len());
        for (i, cell) in ages.iter().enumerate() {
            match cell.as_num() {
                Some(age) => filled.push(Value::Num(age)),
                None => {
                    let mut neighbours: Vec<(f64, f64)> = donors
                        .iter()
                        .map(|&d| {
                            let dist: f64 = features[i]
                                .iter()
                                .zip(&features[d])
                                .map(|(a, b)| (a - b).powi(2))
                                .sum::<f64>()
                                .sqrt();
                            // Donor indices only hold rows with a known age.
                            let age = ages[d].as_num().unwrap_or(f64::NAN);
                            (dist, age)
                        })
                        .collect();
                    neighbours
                        .sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
                    let take = self.k.min(neighbours.len());
                    let mean: f64 =
                        neighbours[..take].iter().map(|(_, age)| age).sum::<f64>() / take as f64;
                    filled.push(Value::Num(mean));
                }
            }
        }
        frame.with_column("Age", filled)
    }
}
