//! Encoding steps: dummy expansion, ordinal bucketing and fixed ordinal maps.

use crate::error::Error;
use crate::frame::{Frame, Value};
use crate::pipeline::Operation;

fn string_cells<'a>(frame: &'a Frame, column: &str) -> Result<Vec<&'a str>, Error> {
    frame
        .column(column)?
        .iter()
        .map(|cell| {
            cell.as_str().ok_or(Error::TypeMismatch {
                column: column.to_string(),
                expected: "string",
            })
        })
        .collect()
}

/// Expand categorical columns into 0/1 indicator columns.
///
/// Categories are sorted ascending; with `drop_first` the first category
/// becomes the implicit reference level. New columns are named
/// `{column}_{category}` and the original column is removed.
pub struct EncodeDummies {
    columns: Vec<String>,
    drop_first: bool,
}

impl EncodeDummies {
    pub fn new(columns: &[&str], drop_first: bool) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            drop_first,
        }
    }
}

impl Operation for EncodeDummies {
    fn name(&self) -> &str {
        "encode_dummies"
    }

    fn apply(&self, mut frame: Frame) -> Result<Frame, Error> {
        for column in &self.columns {
            let cells: Vec<String> = string_cells(&frame, column)?
                .into_iter()
                .map(str::to_string)
                .collect();
            let mut categories = cells.clone();
            categories.sort_unstable();
            categories.dedup();
            let kept: Vec<String> = categories
                .into_iter()
                .skip(usize::from(self.drop_first))
                .collect();

            let mut dummies: Vec<(String, Vec<Value>)> = Vec::with_capacity(kept.len());
            for category in &kept {
                let indicator = cells
                    .iter()
                    .map(|cell| Value::Num(if cell == category { 1.0 } else { 0.0 }))
                    .collect();
                dummies.push((format!("{}_{}", column, category), indicator));
            }

            frame.drop_columns(&[column]);
            for (name, indicator) in dummies {
                frame.set_column(&name, indicator)?;
            }
        }
        Ok(frame)
    }
}

/// Replace a continuous column with quantile-bucket codes `0..bins`.
///
/// Bucket edges are linear-interpolated quantiles of the column itself and
/// intervals are right-closed, so a value equal to an edge falls into the
/// lower bucket.
pub struct BucketQuantile {
    column: String,
    bins: usize,
    name: String,
}

impl BucketQuantile {
    pub fn new(column: impl Into<String>, bins: usize) -> Self {
        let column = column.into();
        let name = format!("bucket_quantile({})", column);
        Self { column, bins, name }
    }
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let fraction = position - lower as f64;
        sorted[lower] + fraction * (sorted[upper] - sorted[lower])
    }
}

impl Operation for BucketQuantile {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, frame: Frame) -> Result<Frame, Error> {
        if self.bins < 2 {
            return Err(Error::InvalidParameter(
                "quantile bucketing needs at least 2 bins".to_string(),
            ));
        }
        let values = frame.numeric(&self.column)?;
        if values.is_empty() {
            return Err(Error::EmptyData(format!(
                "cannot bucket empty column {}",
                self.column
            )));
        }
        let mut sorted = values.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let edges: Vec<f64> = (1..self.bins)
            .map(|i| quantile(&sorted, i as f64 / self.bins as f64))
            .collect();

        let codes = values
            .iter()
            .map(|&v| {
                let bucket = edges.iter().filter(|&&edge| v > edge).count();
                Value::Num(bucket as f64)
            })
            .collect();
        frame.with_column(&self.column, codes)
    }
}

/// Replace a continuous column with equal-width bin codes `0..bins`.
///
/// Values are truncated to whole numbers first (ages arrive fractional for
/// infants), then binned over the observed range with right-closed
/// intervals; the minimum lands in bin 0.
pub struct BucketEqualWidth {
    column: String,
    bins: usize,
    name: String,
}

impl BucketEqualWidth {
    pub fn new(column: impl Into<String>, bins: usize) -> Self {
        let column = column.into();
        let name = format!("bucket_equal_width({})", column);
        Self { column, bins, name }
    }
}

impl Operation for BucketEqualWidth {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, frame: Frame) -> Result<Frame, Error> {
        if self.bins < 1 {
            return Err(Error::InvalidParameter(
                "equal-width bucketing needs at least 1 bin".to_string(),
            ));
        }
        let values: Vec<f64> = frame
            .numeric(&self.column)?
            .into_iter()
            .map(f64::trunc)
            .collect();
        if values.is_empty() {
            return Err(Error::EmptyData(format!(
                "cannot bucket empty column {}",
                self.column
            )));
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let width = (max - min) / self.bins as f64;

        let codes = values
            .iter()
            .map(|&v| {
                let bucket = if width == 0.0 {
                    0
                } else {
                    (((v - min) / width).ceil() as i64 - 1).clamp(0, self.bins as i64 - 1)
                };
                Value::Num(bucket as f64)
            })
            .collect();
        frame.with_column(&self.column, codes)
    }
}

/// Map a categorical column onto fixed integer codes.
///
/// Unlike a pandas `replace`, an unmapped category is an immediate error
/// rather than a silently retained string; the silent variant only defers
/// the failure to feature-matrix extraction.
pub struct MapOrdinal {
    column: String,
    mapping: Vec<(String, f64)>,
    name: String,
}

impl MapOrdinal {
    pub fn new(column: impl Into<String>, mapping: &[(&str, f64)]) -> Self {
        let column = column.into();
        let name = format!("map_ordinal({})", column);
        Self {
            column,
            mapping: mapping
                .iter()
                .map(|(category, code)| (category.to_string(), *code))
                .collect(),
            name,
        }
    }
}

impl Operation for MapOrdinal {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, frame: Frame) -> Result<Frame, Error> {
        let cells = string_cells(&frame, &self.column)?;
        let codes = cells
            .iter()
            .map(|&cell| {
                self.mapping
                    .iter()
                    .find(|(category, _)| category == cell)
                    .map(|(_, code)| Value::Num(*code))
                    .ok_or_else(|| {
                        Error::Parse(format!(
                            "unmapped category `{}` in column {}",
                            cell, self.column
                        ))
                    })
            })
            .collect::<Result<Vec<Value>, Error>>()?;
        frame.with_column(&self.column, codes)
    }
}

/// Remove columns, ignoring names that are already absent.
pub struct DropColumns {
    columns: Vec<String>,
}

impl DropColumns {
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Operation for DropColumns {
    fn name(&self) -> &str {
        "drop_columns"
    }

    fn apply(&self, mut frame: Frame) -> Result<Frame, Error> {
        let names: Vec<&str> = self.columns.iter().map(String::as_str).collect();
        frame.drop_columns(&names);
        Ok(frame)
    }
}
