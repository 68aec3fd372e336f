//! Column-oriented tabular data with named, equal-length columns.
//!
//! A [`Frame`] is the dataset abstraction every pipeline step consumes and
//! produces: an ordered collection of named columns, each a `Vec` of
//! [`Value`] cells. All columns share the same row count at all times; every
//! constructor and mutator enforces this invariant.
//!
//! # Example
//! ```
//! use titanic_ml::frame::{Frame, Value};
//!
//! let frame = Frame::from_columns(vec![
//!     ("SibSp".to_string(), vec![Value::Num(1.0), Value::Num(0.0)]),
//!     ("Parch".to_string(), vec![Value::Num(2.0), Value::Num(0.0)]),
//! ])
//! .unwrap();
//!
//! assert_eq!(frame.n_rows(), 2);
//! assert_eq!(frame.numeric("SibSp").unwrap(), vec![1.0, 0.0]);
//! ```

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod csv;

/// A single cell: numeric, string, or missing.
///
/// Mirrors the scalar types the raw Titanic CSV can hold. Missing cells are
/// an explicit variant rather than NaN so string columns can be incomplete
/// too.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// A numeric cell.
    Num(f64),
    /// A categorical / free-text cell.
    Str(String),
    /// A missing cell.
    Missing,
}

impl Value {
    /// Returns the numeric payload, if this cell is numeric.
    pub fn as_num(&self) -> Option<f64> {
        match self {
            Value::Num(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the string payload, if this cell is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this cell is missing.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Num(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Num(v) => write!(f, "{}", v),
            Value::Str(s) => write!(f, "{}", s),
            Value::Missing => write!(f, ""),
        }
    }
}

/// An ordered collection of named, equal-length columns.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    columns: Vec<(String, Vec<Value>)>,
}

impl Frame {
    /// Create an empty frame (no columns, no rows).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a frame from named columns.
    ///
    /// # Errors
    /// Returns [`Error::LengthMismatch`] if the columns disagree in length.
    pub fn from_columns(columns: Vec<(String, Vec<Value>)>) -> Result<Self, Error> {
        if let Some((_, first)) = columns.first() {
            let expected = first.len();
            for (_, values) in &columns {
                if values.len() != expected {
                    return Err(Error::LengthMismatch {
                        expected,
                        got: values.len(),
                    });
                }
            }
        }
        Ok(Self { columns })
    }

    /// Number of rows. An empty frame has zero rows.
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |(_, v)| v.len())
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Whether the frame holds no rows.
    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }

    /// Column names in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Whether a column with this name exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    /// Borrow a column's cells.
    ///
    /// # Errors
    /// Returns [`Error::MissingColumn`] if no column has this name.
    pub fn column(&self, name: &str) -> Result<&[Value], Error> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
            .ok_or_else(|| Error::MissingColumn(name.to_string()))
    }

    /// Insert a column, replacing any existing column of the same name.
    ///
    /// A replaced column keeps its position; a new column is appended.
    ///
    /// # Errors
    /// Returns [`Error::LengthMismatch`] if the frame is non-empty and the
    /// new column's length differs from the row count.
    pub fn set_column(&mut self, name: &str, values: Vec<Value>) -> Result<(), Error> {
        if self.n_cols() > 0 && values.len() != self.n_rows() {
            return Err(Error::LengthMismatch {
                expected: self.n_rows(),
                got: values.len(),
            });
        }
        match self.columns.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = values,
            None => self.columns.push((name.to_string(), values)),
        }
        Ok(())
    }

    /// Consuming variant of [`set_column`](Self::set_column), convenient for
    /// pipeline steps that thread the frame through.
    pub fn with_column(mut self, name: &str, values: Vec<Value>) -> Result<Self, Error> {
        self.set_column(name, values)?;
        Ok(self)
    }

    /// Remove columns by name. Names that do not exist are ignored, matching
    /// a drop-if-present contract.
    pub fn drop_columns(&mut self, names: &[&str]) {
        self.columns.retain(|(n, _)| !names.contains(&n.as_str()));
    }

    /// Extract a column as `f64`, requiring every cell to be numeric.
    ///
    /// # Errors
    /// Returns [`Error::TypeMismatch`] on the first string or missing cell.
    pub fn numeric(&self, name: &str) -> Result<Vec<f64>, Error> {
        self.column(name)?
            .iter()
            .map(|v| {
                v.as_num().ok_or(Error::TypeMismatch {
                    column: name.to_string(),
                    expected: "numeric",
                })
            })
            .collect()
    }
}
