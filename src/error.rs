//! Error type shared by frame, pipeline and comparison code.

use std::fmt;

/// Error type for frame manipulation, pipeline steps and model evaluation.
#[derive(Debug)]
pub enum Error {
    /// A referenced column does not exist in the frame.
    MissingColumn(String),
    /// Column lengths disagree with the frame's row count.
    LengthMismatch { expected: usize, got: usize },
    /// A cell held an unexpected type for the requested operation.
    TypeMismatch { column: String, expected: &'static str },
    /// A field could not be parsed (e.g. a malformed cabin token).
    Parse(String),
    /// Empty data provided where non-empty was required.
    EmptyData(String),
    /// Invalid configuration value (e.g. split fractions summing above 1).
    InvalidParameter(String),
    /// A model failed to fit or predict.
    Model(String),
    /// I/O error during file operations.
    Io(String),
    /// CSV parsing error.
    Csv(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingColumn(name) => {
                write!(f, "Missing column: {}", name)
            }
            Error::LengthMismatch { expected, got } => {
                write!(f, "Length mismatch: expected {} rows, got {}", expected, got)
            }
            Error::TypeMismatch { column, expected } => {
                write!(f, "Type mismatch in column {}: expected {}", column, expected)
            }
            Error::Parse(msg) => {
                write!(f, "Parse error: {}", msg)
            }
            Error::EmptyData(msg) => {
                write!(f, "Empty data: {}", msg)
            }
            Error::InvalidParameter(msg) => {
                write!(f, "Invalid parameter: {}", msg)
            }
            Error::Model(msg) => {
                write!(f, "Model error: {}", msg)
            }
            Error::Io(msg) => {
                write!(f, "I/O error: {}", msg)
            }
            Error::Csv(msg) => {
                write!(f, "CSV error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err.to_string())
    }
}

impl From<smartcore::error::Failed> for Error {
    fn from(err: smartcore::error::Failed) -> Self {
        Error::Model(err.to_string())
    }
}
