//! Thin CSV loader for raw passenger tables.
//!
//! Fields that parse as `f64` become numeric cells, empty fields become
//! missing cells, everything else stays a string. Type inference is
//! per-cell, matching how the raw Titanic CSV mixes numeric and free-text
//! columns.

use crate::error::Error;
use crate::frame::{Frame, Value};
use std::io::Read;
use std::path::Path;

/// Read a frame from any CSV source with a header row.
///
/// # Errors
/// Returns [`Error::Csv`] on malformed CSV and [`Error::EmptyData`] if the
/// source has no header.
pub fn read_frame<R: Read>(reader: R) -> Result<Frame, Error> {
    let mut csv_reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.is_empty() {
        return Err(Error::EmptyData("CSV source has no header row".to_string()));
    }

    let mut columns: Vec<Vec<Value>> = vec![Vec::new(); headers.len()];
    for record in csv_reader.records() {
        let record = record?;
        for (idx, field) in record.iter().enumerate() {
            if idx < columns.len() {
                columns[idx].push(parse_field(field));
            }
        }
    }

    Frame::from_columns(headers.into_iter().zip(columns).collect())
}

/// Read a frame from a CSV file on disk.
pub fn read_frame_from_path<P: AsRef<Path>>(path: P) -> Result<Frame, Error> {
    let file = std::fs::File::open(path)?;
    read_frame(file)
}

fn parse_field(field: &str) -> Value {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Value::Missing;
    }
    match trimmed.parse::<f64>() {
        Ok(num) => Value::Num(num),
        Err(_) => Value::Str(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
PassengerId,Name,Age,Cabin
1,\"Braund, Mr. Owen\",22,
2,\"Cumings, Mrs. John\",38,C85
";

    #[test]
    fn test_read_frame_shapes_and_types() {
        let frame = read_frame(SAMPLE.as_bytes()).unwrap();
        assert_eq!(frame.n_rows(), 2);
        assert_eq!(frame.names(), vec!["PassengerId", "Name", "Age", "Cabin"]);
        assert_eq!(frame.numeric("Age").unwrap(), vec![22.0, 38.0]);
        assert_eq!(
            frame.column("Name").unwrap()[0],
            Value::from("Braund, Mr. Owen")
        );
    }

    #[test]
    fn test_read_frame_empty_field_is_missing() {
        let frame = read_frame(SAMPLE.as_bytes()).unwrap();
        let cabins = frame.column("Cabin").unwrap();
        assert!(cabins[0].is_missing());
        assert_eq!(cabins[1], Value::from("C85"));
    }

    #[test]
    fn test_read_frame_no_rows() {
        let frame = read_frame("A,B\n".as_bytes()).unwrap();
        assert_eq!(frame.n_rows(), 0);
        assert_eq!(frame.n_cols(), 2);
    }
}
