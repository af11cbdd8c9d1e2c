//! Types for the tabular track dataset.

use thiserror::Error;

/// Errors for dataset reading and writing.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Dataset not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

impl From<csv::Error> for DatasetError {
    fn from(e: csv::Error) -> Self {
        DatasetError::Csv(e.to_string())
    }
}

/// One row of the dataset, cells aligned with the dataset headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRow {
    fields: Vec<String>,
}

impl TrackRow {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    pub fn get(&self, column: usize) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, column: usize, value: impl Into<String>) {
        if column >= self.fields.len() {
            self.fields.resize(column + 1, String::new());
        }
        self.fields[column] = value.into();
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub(crate) fn push(&mut self, value: String) {
        self.fields.push(value);
    }
}

/// Parse a 0/1 flag cell. Only a cell that reads as the number 1 is set.
pub fn parse_flag(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .map(|v| v == 1.0)
        .unwrap_or(false)
}
