//! Track dataset - CSV table of tracks with lyric metadata.
//!
//! Unknown columns are carried through untouched and in order. Output columns
//! (`mood`, `found_tags`, `matched_mood`) are added with a default value only
//! when the input does not already have them.

mod output;
mod schema;
mod types;

pub use output::{LabeledDataset, ScoredRow};
pub use schema::{
    TrackSchema, DEFAULT_FOUND_TAGS, DEFAULT_MATCHED_MOOD, DEFAULT_MOOD, FOUND_TAGS_COLUMN,
    MATCHED_MOOD_COLUMN, MOOD_COLUMN,
};
pub use types::*;

use std::io::Read;
use std::path::Path;

use tracing::debug;

/// A CSV dataset held in memory.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<TrackRow>,
}

impl Dataset {
    pub fn new(headers: Vec<String>, rows: Vec<TrackRow>) -> Self {
        Self { headers, rows }
    }

    /// Read a UTF-8 CSV file with a header row.
    pub fn read_csv(path: &Path) -> Result<Self, DatasetError> {
        if !path.is_file() {
            return Err(DatasetError::NotFound(path.display().to_string()));
        }
        let reader = csv::Reader::from_path(path)?;
        let dataset = Self::from_csv_reader(reader)?;
        debug!("Read {} rows from {:?}", dataset.len(), path);
        Ok(dataset)
    }

    /// Read CSV data from any reader (useful for testing).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        Self::from_csv_reader(csv::Reader::from_reader(reader))
    }

    fn from_csv_reader<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, DatasetError> {
        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(TrackRow::new(record.iter().map(str::to_string).collect()));
        }
        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[TrackRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Add a column filled with `default`, unless a column with that name exists.
    ///
    /// Existing values are never overwritten. Returns the column index.
    pub fn ensure_column(&mut self, name: &str, default: &str) -> usize {
        if let Some(index) = self.column_index(name) {
            return index;
        }
        self.headers.push(name.to_string());
        for row in &mut self.rows {
            row.push(default.to_string());
        }
        self.headers.len() - 1
    }

    /// Keep only rows for which `keep` returns true.
    pub fn retain<F: FnMut(&TrackRow) -> bool>(&mut self, keep: F) {
        self.rows.retain(keep);
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<TrackRow>) {
        (self.headers, self.rows)
    }
}
