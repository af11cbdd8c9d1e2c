//! Labeled output dataset and CSV persistence.
//!
//! Per-mood score columns only exist here: rows carry their scoreboard and the
//! columns are materialized when the table is written.

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::matcher::Scoreboard;

use super::{DatasetError, TrackRow};

/// A row of the output with its optional score breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredRow {
    pub row: TrackRow,
    pub scores: Option<Scoreboard>,
}

impl ScoredRow {
    pub fn unscored(row: TrackRow) -> Self {
        Self { row, scores: None }
    }
}

/// The final table: processed rows followed by excluded rows.
#[derive(Debug, Clone, Default)]
pub struct LabeledDataset {
    headers: Vec<String>,
    rows: Vec<ScoredRow>,
    score_columns: Vec<String>,
}

impl LabeledDataset {
    pub fn new(headers: Vec<String>, rows: Vec<ScoredRow>, score_columns: Vec<String>) -> Self {
        Self {
            headers,
            rows,
            score_columns,
        }
    }

    pub fn rows(&self) -> &[ScoredRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Output headers: input headers followed by any score column not already present.
    pub fn output_headers(&self) -> Vec<String> {
        let mut headers = self.headers.clone();
        for column in &self.score_columns {
            if !headers.contains(column) {
                headers.push(column.clone());
            }
        }
        headers
    }

    /// Write the table to `path`, replacing whatever was there.
    pub fn write_csv(&self, path: &Path) -> Result<(), DatasetError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = fs::File::create(path)?;
        self.write_to(file)?;
        debug!("Wrote {} rows to {:?}", self.rows.len(), path);
        Ok(())
    }

    /// Write the table as CSV to any writer.
    pub fn write_to<W: Write>(&self, writer: W) -> Result<(), DatasetError> {
        let headers = self.output_headers();
        let score_indices: Vec<(usize, &str)> = self
            .score_columns
            .iter()
            .filter_map(|c| {
                headers
                    .iter()
                    .position(|h| h == c)
                    .map(|index| (index, c.as_str()))
            })
            .collect();

        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(&headers)?;

        for scored in &self.rows {
            let mut row = scored.row.clone();
            // Rows shorter than the headers get empty cells for new score columns.
            if row.fields().len() < headers.len() {
                row.set(headers.len() - 1, String::new());
            }
            if let Some(scores) = &scored.scores {
                for (index, mood) in &score_indices {
                    if let Some(score) = scores.get(mood) {
                        row.set(*index, score.to_string());
                    }
                }
            }
            csv_writer.write_record(row.fields())?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
