//! Column layout of a track dataset.

use crate::config::ColumnsConfig;

use super::{parse_flag, Dataset, DatasetError, TrackRow};

pub const MOOD_COLUMN: &str = "mood";
pub const FOUND_TAGS_COLUMN: &str = "found_tags";
pub const MATCHED_MOOD_COLUMN: &str = "matched_mood";

pub const DEFAULT_MOOD: &str = "";
/// "Not processed" sentinel for the count and flag columns.
pub const DEFAULT_FOUND_TAGS: &str = "-1";
pub const DEFAULT_MATCHED_MOOD: &str = "-1";

/// Resolved column indices for one dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackSchema {
    pub track_id: usize,
    pub artist: usize,
    pub title: usize,
    pub lyrics_file: usize,
    pub is_english: usize,
    pub lyrics_available: usize,
    pub mood: usize,
    pub found_tags: usize,
    pub matched_mood: usize,
}

impl TrackSchema {
    /// Resolve input columns and add the output columns when absent.
    pub fn prepare(dataset: &mut Dataset, columns: &ColumnsConfig) -> Result<Self, DatasetError> {
        let required = |name: &str| {
            dataset
                .column_index(name)
                .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
        };
        let track_id = required(columns.track_id.as_str())?;
        let artist = required(columns.artist.as_str())?;
        let title = required(columns.title.as_str())?;
        let lyrics_file = required(columns.lyrics_file.as_str())?;
        let is_english = required(columns.is_english.as_str())?;
        let lyrics_available = required(columns.lyrics_available.as_str())?;

        let mood = dataset.ensure_column(MOOD_COLUMN, DEFAULT_MOOD);
        let found_tags = dataset.ensure_column(FOUND_TAGS_COLUMN, DEFAULT_FOUND_TAGS);
        let matched_mood = dataset.ensure_column(MATCHED_MOOD_COLUMN, DEFAULT_MATCHED_MOOD);

        Ok(Self {
            track_id,
            artist,
            title,
            lyrics_file,
            is_english,
            lyrics_available,
            mood,
            found_tags,
            matched_mood,
        })
    }

    pub fn is_english(&self, row: &TrackRow) -> bool {
        parse_flag(row.get(self.is_english))
    }

    pub fn lyrics_available(&self, row: &TrackRow) -> bool {
        parse_flag(row.get(self.lyrics_available))
    }

    /// Whether the artist name starts with `prefix`, ignoring case.
    pub fn artist_starts_with(&self, row: &TrackRow, prefix: &str) -> bool {
        row.get(self.artist)
            .to_lowercase()
            .starts_with(&prefix.to_lowercase())
    }
}
