//! Types for the labeling run.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::MoodScheme;
use crate::dataset::{DatasetError, TrackRow, TrackSchema};
use crate::matcher::{MoodMatch, Scoreboard};
use crate::tags::TagStoreError;
use crate::taxonomy::{TaxonomyError, UNKNOWN_MOOD};

/// Errors that can occur during a labeling run.
#[derive(Debug, Error)]
pub enum LabelError {
    /// Taxonomy could not be loaded.
    #[error("taxonomy error: {0}")]
    Taxonomy(#[from] TaxonomyError),

    /// Tag store could not be opened.
    #[error("tag store error: {0}")]
    TagStore(#[from] TagStoreError),

    /// A tag lookup failed mid-run.
    #[error("tag lookup failed for track {track_id}: {source}")]
    Lookup {
        track_id: String,
        #[source]
        source: TagStoreError,
    },

    /// Input could not be read or output could not be written.
    #[error("dataset error: {0}")]
    Dataset(#[from] DatasetError),
}

/// Counters for one labeling run.
///
/// `total == with_tags + zero_tags()` and `labeled <= with_tags` always hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Eligible rows processed.
    pub total: u64,
    /// Processed rows with at least one tag.
    pub with_tags: u64,
    /// Rows with tags where no mood matched.
    pub no_mood_match: u64,
    /// Rows that got a mood.
    pub labeled: u64,
}

impl RunStats {
    pub fn record(&mut self, label: &TrackLabel) {
        self.total += 1;
        if label.found_tags > 0 {
            self.with_tags += 1;
            if !label.is_matched() {
                self.no_mood_match += 1;
            }
        }
        if label.is_matched() {
            self.labeled += 1;
        }
    }

    /// Processed rows without any tag.
    pub fn zero_tags(&self) -> u64 {
        self.total - self.with_tags
    }
}

/// Classification result for one track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackLabel {
    /// Number of tags the store returned.
    pub found_tags: usize,
    /// Winning mood, or [`UNKNOWN_MOOD`].
    pub mood: String,
    /// Per-mood scores (expanded scheme only).
    pub scoreboard: Option<Scoreboard>,
}

impl TrackLabel {
    pub fn new(found_tags: usize, result: MoodMatch) -> Self {
        Self {
            found_tags,
            mood: result.mood,
            scoreboard: result.scoreboard,
        }
    }

    pub fn is_matched(&self) -> bool {
        self.mood != UNKNOWN_MOOD
    }

    /// Write mood, tag count and match flag into the row.
    pub fn apply(&self, row: &mut TrackRow, schema: &TrackSchema) {
        row.set(schema.found_tags, self.found_tags.to_string());
        row.set(schema.matched_mood, if self.is_matched() { "1" } else { "0" });
        row.set(schema.mood, self.mood.clone());
    }
}

/// Cooperative stop flag, checked between rows.
///
/// Cloned handles share the same flag.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    stopped: Arc<AtomicBool>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// What a finished (or stopped) run did.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub scheme: MoodScheme,
    pub stats: RunStats,
    /// Whether the run was stopped before every eligible row was processed.
    pub cancelled: bool,
    /// Rows written to the output (processed, unprocessed and excluded).
    pub rows_written: usize,
    pub output: PathBuf,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}
