//! Batch labeling of a track dataset.
//!
//! The labeler drives each eligible row through tag lookup and mood
//! classification:
//! - **Filtering**: optional artist prefix, then English rows with lyrics only
//! - **Labeling**: sequential, one lookup per row, stats updated as it goes
//! - **Persistence**: processed rows then excluded rows, written as one CSV

mod runner;
mod types;

pub use runner::{run_labeling, LabelRun, Labeler};
pub use types::{LabelError, RunStats, RunSummary, StopSignal, TrackLabel};
