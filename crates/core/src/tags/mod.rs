//! Tag source - read-only access to community tags per track.
//!
//! The backing store is the Last.fm tag database: three relations joined on
//! surrogate keys (`tids`, `tags`, `tid_tag`).

mod sqlite;
mod types;

pub use sqlite::SqliteTagStore;
pub use types::*;

/// Trait for tag lookups.
///
/// Implementations are used sequentially from a single thread; a connection
/// is opened once per run and reused for every lookup.
pub trait TagSource {
    /// All tags attached to a track, in store order.
    ///
    /// A track without tags yields an empty vector, not an error.
    fn fetch_tags(&self, track_id: &str) -> Result<Vec<Tag>, TagStoreError>;
}

/// Escape a value for interpolation inside a single-quoted SQL literal.
///
/// Doubles every single quote and nothing else.
pub fn sanitize(value: &str) -> String {
    value.replace('\'', "''")
}
