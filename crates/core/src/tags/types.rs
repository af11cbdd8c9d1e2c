//! Types for the tag source.

use thiserror::Error;

/// A tag attached to a track.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    /// External track identifier.
    pub track_id: String,
    /// Free-text tag.
    pub text: String,
    /// Tag weight as stored (0-100 on Last.fm).
    pub weight: f64,
}

/// Errors for tag store operations.
#[derive(Debug, Error)]
pub enum TagStoreError {
    #[error("Tag store not found: {0}")]
    NotFound(String),

    #[error("Tag store is missing table: {0}")]
    MissingTable(String),

    #[error("Database error: {0}")]
    Database(String),
}
