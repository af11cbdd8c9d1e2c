//! Expanded taxonomy loading.
//!
//! The resource is a JSON object keyed by mood, each value a three-element
//! array:
//!
//! ```json
//! {
//!     "calm": [["calm", "mellow"], ["calm", "chill"], ["chilling effect"]],
//!     "sad":  [["sadness"], ["sad"], ["not sad"]]
//! }
//! ```
//!
//! The first list is informational, the second holds substring patterns and
//! the third exclusion filters. Key order is the declaration order.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use super::types::{ExpandedCategory, ExpandedTaxonomy, TaxonomyError};

type RawCategory = (Vec<String>, Vec<String>, Vec<String>);

impl ExpandedTaxonomy {
    /// Load the taxonomy from a JSON file.
    pub fn load(path: &Path) -> Result<Self, TaxonomyError> {
        if !path.exists() {
            return Err(TaxonomyError::FileNotFound(path.display().to_string()));
        }
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Parse the taxonomy from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, TaxonomyError> {
        let raw: Map<String, Value> =
            serde_json::from_str(json).map_err(|e| TaxonomyError::Parse(e.to_string()))?;

        let mut categories = Vec::with_capacity(raw.len());
        for (mood, value) in raw {
            let (reference_tags, patterns, filters): RawCategory = serde_json::from_value(value)
                .map_err(|e| TaxonomyError::Parse(format!("mood '{}': {}", mood, e)))?;
            categories.push(ExpandedCategory {
                mood,
                reference_tags,
                patterns,
                filters,
            });
        }

        Self::new(categories)
    }
}
