//! Types for the mood taxonomies.

use thiserror::Error;

/// Label given to tracks no mood could be matched for.
pub const UNKNOWN_MOOD: &str = "unknown";

/// Errors for taxonomy loading.
#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("Taxonomy file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read taxonomy: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse taxonomy: {0}")]
    Parse(String),

    #[error("Taxonomy has no moods")]
    Empty,
}

/// One mood of the exact scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactCategory {
    pub mood: String,
    /// Tags that map to this mood by literal equality.
    pub tags: Vec<String>,
}

impl ExactCategory {
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Mood → exact tag strings, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactTaxonomy {
    categories: Vec<ExactCategory>,
}

impl ExactTaxonomy {
    pub fn new(categories: Vec<ExactCategory>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[ExactCategory] {
        &self.categories
    }
}

/// One mood of the expanded scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedCategory {
    pub mood: String,
    /// Exact tag list carried over from the exact scheme. Not used for scoring.
    pub reference_tags: Vec<String>,
    /// Substring patterns; a tag containing one is "liked" by this mood.
    pub patterns: Vec<String>,
    /// Substrings whose occurrences in liked tags are subtracted from the score.
    pub filters: Vec<String>,
}

/// Mood → (reference tags, patterns, filters), in declaration order.
///
/// Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandedTaxonomy {
    categories: Vec<ExpandedCategory>,
}

impl ExpandedTaxonomy {
    pub fn new(categories: Vec<ExpandedCategory>) -> Result<Self, TaxonomyError> {
        if categories.is_empty() {
            return Err(TaxonomyError::Empty);
        }
        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[ExpandedCategory] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn mood_names(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.mood.clone()).collect()
    }
}
