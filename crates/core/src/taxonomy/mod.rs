//! Mood taxonomy registry.
//!
//! Holds the two classification schemes:
//! - **Exact**: built-in table, mood → literal tag strings
//! - **Expanded**: loaded from JSON at startup, mood → substring patterns + exclusion filters
//!
//! Declaration order is significant for both schemes and is preserved.

mod exact;
mod expanded;
mod types;

pub use exact::builtin_exact_taxonomy;
pub use types::*;

use tracing::info;

use crate::config::{MoodScheme, TaxonomyConfig};

/// The taxonomy selected for a run.
#[derive(Debug, Clone)]
pub enum MoodTaxonomy {
    Exact(ExactTaxonomy),
    Expanded(ExpandedTaxonomy),
}

impl MoodTaxonomy {
    /// Load the taxonomy for the configured scheme.
    ///
    /// The expanded scheme reads its JSON resource here, so a missing or
    /// empty resource fails before any row is processed.
    pub fn load(config: &TaxonomyConfig) -> Result<Self, TaxonomyError> {
        match config.scheme {
            MoodScheme::Exact => Ok(Self::Exact(builtin_exact_taxonomy())),
            MoodScheme::Expanded => {
                let taxonomy = ExpandedTaxonomy::load(&config.expanded_path)?;
                info!(
                    "Loaded expanded mood taxonomy from {:?} ({} moods)",
                    config.expanded_path,
                    taxonomy.len()
                );
                Ok(Self::Expanded(taxonomy))
            }
        }
    }

    pub fn scheme(&self) -> MoodScheme {
        match self {
            Self::Exact(_) => MoodScheme::Exact,
            Self::Expanded(_) => MoodScheme::Expanded,
        }
    }

    /// Mood names in declaration order.
    pub fn mood_names(&self) -> Vec<String> {
        match self {
            Self::Exact(t) => t.categories().iter().map(|c| c.mood.clone()).collect(),
            Self::Expanded(t) => t.mood_names(),
        }
    }
}
