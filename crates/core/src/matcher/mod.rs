//! Tag-to-mood matching.
//!
//! Pure decision functions for both taxonomy schemes, plus the [`MoodMatcher`]
//! trait the labeler uses to run whichever scheme is configured.

mod exact;
mod expanded;
mod types;

pub use exact::{match_exact, ExactMatcher};
pub use expanded::{match_expanded, ExpandedMatcher};
pub use types::{MoodMatch, Scoreboard};

use crate::config::MoodScheme;
use crate::taxonomy::MoodTaxonomy;

/// Trait for classifying a track's tags into a mood.
pub trait MoodMatcher {
    /// Name of this matcher for logging.
    fn name(&self) -> &str;

    fn scheme(&self) -> MoodScheme;

    /// Classify tags given in retrieval order.
    fn classify(&self, tags: &[String]) -> MoodMatch;

    /// Moods that get a score column in the output, in declaration order.
    fn score_columns(&self) -> Vec<String>;
}

/// Create the matcher for a loaded taxonomy.
pub fn create_matcher(taxonomy: MoodTaxonomy) -> Box<dyn MoodMatcher> {
    match taxonomy {
        MoodTaxonomy::Exact(t) => Box::new(ExactMatcher::new(t)),
        MoodTaxonomy::Expanded(t) => Box::new(ExpandedMatcher::new(t)),
    }
}
