//! Exact-scheme matcher: literal tag membership.

use crate::config::MoodScheme;
use crate::taxonomy::{ExactTaxonomy, UNKNOWN_MOOD};

use super::types::MoodMatch;
use super::MoodMatcher;

/// Mood of the first tag (in retrieval order) that belongs to any category.
///
/// Categories are tried in declaration order for each tag, so the earliest tag
/// wins and, within a tag, the earliest declared category wins.
pub fn match_exact<'a, S: AsRef<str>>(taxonomy: &'a ExactTaxonomy, tags: &[S]) -> &'a str {
    for tag in tags {
        let tag = tag.as_ref();
        if let Some(category) = taxonomy.categories().iter().find(|c| c.contains(tag)) {
            return &category.mood;
        }
    }
    UNKNOWN_MOOD
}

/// Matcher over the exact taxonomy.
pub struct ExactMatcher {
    taxonomy: ExactTaxonomy,
}

impl ExactMatcher {
    pub fn new(taxonomy: ExactTaxonomy) -> Self {
        Self { taxonomy }
    }
}

impl MoodMatcher for ExactMatcher {
    fn name(&self) -> &str {
        "exact"
    }

    fn scheme(&self) -> MoodScheme {
        MoodScheme::Exact
    }

    fn classify(&self, tags: &[String]) -> MoodMatch {
        MoodMatch {
            mood: match_exact(&self.taxonomy, tags).to_string(),
            scoreboard: None,
        }
    }

    fn score_columns(&self) -> Vec<String> {
        Vec::new()
    }
}
