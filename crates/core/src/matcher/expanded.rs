//! Expanded-scheme matcher: substring patterns with exclusion filters.
//!
//! With substring matching several moods can fire for the same track, so every
//! mood is scored and the best one wins.

use crate::config::MoodScheme;
use crate::taxonomy::ExpandedTaxonomy;

use super::types::{MoodMatch, Scoreboard};
use super::MoodMatcher;

/// Score every mood against the tags and pick the leader.
///
/// For each mood and each of its patterns, the tags containing the pattern are
/// "liked". The pattern contributes the number of liked tags minus the total
/// number of occurrences of each of the mood's filters inside the liked tags.
/// Contributions can be negative and are not normalized.
///
/// Returns the winning mood (see [`Scoreboard::leader`]) and the full scoreboard.
pub fn match_expanded<S: AsRef<str>>(
    taxonomy: &ExpandedTaxonomy,
    tags: &[S],
) -> (String, Scoreboard) {
    let mut scoreboard = Scoreboard::new(taxonomy);
    for (index, category) in taxonomy.categories().iter().enumerate() {
        for pattern in &category.patterns {
            let liked: Vec<&str> = tags
                .iter()
                .map(|t| t.as_ref())
                .filter(|t| t.contains(pattern.as_str()))
                .collect();
            if liked.is_empty() {
                continue;
            }

            let excluded: usize = category
                .filters
                .iter()
                .map(|filter| {
                    liked
                        .iter()
                        .map(|t| t.matches(filter.as_str()).count())
                        .sum::<usize>()
                })
                .sum();

            scoreboard.add(index, liked.len() as i64 - excluded as i64);
        }
    }
    (scoreboard.leader().to_string(), scoreboard)
}

/// Matcher over the expanded taxonomy.
pub struct ExpandedMatcher {
    taxonomy: ExpandedTaxonomy,
}

impl ExpandedMatcher {
    pub fn new(taxonomy: ExpandedTaxonomy) -> Self {
        Self { taxonomy }
    }
}

impl MoodMatcher for ExpandedMatcher {
    fn name(&self) -> &str {
        "expanded"
    }

    fn scheme(&self) -> MoodScheme {
        MoodScheme::Expanded
    }

    fn classify(&self, tags: &[String]) -> MoodMatch {
        let (mood, scoreboard) = match_expanded(&self.taxonomy, tags);
        MoodMatch {
            mood,
            scoreboard: Some(scoreboard),
        }
    }

    fn score_columns(&self) -> Vec<String> {
        self.taxonomy.mood_names()
    }
}
