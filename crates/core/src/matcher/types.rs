//! Types for mood matching.

use serde::{Deserialize, Serialize};

use crate::taxonomy::{ExpandedTaxonomy, UNKNOWN_MOOD};

/// Per-track mood scores under the expanded scheme.
///
/// Holds every mood of the taxonomy, in declaration order, starting at 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    scores: Vec<(String, i64)>,
}

impl Scoreboard {
    /// A zeroed scoreboard for every mood of the taxonomy.
    pub fn new(taxonomy: &ExpandedTaxonomy) -> Self {
        Self {
            scores: taxonomy
                .categories()
                .iter()
                .map(|c| (c.mood.clone(), 0))
                .collect(),
        }
    }

    pub fn get(&self, mood: &str) -> Option<i64> {
        self.scores
            .iter()
            .find(|(name, _)| name == mood)
            .map(|(_, score)| *score)
    }

    /// Add to the score of the mood at `index` (declaration position).
    pub(crate) fn add(&mut self, index: usize, delta: i64) {
        self.scores[index].1 += delta;
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.scores.iter().map(|(name, score)| (name.as_str(), *score))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// First mood whose score strictly exceeds every earlier maximum, starting from 0.
    ///
    /// Later moods with an equal score do not take over; nothing above 0 means unknown.
    pub fn leader(&self) -> &str {
        let mut leader = UNKNOWN_MOOD;
        let mut max_score = 0;
        for (mood, score) in self.iter() {
            if score > max_score {
                leader = mood;
                max_score = score;
            }
        }
        leader
    }
}

/// Outcome of classifying one track's tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodMatch {
    /// Winning mood, or [`UNKNOWN_MOOD`].
    pub mood: String,
    /// Score breakdown (expanded scheme only).
    pub scoreboard: Option<Scoreboard>,
}

impl MoodMatch {
    pub fn is_unknown(&self) -> bool {
        self.mood == UNKNOWN_MOOD
    }
}
