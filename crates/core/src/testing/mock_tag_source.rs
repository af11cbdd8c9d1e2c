//! Mock tag source for testing.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::labeler::StopSignal;
use crate::tags::{Tag, TagSource, TagStoreError};

/// Mock implementation of the TagSource trait.
///
/// Provides controllable behavior for testing:
/// - Return configured tags per track (unknown tracks have none)
/// - Record every lookup in order
/// - Fail lookups for chosen tracks
/// - Request a stop while serving the n-th lookup
#[derive(Debug, Default)]
pub struct MockTagSource {
    tags: Mutex<HashMap<String, Vec<String>>>,
    lookups: Mutex<Vec<String>>,
    failing: Mutex<HashSet<String>>,
    stop_at: Mutex<Option<(usize, StopSignal)>>,
}

impl MockTagSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tags returned for a track.
    pub fn set_tags(&self, track_id: &str, tags: &[&str]) {
        self.tags.lock().unwrap().insert(
            track_id.to_string(),
            tags.iter().map(|t| t.to_string()).collect(),
        );
    }

    /// Make lookups for this track fail with a database error.
    pub fn fail_on(&self, track_id: &str) {
        self.failing.lock().unwrap().insert(track_id.to_string());
    }

    /// Trigger `signal` during the `n`-th lookup (1-based).
    ///
    /// The lookup itself still succeeds.
    pub fn stop_after(&self, n: usize, signal: StopSignal) {
        *self.stop_at.lock().unwrap() = Some((n, signal));
    }

    /// Track ids looked up so far, in order.
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

impl TagSource for MockTagSource {
    fn fetch_tags(&self, track_id: &str) -> Result<Vec<Tag>, TagStoreError> {
        let count = {
            let mut lookups = self.lookups.lock().unwrap();
            lookups.push(track_id.to_string());
            lookups.len()
        };

        if let Some((n, signal)) = self.stop_at.lock().unwrap().as_ref() {
            if *n == count {
                signal.stop();
            }
        }

        if self.failing.lock().unwrap().contains(track_id) {
            return Err(TagStoreError::Database(format!(
                "mock lookup failure for {}",
                track_id
            )));
        }

        let tags = self
            .tags
            .lock()
            .unwrap()
            .get(track_id)
            .cloned()
            .unwrap_or_default();
        Ok(tags
            .into_iter()
            .map(|text| Tag {
                track_id: track_id.to_string(),
                text,
                weight: 100.0,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_track_has_no_tags() {
        let source = MockTagSource::new();
        assert!(source.fetch_tags("TRX").unwrap().is_empty());
    }

    #[test]
    fn test_configured_tags_and_recorded_lookups() {
        let source = MockTagSource::new();
        source.set_tags("TRA", &["mellow", "rock"]);

        let tags = source.fetch_tags("TRA").unwrap();
        let texts: Vec<&str> = tags.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["mellow", "rock"]);
        source.fetch_tags("TRB").unwrap();
        assert_eq!(source.lookups(), vec!["TRA", "TRB"]);
    }

    #[test]
    fn test_fail_on() {
        let source = MockTagSource::new();
        source.fail_on("TRA");
        assert!(matches!(
            source.fetch_tags("TRA"),
            Err(TagStoreError::Database(_))
        ));
        assert_eq!(source.lookups(), vec!["TRA"]);
    }

    #[test]
    fn test_stop_after() {
        let source = MockTagSource::new();
        let stop = StopSignal::new();
        source.stop_after(2, stop.clone());

        source.fetch_tags("TRA").unwrap();
        assert!(!stop.is_stopped());
        source.fetch_tags("TRB").unwrap();
        assert!(stop.is_stopped());
    }
}
