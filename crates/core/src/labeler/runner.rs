//! Labeling orchestrator implementation.
//!
//! Rows are processed one at a time, in input order, on the calling thread:
//! - Pre-filter by artist prefix (optional)
//! - Split into eligible (English, lyrics available) and excluded rows
//! - Look up tags, classify, write the result into the row, update stats
//! - Merge excluded rows back and persist

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::{ColumnsConfig, Config};
use crate::dataset::{Dataset, LabeledDataset, ScoredRow, TrackRow, TrackSchema};
use crate::matcher::{create_matcher, MoodMatcher};
use crate::tags::{SqliteTagStore, TagSource};
use crate::taxonomy::MoodTaxonomy;

use super::types::{LabelError, RunStats, RunSummary, StopSignal, TrackLabel};

/// Result of running the labeler over a dataset.
#[derive(Debug)]
pub struct LabelRun {
    /// Eligible rows (in input order) followed by excluded rows.
    pub output: LabeledDataset,
    pub stats: RunStats,
    /// True when a stop was requested before every eligible row was processed.
    pub cancelled: bool,
}

/// Rows split by the language/lyrics filter.
struct Partition {
    eligible: Vec<TrackRow>,
    /// Non-English rows first, then English rows without lyrics.
    excluded: Vec<TrackRow>,
}

impl Partition {
    fn split(rows: Vec<TrackRow>, schema: &TrackSchema) -> Self {
        let mut eligible = Vec::new();
        let mut not_english = Vec::new();
        let mut no_lyrics = Vec::new();

        for row in rows {
            if !schema.is_english(&row) {
                not_english.push(row);
            } else if !schema.lyrics_available(&row) {
                no_lyrics.push(row);
            } else {
                eligible.push(row);
            }
        }

        not_english.extend(no_lyrics);
        Self {
            eligible,
            excluded: not_english,
        }
    }
}

/// The labeling orchestrator - drives each eligible row through lookup and classification.
pub struct Labeler<'a> {
    tags: &'a dyn TagSource,
    matcher: &'a dyn MoodMatcher,
    columns: ColumnsConfig,
    artist_prefix: Option<String>,
}

impl<'a> Labeler<'a> {
    pub fn new(tags: &'a dyn TagSource, matcher: &'a dyn MoodMatcher) -> Self {
        Self {
            tags,
            matcher,
            columns: ColumnsConfig::default(),
            artist_prefix: None,
        }
    }

    pub fn with_columns(mut self, columns: ColumnsConfig) -> Self {
        self.columns = columns;
        self
    }

    /// Only keep rows whose artist starts with `prefix` (case-insensitive).
    pub fn with_artist_prefix(mut self, prefix: Option<String>) -> Self {
        self.artist_prefix = prefix;
        self
    }

    /// Look up and classify a single track.
    pub fn label_track(&self, track_id: &str) -> Result<TrackLabel, LabelError> {
        let tags = self
            .tags
            .fetch_tags(track_id)
            .map_err(|source| LabelError::Lookup {
                track_id: track_id.to_string(),
                source,
            })?;
        let texts: Vec<String> = tags.into_iter().map(|t| t.text).collect();
        let result = self.matcher.classify(&texts);
        Ok(TrackLabel::new(texts.len(), result))
    }

    /// Label every eligible row of the dataset.
    ///
    /// A stop request is honored between rows: rows already labeled keep their
    /// result, the remaining eligible rows keep their default values, and the
    /// merged table is still returned. A failed tag lookup aborts the run.
    pub fn run(&self, mut dataset: Dataset, stop: &StopSignal) -> Result<LabelRun, LabelError> {
        let schema = TrackSchema::prepare(&mut dataset, &self.columns)?;

        if let Some(prefix) = &self.artist_prefix {
            let before = dataset.len();
            dataset.retain(|row| schema.artist_starts_with(row, prefix));
            debug!(
                "Artist prefix '{}' kept {} of {} rows",
                prefix,
                dataset.len(),
                before
            );
        }

        let (headers, rows) = dataset.into_parts();
        let row_count = rows.len();
        let Partition { eligible, excluded } = Partition::split(rows, &schema);
        debug!(
            "Songs before filtering: {}, eligible: {}, excluded: {}",
            row_count,
            eligible.len(),
            excluded.len()
        );

        info!(
            "Labeling {} songs with the {} matcher",
            eligible.len(),
            self.matcher.name()
        );

        let total_rows = eligible.len();
        let mut stats = RunStats::default();
        let mut cancelled = false;
        let mut output_rows = Vec::with_capacity(row_count);

        for mut row in eligible {
            if !cancelled && stop.is_stopped() {
                warn!(
                    "Stop requested after {} of {} songs, keeping finished work",
                    stats.total, total_rows
                );
                cancelled = true;
            }
            if cancelled {
                output_rows.push(ScoredRow::unscored(row));
                continue;
            }

            let label = self.label_track(row.get(schema.track_id))?;
            self.log_outcome(&label, &stats, total_rows, row.get(schema.lyrics_file));
            label.apply(&mut row, &schema);
            stats.record(&label);
            output_rows.push(ScoredRow {
                row,
                scores: label.scoreboard,
            });
        }

        output_rows.extend(excluded.into_iter().map(ScoredRow::unscored));

        Ok(LabelRun {
            output: LabeledDataset::new(headers, output_rows, self.matcher.score_columns()),
            stats,
            cancelled,
        })
    }

    fn log_outcome(
        &self,
        label: &TrackLabel,
        stats: &RunStats,
        total_rows: usize,
        lyrics_file: &str,
    ) {
        if label.found_tags == 0 {
            debug!("{}/{}, {}: no tags", stats.total, total_rows, lyrics_file);
        } else if !label.is_matched() {
            debug!(
                "{}/{}, {}: found tags but could not match mood",
                stats.total, total_rows, lyrics_file
            );
        } else {
            debug!(
                "{}/{}, {}: success! mood={}",
                stats.total, total_rows, lyrics_file, label.mood
            );
        }
    }
}

/// Run a complete labeling job from configuration.
///
/// The taxonomy and the tag store are loaded before the dataset is read, so a
/// missing resource fails the run before any row is touched. The output is
/// written even when the run is stopped early, but not when a lookup fails.
pub fn run_labeling(config: &Config, stop: &StopSignal) -> Result<RunSummary, LabelError> {
    let started_at = Utc::now();
    let output = config.output_path();

    info!("Mood scheme: {}", config.taxonomy.scheme);
    if let Some(prefix) = &config.filter.artist_first_letter {
        info!("Artist first letter: {}", prefix);
    }

    let taxonomy = MoodTaxonomy::load(&config.taxonomy)?;
    let scheme = taxonomy.scheme();
    let matcher = create_matcher(taxonomy);

    info!("Connecting to tag store at {:?}", config.tag_store.path);
    let store = SqliteTagStore::open(&config.tag_store.path)?;

    info!("Reading input dataset {:?}", config.dataset.input);
    let dataset = Dataset::read_csv(&config.dataset.input)?;

    let run = Labeler::new(&store, matcher.as_ref())
        .with_columns(config.dataset.columns.clone())
        .with_artist_prefix(config.filter.artist_first_letter.clone())
        .run(dataset, stop)?;

    info!("Saving labeled dataset to {:?}", output);
    run.output.write_csv(&output)?;

    let finished_at = Utc::now();
    let stats = run.stats;
    info!("{} songs processed", stats.total);
    info!("{} songs with tags", stats.with_tags);
    info!("{} songs with no mood match", stats.no_mood_match);
    info!("{} songs labeled", stats.labeled);
    info!(
        "Elapsed time: {:.2} minutes",
        (finished_at - started_at).num_milliseconds() as f64 / 60_000.0
    );

    Ok(RunSummary {
        scheme,
        stats,
        cancelled: run.cancelled,
        rows_written: run.output.len(),
        output,
        started_at,
        finished_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{ExactMatcher, ExpandedMatcher};
    use crate::taxonomy::{builtin_exact_taxonomy, ExpandedTaxonomy, UNKNOWN_MOOD};
    use crate::testing::{fixtures, MockTagSource};

    fn exact_matcher() -> ExactMatcher {
        ExactMatcher::new(builtin_exact_taxonomy())
    }

    fn dataset(rows: &[fixtures::TrackSpec]) -> Dataset {
        Dataset::from_reader(fixtures::track_csv(rows).as_bytes()).unwrap()
    }

    /// The run's output as it would be written.
    fn written(run: &LabelRun) -> Dataset {
        let mut buf = Vec::new();
        run.output.write_to(&mut buf).unwrap();
        Dataset::from_reader(buf.as_slice()).unwrap()
    }

    fn cell<'d>(data: &'d Dataset, row: usize, column: &str) -> &'d str {
        let index = data.column_index(column).unwrap();
        data.rows()[row].get(index)
    }

    #[test]
    fn test_label_track_exact() {
        let source = MockTagSource::new();
        source.set_tags("TRA", &["rock", "sadness", "happy"]);
        let matcher = exact_matcher();
        let labeler = Labeler::new(&source, &matcher);

        let label = labeler.label_track("TRA").unwrap();
        assert_eq!(label.found_tags, 3);
        assert_eq!(label.mood, "sad");
        assert!(label.scoreboard.is_none());
    }

    #[test]
    fn test_label_track_without_tags() {
        let source = MockTagSource::new();
        let matcher = exact_matcher();
        let label = Labeler::new(&source, &matcher).label_track("TRA").unwrap();
        assert_eq!(label.found_tags, 0);
        assert_eq!(label.mood, UNKNOWN_MOOD);
    }

    #[test]
    fn test_run_labels_eligible_rows_and_keeps_excluded() {
        let source = MockTagSource::new();
        source.set_tags("TR1", &["mellow"]);
        source.set_tags("TR2", &["rock"]);
        source.set_tags("TR3", &["angry"]);
        let matcher = exact_matcher();

        let data = dataset(&[
            fixtures::track("TR1", "Abba", true, true),
            fixtures::track("TR2", "Blur", true, true),
            fixtures::track("TR3", "Cure", false, true),
            fixtures::track("TR4", "Doors", true, false),
            fixtures::track("TR5", "Eels", true, true),
        ]);

        let run = Labeler::new(&source, &matcher)
            .run(data, &StopSignal::new())
            .unwrap();
        let out = written(&run);

        assert!(!run.cancelled);
        assert_eq!(run.output.len(), 5);
        let ids: Vec<&str> = (0..5).map(|i| cell(&out, i, "msd_id")).collect();
        assert_eq!(ids, vec!["TR1", "TR2", "TR5", "TR3", "TR4"]);

        assert_eq!(cell(&out, 0, "mood"), "calm");
        assert_eq!(cell(&out, 0, "matched_mood"), "1");
        assert_eq!(cell(&out, 0, "found_tags"), "1");
        assert_eq!(cell(&out, 1, "mood"), UNKNOWN_MOOD);
        assert_eq!(cell(&out, 1, "matched_mood"), "0");
        assert_eq!(cell(&out, 2, "found_tags"), "0");

        // Excluded rows are never looked up and keep the defaults
        assert_eq!(cell(&out, 3, "mood"), "");
        assert_eq!(cell(&out, 3, "found_tags"), "-1");
        assert_eq!(cell(&out, 4, "matched_mood"), "-1");
        assert_eq!(source.lookups(), vec!["TR1", "TR2", "TR5"]);

        assert_eq!(
            run.stats,
            RunStats {
                total: 3,
                with_tags: 2,
                no_mood_match: 1,
                labeled: 1,
            }
        );
    }

    #[test]
    fn test_excluded_order_language_before_availability() {
        let source = MockTagSource::new();
        let matcher = exact_matcher();
        let data = dataset(&[
            fixtures::track("TR1", "A", true, false),
            fixtures::track("TR2", "B", false, true),
            fixtures::track("TR3", "C", false, false),
        ]);

        let run = Labeler::new(&source, &matcher)
            .run(data, &StopSignal::new())
            .unwrap();
        let out = written(&run);
        let ids: Vec<&str> = (0..3).map(|i| cell(&out, i, "msd_id")).collect();
        assert_eq!(ids, vec!["TR2", "TR3", "TR1"]);
        assert_eq!(run.stats, RunStats::default());
    }

    #[test]
    fn test_artist_prefix_drops_other_rows() {
        let source = MockTagSource::new();
        let matcher = exact_matcher();
        let data = dataset(&[
            fixtures::track("TR1", "Beatles", true, true),
            fixtures::track("TR2", "abba", true, true),
            fixtures::track("TR3", "ABC", false, true),
        ]);

        let run = Labeler::new(&source, &matcher)
            .with_artist_prefix(Some("A".to_string()))
            .run(data, &StopSignal::new())
            .unwrap();
        let out = written(&run);

        assert_eq!(run.output.len(), 2);
        assert_eq!(cell(&out, 0, "msd_id"), "TR2");
        assert_eq!(cell(&out, 1, "msd_id"), "TR3");
        assert_eq!(run.stats.total, 1);
    }

    #[test]
    fn test_stop_keeps_finished_rows() {
        let stop = StopSignal::new();
        let source = MockTagSource::new();
        source.set_tags("TR1", &["happy"]);
        source.set_tags("TR2", &["happy"]);
        source.stop_after(2, stop.clone());
        let matcher = exact_matcher();
        let data = dataset(&[
            fixtures::track("TR1", "A", true, true),
            fixtures::track("TR2", "B", true, true),
            fixtures::track("TR3", "C", true, true),
            fixtures::track("TR4", "D", false, true),
        ]);

        let run = Labeler::new(&source, &matcher).run(data, &stop).unwrap();
        let out = written(&run);

        assert!(run.cancelled);
        assert_eq!(run.stats.total, 2);
        assert_eq!(run.output.len(), 4);
        assert_eq!(cell(&out, 0, "mood"), "happy");
        assert_eq!(cell(&out, 1, "mood"), "happy");
        assert_eq!(cell(&out, 2, "msd_id"), "TR3");
        assert_eq!(cell(&out, 2, "found_tags"), "-1");
        assert_eq!(cell(&out, 3, "msd_id"), "TR4");
        assert_eq!(source.lookups().len(), 2);
    }

    #[test]
    fn test_stop_before_start_processes_nothing() {
        let stop = StopSignal::new();
        stop.stop();
        let source = MockTagSource::new();
        let matcher = exact_matcher();
        let data = dataset(&[fixtures::track("TR1", "A", true, true)]);

        let run = Labeler::new(&source, &matcher).run(data, &stop).unwrap();
        assert!(run.cancelled);
        assert_eq!(run.stats.total, 0);
        assert_eq!(run.output.len(), 1);
        assert!(source.lookups().is_empty());
    }

    #[test]
    fn test_lookup_failure_aborts_run() {
        let source = MockTagSource::new();
        source.set_tags("TR1", &["happy"]);
        source.fail_on("TR2");
        let matcher = exact_matcher();
        let data = dataset(&[
            fixtures::track("TR1", "A", true, true),
            fixtures::track("TR2", "B", true, true),
            fixtures::track("TR3", "C", true, true),
        ]);

        let err = Labeler::new(&source, &matcher)
            .run(data, &StopSignal::new())
            .unwrap_err();
        assert!(matches!(err, LabelError::Lookup { ref track_id, .. } if track_id == "TR2"));
        assert_eq!(source.lookups(), vec!["TR1", "TR2"]);
    }

    #[test]
    fn test_run_expanded_emits_scores() {
        let source = MockTagSource::new();
        source.set_tags("TR1", &["chill out vibes", "chilling effect note"]);
        let taxonomy = ExpandedTaxonomy::from_json_str(
            r#"{"calm": [["calm"], ["chill"], ["chilling effect"]], "sad": [["sadness"], ["sad"], []]}"#,
        )
        .unwrap();
        let matcher = ExpandedMatcher::new(taxonomy);
        let data = dataset(&[
            fixtures::track("TR1", "A", true, true),
            fixtures::track("TR2", "B", true, true),
            fixtures::track("TR3", "C", false, false),
        ]);

        let run = Labeler::new(&source, &matcher)
            .run(data, &StopSignal::new())
            .unwrap();
        let out = written(&run);

        assert_eq!(cell(&out, 0, "mood"), "calm");
        assert_eq!(cell(&out, 0, "calm"), "1");
        assert_eq!(cell(&out, 0, "sad"), "0");
        assert_eq!(cell(&out, 1, "mood"), UNKNOWN_MOOD);
        assert_eq!(cell(&out, 1, "calm"), "0");
        // Score columns only materialize at write time
        assert!(run.output.rows()[2].scores.is_none());
    }

    #[test]
    fn test_custom_columns() {
        let source = MockTagSource::new();
        source.set_tags("X1", &["dreamy"]);
        let matcher = exact_matcher();
        let csv = "track,who,name,file,en,has_lyrics\nX1,Air,La femme,a.txt,1,1\n";
        let columns = ColumnsConfig {
            track_id: "track".to_string(),
            artist: "who".to_string(),
            title: "name".to_string(),
            lyrics_file: "file".to_string(),
            is_english: "en".to_string(),
            lyrics_available: "has_lyrics".to_string(),
        };

        let run = Labeler::new(&source, &matcher)
            .with_columns(columns)
            .run(Dataset::from_reader(csv.as_bytes()).unwrap(), &StopSignal::new())
            .unwrap();
        let out = written(&run);
        assert_eq!(cell(&out, 0, "mood"), "dreamy");
    }
}
