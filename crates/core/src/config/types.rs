use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub tag_store: TagStoreConfig,
    #[serde(default)]
    pub taxonomy: TaxonomyConfig,
    #[serde(default)]
    pub filter: FilterConfig,
}

impl Config {
    /// Output path to write to, falling back to a per-scheme default.
    pub fn output_path(&self) -> PathBuf {
        match &self.dataset.output {
            Some(path) => path.clone(),
            None => match self.taxonomy.scheme {
                MoodScheme::Exact => PathBuf::from(DEFAULT_OUTPUT_EXACT),
                MoodScheme::Expanded => PathBuf::from(DEFAULT_OUTPUT_EXPANDED),
            },
        }
    }
}

pub const DEFAULT_OUTPUT_EXACT: &str = "data/labeled_lyrics.csv";
pub const DEFAULT_OUTPUT_EXPANDED: &str = "data/labeled_lyrics_expanded.csv";

/// Input/output dataset configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatasetConfig {
    #[serde(default = "default_input")]
    pub input: PathBuf,
    /// Destination CSV. When unset, a default is picked from the mood scheme.
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub columns: ColumnsConfig,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: None,
            columns: ColumnsConfig::default(),
        }
    }
}

fn default_input() -> PathBuf {
    PathBuf::from("data/indexed_lyrics.csv")
}

/// Names of the input columns the labeler reads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ColumnsConfig {
    #[serde(default = "default_track_id")]
    pub track_id: String,
    #[serde(default = "default_artist")]
    pub artist: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_lyrics_file")]
    pub lyrics_file: String,
    #[serde(default = "default_is_english")]
    pub is_english: String,
    #[serde(default = "default_lyrics_available")]
    pub lyrics_available: String,
}

impl Default for ColumnsConfig {
    fn default() -> Self {
        Self {
            track_id: default_track_id(),
            artist: default_artist(),
            title: default_title(),
            lyrics_file: default_lyrics_file(),
            is_english: default_is_english(),
            lyrics_available: default_lyrics_available(),
        }
    }
}

fn default_track_id() -> String {
    "msd_id".to_string()
}

fn default_artist() -> String {
    "msd_artist".to_string()
}

fn default_title() -> String {
    "msd_title".to_string()
}

fn default_lyrics_file() -> String {
    "lyrics_filename".to_string()
}

fn default_is_english() -> String {
    "is_english".to_string()
}

fn default_lyrics_available() -> String {
    "lyrics_available".to_string()
}

/// Tag store (SQLite) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TagStoreConfig {
    #[serde(default = "default_tag_store_path")]
    pub path: PathBuf,
}

impl Default for TagStoreConfig {
    fn default() -> Self {
        Self {
            path: default_tag_store_path(),
        }
    }
}

fn default_tag_store_path() -> PathBuf {
    PathBuf::from("data/lastfm_tags.db")
}

/// Which mood taxonomy drives classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodScheme {
    /// Built-in table, literal tag membership.
    #[default]
    Exact,
    /// Substring patterns and exclusion filters loaded from JSON.
    Expanded,
}

impl std::fmt::Display for MoodScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoodScheme::Exact => write!(f, "exact"),
            MoodScheme::Expanded => write!(f, "expanded"),
        }
    }
}

/// Taxonomy configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TaxonomyConfig {
    #[serde(default)]
    pub scheme: MoodScheme,
    /// JSON resource for the expanded scheme (only read in expanded mode).
    #[serde(default = "default_expanded_path")]
    pub expanded_path: PathBuf,
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        Self {
            scheme: MoodScheme::default(),
            expanded_path: default_expanded_path(),
        }
    }
}

fn default_expanded_path() -> PathBuf {
    PathBuf::from("mood_categories_expanded.json")
}

/// Row pre-filter configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FilterConfig {
    /// Only label artists whose name starts with this prefix (case-insensitive).
    #[serde(default)]
    pub artist_first_letter: Option<String>,
}
