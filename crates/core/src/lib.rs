pub mod config;
pub mod dataset;
pub mod labeler;
pub mod matcher;
pub mod tags;
pub mod taxonomy;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, load_default_config, validate_config, Config,
    ConfigError, MoodScheme,
};
pub use dataset::{Dataset, DatasetError, LabeledDataset};
pub use labeler::{run_labeling, LabelError, Labeler, RunStats, RunSummary, StopSignal};
pub use matcher::{create_matcher, MoodMatch, MoodMatcher, Scoreboard};
pub use tags::{SqliteTagStore, Tag, TagSource, TagStoreError};
pub use taxonomy::{MoodTaxonomy, TaxonomyError, UNKNOWN_MOOD};
