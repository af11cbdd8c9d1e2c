//! Command-line arguments and how they override the loaded configuration.

use std::path::PathBuf;

use clap::Parser;

use moodlabel_core::{Config, MoodScheme};

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "moodlabel.toml";

#[derive(Parser, Debug)]
#[command(name = "label-lyrics")]
#[command(about = "Label songs with moods from their Last.fm tags")]
#[command(version)]
pub struct Args {
    /// Only label songs whose artist starts with this prefix (case-insensitive)
    #[arg(short = 'a', long)]
    pub artist_first_letter: Option<String>,

    /// Input dataset CSV
    #[arg(short = 'i', long)]
    pub csv_input: Option<PathBuf>,

    /// Output dataset CSV
    #[arg(short = 'o', long)]
    pub csv_output: Option<PathBuf>,

    /// Use the expanded mood taxonomy instead of the built-in exact table
    #[arg(short = 'e', long)]
    pub expanded_moods: bool,

    /// Configuration file (TOML)
    #[arg(short = 'c', long, env = "MOODLABEL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Last.fm tag database
    #[arg(long)]
    pub tags_db: Option<PathBuf>,

    /// Expanded taxonomy JSON
    #[arg(long)]
    pub taxonomy: Option<PathBuf>,

    /// Overwrite an existing output without asking
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Write the run summary as JSON to this path
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

impl Args {
    /// Apply flags on top of the file/env configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(prefix) = &self.artist_first_letter {
            config.filter.artist_first_letter = Some(prefix.clone());
        }
        if let Some(input) = &self.csv_input {
            config.dataset.input = input.clone();
        }
        if let Some(output) = &self.csv_output {
            config.dataset.output = Some(output.clone());
        }
        if self.expanded_moods {
            config.taxonomy.scheme = MoodScheme::Expanded;
        }
        if let Some(path) = &self.tags_db {
            config.tag_store.path = path.clone();
        }
        if let Some(path) = &self.taxonomy {
            config.taxonomy.expanded_path = path.clone();
        }
    }

    /// The config file to load, if any.
    ///
    /// An explicit `--config` is always returned; the default file only when it exists.
    pub fn config_file(&self) -> Option<PathBuf> {
        match &self.config {
            Some(path) => Some(path.clone()),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                default.is_file().then_some(default)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("label-lyrics").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_flags_keep_config() {
        let mut config = Config::default();
        parse(&[]).apply(&mut config);
        assert_eq!(config.taxonomy.scheme, MoodScheme::Exact);
        assert!(config.dataset.output.is_none());
        assert!(config.filter.artist_first_letter.is_none());
    }

    #[test]
    fn test_short_flags_override_config() {
        let mut config = Config::default();
        parse(&["-a", "b", "-i", "in.csv", "-o", "out.csv", "-e", "-y"]).apply(&mut config);

        assert_eq!(config.filter.artist_first_letter.as_deref(), Some("b"));
        assert_eq!(config.dataset.input, PathBuf::from("in.csv"));
        assert_eq!(config.output_path(), PathBuf::from("out.csv"));
        assert_eq!(config.taxonomy.scheme, MoodScheme::Expanded);
    }

    #[test]
    fn test_expanded_default_output() {
        let mut config = Config::default();
        parse(&["--expanded-moods"]).apply(&mut config);
        assert_eq!(
            config.output_path(),
            PathBuf::from("data/labeled_lyrics_expanded.csv")
        );
    }

    #[test]
    fn test_resource_paths() {
        let mut config = Config::default();
        let args = parse(&[
            "--tags-db",
            "/data/tags.db",
            "--taxonomy",
            "/data/moods.json",
            "--summary",
            "summary.json",
        ]);
        args.apply(&mut config);

        assert_eq!(config.tag_store.path, PathBuf::from("/data/tags.db"));
        assert_eq!(config.taxonomy.expanded_path, PathBuf::from("/data/moods.json"));
        assert_eq!(args.summary, Some(PathBuf::from("summary.json")));
    }

    #[test]
    fn test_explicit_config_file_is_returned() {
        let args = parse(&["-c", "/etc/moodlabel.toml"]);
        assert_eq!(args.config_file(), Some(PathBuf::from("/etc/moodlabel.toml")));
    }
}
