use super::{types::Config, ConfigError, MoodScheme};

/// Validate configuration
/// Currently validates:
/// - Artist filter, when set, is not empty
/// - Output is not the input file
/// - Expanded scheme has a taxonomy path
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if let Some(prefix) = &config.filter.artist_first_letter {
        if prefix.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "filter.artist_first_letter cannot be empty".to_string(),
            ));
        }
    }

    let output = config.output_path();
    if output.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "dataset.output cannot be empty".to_string(),
        ));
    }
    if output == config.dataset.input {
        return Err(ConfigError::ValidationError(format!(
            "dataset.output must differ from dataset.input ({})",
            output.display()
        )));
    }

    if config.taxonomy.scheme == MoodScheme::Expanded
        && config.taxonomy.expanded_path.as_os_str().is_empty()
    {
        return Err(ConfigError::ValidationError(
            "taxonomy.expanded_path is required for the expanded scheme".to_string(),
        ));
    }

    Ok(())
}
