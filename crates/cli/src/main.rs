mod args;

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moodlabel_core::{
    load_config, load_default_config, run_labeling, validate_config, Config, StopSignal,
};

use args::Args;

fn main() {
    if let Err(e) = run() {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = load(&args)?;
    args.apply(&mut config);
    validate_config(&config).context("Configuration validation failed")?;

    let output = config.output_path();
    if output.exists() && !args.yes && !confirm_overwrite(&output)? {
        info!("Leaving {:?} untouched", output);
        return Ok(());
    }

    let stop = StopSignal::new();
    if let Err(e) = ctrlc::set_handler({
        let stop = stop.clone();
        move || {
            warn!("Interrupt received, stopping after the current song");
            stop.stop();
        }
    }) {
        error!("Failed to register signal handler: {}", e);
    }

    let summary = run_labeling(&config, &stop).context("Labeling run failed")?;

    if let Some(path) = &args.summary {
        let json = serde_json::to_string_pretty(&summary)?;
        fs::write(path, json).with_context(|| format!("Failed to write summary to {:?}", path))?;
        info!("Run summary written to {:?}", path);
    }

    Ok(())
}

fn load(args: &Args) -> Result<Config> {
    match args.config_file() {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            load_config(&path).with_context(|| format!("Failed to load config from {:?}", path))
        }
        None => load_default_config().context("Failed to load default configuration"),
    }
}

/// Ask on stdin whether an existing output may be replaced.
fn confirm_overwrite(output: &Path) -> Result<bool> {
    print!(
        "Output file {} already exists, overwrite it? [Y/N] ",
        output.display()
    );
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(parse_answer(&answer))
}

fn parse_answer(answer: &str) -> bool {
    matches!(answer.trim(), "y" | "Y" | "yes" | "Yes" | "YES")
}
