//! polar2tcx - command-line entry point.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueHint};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use polar2tcx::convert::{self, ConvertConfig, StartTimeSource};
use polar2tcx::export::generate_tcx_filename;
use polar2tcx::storage::config::{get_config_path, load_config, save_config};

#[derive(Parser, Debug)]
#[command(author, version, about = "Convert Polar exercise XML and GPX tracks to TCX", long_about = None)]
struct Cli {
    /// Polar exercise XML export
    #[arg(short = 'x', long = "xml", value_hint = ValueHint::FilePath)]
    xml: PathBuf,

    /// GPX track recorded during the exercise
    #[arg(short = 'g', long = "gpx", value_hint = ValueHint::FilePath)]
    gpx: Option<PathBuf>,

    /// Output TCX path (generated from the current date when omitted)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// Derive the start time from the end of the GPX track
    #[arg(long, action = ArgAction::SetTrue)]
    start_from_track: bool,

    /// Store the effective start-time choice in the config file for later runs
    #[arg(long, action = ArgAction::SetTrue)]
    save_config: bool,

    /// Verbose logging
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let mut settings = load_config().context("failed to load configuration")?;

    let output_path = match cli.output {
        Some(path) => path,
        None => {
            let name = generate_tcx_filename(
                &settings.output.filename_prefix,
                &chrono::Local::now(),
            );
            settings.output_path_for(&name)
        }
    };

    if cli.start_from_track {
        settings.conversion.start_time = StartTimeSource::TrackEnd;
    }
    let start_time = settings.conversion.start_time;

    if cli.save_config {
        let path = get_config_path();
        save_config(&settings, &path)
            .with_context(|| format!("failed to save configuration to {}", path.display()))?;
        info!("Saved configuration to {}", path.display());
    }

    let config = ConvertConfig {
        exercise_path: cli.xml,
        track_path: cli.gpx,
        output_path,
        start_time,
    };

    convert::validate_paths(&config)?;
    let summary = convert::convert(&config)
        .with_context(|| format!("failed to convert {}", config.exercise_path.display()))?;

    println!(
        "Wrote {} ({} laps, {} trackpoints, {} of {} GPS points assigned)",
        config.output_path.display(),
        summary.laps,
        summary.trackpoints,
        summary.gps_assigned,
        summary.gps_parsed
    );

    Ok(())
}
