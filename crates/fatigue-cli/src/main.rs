//! Fatigue Scoring CLI - Main Entry Point
//!
//! Scores a recorded session of per-frame landmarks and prints the video
//! section of a prediction response as JSON.

mod input;
mod logging;
mod settings;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use fatigue_engine::{SegmentRunner, SessionReport, VideoReport};
use serde::Serialize;
use tracing::{info, warn};

use crate::settings::Settings;

#[derive(Parser, Debug)]
#[command(name = "fatigue-score", version, about = "Score driver fatigue from recorded facial landmarks")]
struct Cli {
    /// Session file (JSON array of frame records), or `-` for stdin
    input: PathBuf,

    /// Settings file (TOML, JSON or YAML)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Frames per group pass
    #[arg(long)]
    group_size: Option<usize>,

    /// Trend window length
    #[arg(long)]
    trend_window: Option<usize>,

    /// Include per-pass diagnostics in the output
    #[arg(long)]
    detailed: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

/// Output with per-pass diagnostics
#[derive(Serialize)]
struct DetailedOutput<'a> {
    video: &'a VideoReport,
    report: &'a SessionReport,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(group_size) = cli.group_size {
        settings.engine = settings.engine.with_group_size(group_size);
    }
    if let Some(trend_window) = cli.trend_window {
        settings.engine = settings.engine.with_trend_window(trend_window);
    }

    logging::init_logging(logging::parse_level(&settings.log_level)?, settings.log_json)?;
    info!("=== Fatigue Scoring v{} ===", env!("CARGO_PKG_VERSION"));

    let runner = SegmentRunner::new(settings.engine).context("Invalid engine configuration")?;
    let samples = input::read_session(&cli.input)?;

    let report = runner.run_samples_detailed(&samples);
    let video = VideoReport::new(&report, &runner.config().status_thresholds);
    if !video.has_data() {
        warn!("No decodable frames in {}; score carries no information", cli.input.display());
    }

    let output = if cli.detailed {
        serde_json::to_value(DetailedOutput {
            video: &video,
            report: &report,
        })?
    } else {
        serde_json::to_value(&video)?
    };

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{rendered}");

    Ok(())
}
