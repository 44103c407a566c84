//! Logging setup

use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Parse a configured level name, case-insensitively
pub fn parse_level(level: &str) -> Result<Level> {
    Level::from_str(level.trim()).map_err(|_| anyhow!("Unknown log level: {level}"))
}

/// Initialize logging to stderr; stdout carries the report
pub fn init_logging(level: Level, json: bool) -> Result<()> {
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    let installed = if json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    installed.context("Failed to set tracing subscriber")
}
