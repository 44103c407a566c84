//! Layered settings: defaults, optional file, `FATIGUE_` environment

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use fatigue_engine::EngineConfig;
use serde::{Deserialize, Serialize};

/// Environment prefix; nested keys use `__`, e.g. `FATIGUE_ENGINE__GROUP_SIZE`
pub const ENV_PREFIX: &str = "FATIGUE";

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// Engine tuning table
    pub engine: EngineConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_json: false,
            engine: EngineConfig::default(),
        }
    }
}

impl Settings {
    /// Load settings from an optional file plus the process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder
            .build()
            .and_then(Config::try_deserialize)
            .with_context(|| match path {
                Some(p) => format!("Failed to load settings from {}", p.display()),
                None => "Failed to load settings from environment".to_string(),
            })
    }

    /// Load settings from in-memory TOML (no environment layer)
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .and_then(Config::try_deserialize)
            .context("Failed to parse TOML settings")
    }
}
