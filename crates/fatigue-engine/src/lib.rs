//! Fatigue Scoring Engine
//!
//! Converts per-frame facial geometry into drowsiness scores:
//! - Eye/mouth aspect ratios from landmark sets
//! - EAR decay against a calibrated personal baseline, yawn frequency
//! - Energy slot drained by closures and yawns
//! - PERCLOS (percentage of eye closure)
//! - Fusion with a hard override for sustained eye closure
//!
//! A run produces one score per fixed-size frame group plus an overall
//! score and warning level. All state is local to a single pass.

pub mod config;
pub mod energy;
pub mod fusion;
pub mod geometry;
pub mod perclos;
pub mod report;
pub mod runner;
pub mod state;
pub mod status;
pub mod trend;

pub use config::EngineConfig;
pub use energy::EnergyTracker;
pub use fusion::{FusionInputs, ScoreFusion};
pub use geometry::{eye_aspect_ratio, mouth_aspect_ratio, GeometryExtractor, GeometrySample};
pub use perclos::{perclos_score, PerclosAccumulator};
pub use report::VideoReport;
pub use runner::{sample_from_detection, SegmentRunner};
pub use state::{PassReport, ScoreResult, SessionReport, SessionResult, WarningLevel};
pub use status::PredictStatus;
pub use trend::TrendAnalyzer;

use thiserror::Error;

/// Fatigue engine error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FatigueError {
    #[error("Configuration error: {0}")]
    InvalidConfig(String),

    #[error("Invalid warning level: {0}")]
    InvalidLevel(u8),
}
