//! Session runner
//!
//! One overall pass over every frame, plus one independent pass per
//! fixed-size group. Each pass owns fresh trend, energy and PERCLOS state.

use face_landmarks::{Detection, LandmarkSource};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::energy::EnergyTracker;
use crate::fusion::{FusionInputs, ScoreFusion};
use crate::geometry::{GeometryExtractor, GeometrySample};
use crate::perclos::PerclosAccumulator;
use crate::state::{PassReport, ScoreResult, SessionReport, SessionResult};
use crate::trend::TrendAnalyzer;
use crate::FatigueError;

/// Closed-eye run length at which the energy slot takes the streak penalty
const STREAK_PENALTY_RUN: u64 = 2;

/// Reduce a detection to the sample the trackers consume.
///
/// Decode failures become `None` and are skipped; a decoded frame without a
/// face becomes [`GeometrySample::NO_FACE`].
pub fn sample_from_detection(detection: &Detection) -> Option<GeometrySample> {
    match detection {
        Ok(frame) => Some(GeometryExtractor::extract(frame.as_ref())),
        Err(_) => None,
    }
}

/// Orchestrates overall and group passes over one frame list
#[derive(Debug, Clone)]
pub struct SegmentRunner {
    config: EngineConfig,
    fusion: ScoreFusion,
}

impl SegmentRunner {
    /// Create a runner, rejecting invalid configuration up front
    pub fn new(config: EngineConfig) -> Result<Self, FatigueError> {
        config.validate()?;
        Ok(Self {
            fusion: ScoreFusion::new(&config),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Score a list of landmark detections
    pub fn run(&self, frames: &[Detection]) -> SessionResult {
        self.run_detailed(frames).to_result()
    }

    /// Score a list of landmark detections, keeping per-pass diagnostics
    pub fn run_detailed(&self, frames: &[Detection]) -> SessionReport {
        let samples: Vec<Option<GeometrySample>> =
            frames.iter().map(sample_from_detection).collect();
        self.run_samples_detailed(&samples)
    }

    /// Score raw frame payloads through a pre-extraction hook.
    ///
    /// Each payload is extracted once and shared by the overall and group passes.
    pub fn run_with<S>(&self, source: &S, inputs: &[S::Input]) -> SessionReport
    where
        S: LandmarkSource,
        S::Input: Sized,
    {
        let samples: Vec<Option<GeometrySample>> = inputs
            .iter()
            .map(|input| sample_from_detection(&source.detect(input)))
            .collect();
        self.run_samples_detailed(&samples)
    }

    /// Score precomputed samples; `None` marks a frame that failed to decode
    pub fn run_samples(&self, samples: &[Option<GeometrySample>]) -> SessionResult {
        self.run_samples_detailed(samples).to_result()
    }

    /// Score precomputed samples, keeping per-pass diagnostics
    pub fn run_samples_detailed(&self, samples: &[Option<GeometrySample>]) -> SessionReport {
        if samples.is_empty() {
            debug!("No frames supplied, returning empty session");
            return SessionReport::default();
        }

        let overall = self.run_pass(samples.iter().copied());

        let groups = if samples.len() < self.config.group_size {
            debug!(
                "{} frames is below one group of {}, skipping group passes",
                samples.len(),
                self.config.group_size
            );
            Vec::new()
        } else {
            self.run_groups(samples)
        };

        info!(
            "Session scored: frames={}, valid={}, groups={}, score={:.2}, level={}",
            samples.len(),
            overall.valid_frames,
            groups.len(),
            overall.result.score,
            overall.result.warning_level.as_u8()
        );

        SessionReport {
            frames_total: samples.len(),
            overall,
            groups,
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn run_groups(&self, samples: &[Option<GeometrySample>]) -> Vec<PassReport> {
        samples
            .chunks(self.config.group_size)
            .map(|chunk| self.run_pass(chunk.iter().copied()))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn run_groups(&self, samples: &[Option<GeometrySample>]) -> Vec<PassReport> {
        samples
            .par_chunks(self.config.group_size)
            .map(|chunk| self.run_pass(chunk.iter().copied()))
            .collect()
    }

    /// Run one independent pass over a sample stream
    pub fn run_pass<I>(&self, samples: I) -> PassReport
    where
        I: IntoIterator<Item = Option<GeometrySample>>,
    {
        let config = &self.config;
        let mut trend = TrendAnalyzer::new(config);
        let mut energy = EnergyTracker::new(config);
        let mut perclos = PerclosAccumulator::new();
        let mut skipped = 0u64;

        for sample in samples {
            let Some(sample) = sample else {
                skipped += 1;
                continue;
            };

            let is_eye_closed = sample.is_eye_closed(config.eye_ar_thresh);
            let is_yawning = sample.is_yawning(config.mar_thresh);

            perclos.record(is_eye_closed);
            trend.update(sample.ear, sample.mar);
            energy.update(
                is_eye_closed,
                is_yawning,
                perclos.current_closed_run() >= STREAK_PENALTY_RUN,
            );
        }

        if skipped > 0 {
            debug!("Skipped {} undecodable frames", skipped);
        }

        if perclos.valid_frames() == 0 {
            debug!("Pass had no valid frames");
            return PassReport {
                result: ScoreResult::NO_DATA,
                min_energy: energy.minimum_seen(),
                ..Default::default()
            };
        }

        let inputs = FusionInputs {
            energy_score: energy.energy_score(),
            perclos_score: perclos.score(),
            max_closed_run: perclos.max_closed_run(),
            trend_max_level: trend.max_level(),
        };
        let result = self.fusion.fuse(&inputs);

        debug!(
            "Pass: valid={} PERCLOS={:.2} MinEnergy={:.1} -> level={}, score={:.2}",
            perclos.valid_frames(),
            perclos.perclos(),
            energy.minimum_seen(),
            result.warning_level.as_u8(),
            result.score
        );

        PassReport {
            result,
            valid_frames: perclos.valid_frames(),
            closed_frames: perclos.closed_frames(),
            perclos: perclos.perclos(),
            perclos_score: inputs.perclos_score,
            energy_score: inputs.energy_score,
            min_energy: energy.minimum_seen(),
            max_closed_run: inputs.max_closed_run,
            trend_max_level: inputs.trend_max_level,
        }
    }
}

impl Default for SegmentRunner {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self {
            fusion: ScoreFusion::new(&config),
            config,
        }
    }
}
