//! Long-horizon fatigue trend
//!
//! Tracks EAR decay against a personal baseline fixed after a calibration
//! period, plus yawn frequency over the same sliding window.

use ring_buffer::RingBuffer;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::state::WarningLevel;

/// Guards the decay ratio against a zero baseline
const BASELINE_EPSILON: f64 = 1e-6;

/// Baseline-decay and yawn-frequency analyzer for one pass
#[derive(Debug, Clone)]
pub struct TrendAnalyzer {
    ear_history: RingBuffer<f64>,
    yawn_history: RingBuffer<bool>,
    baseline_ear: Option<f64>,
    calibration_frames: usize,
    mar_thresh: f64,
    dropping_ratio: f64,
    dropping_heavy_ratio: f64,
    yawn_count_thresh: usize,
    max_level: WarningLevel,
}

impl TrendAnalyzer {
    /// Create an analyzer with the configured trend window.
    ///
    /// `config` is expected to have passed [`EngineConfig::validate`].
    ///
    /// # Panics
    ///
    /// Panics if `config.trend_window` is zero.
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_window(config, config.trend_window)
    }

    /// Create an analyzer with an explicit window length.
    ///
    /// # Panics
    ///
    /// Panics if `window_size` is zero.
    pub fn with_window(config: &EngineConfig, window_size: usize) -> Self {
        Self {
            ear_history: RingBuffer::new(window_size),
            yawn_history: RingBuffer::new(window_size),
            baseline_ear: None,
            calibration_frames: config.calibration_frames,
            mar_thresh: config.mar_thresh,
            dropping_ratio: config.eyes_dropping_ratio,
            dropping_heavy_ratio: config.eyes_dropping_heavy_ratio,
            yawn_count_thresh: config.yawn_count_thresh,
            max_level: WarningLevel::Normal,
        }
    }

    /// Feed one frame and return its warning level.
    ///
    /// Always [`WarningLevel::Normal`] until the baseline is calibrated.
    pub fn update(&mut self, ear: f64, mar: f64) -> WarningLevel {
        self.ear_history.push(ear);
        self.yawn_history.push(mar > self.mar_thresh);

        let Some(baseline) = self.baseline_ear else {
            if self.ear_history.len() >= self.calibration_frames {
                if let Some(mean) = self.ear_history.mean() {
                    info!("[Calibration] Baseline EAR established: {:.4}", mean);
                    self.baseline_ear = Some(mean);
                }
            }
            return WarningLevel::Normal;
        };

        let current_avg = self.ear_history.mean().unwrap_or(0.0);
        let decay_ratio = current_avg / (baseline + BASELINE_EPSILON);

        let eyes_dropping = decay_ratio < self.dropping_ratio;
        let eyes_dropping_heavy = decay_ratio < self.dropping_heavy_ratio;
        let freq_yawning = self.yawn_history.count_where(|&y| y) >= self.yawn_count_thresh;

        // Later rules only raise the level
        let mut level = WarningLevel::Normal;
        if eyes_dropping {
            level = WarningLevel::Mild;
        }
        if freq_yawning {
            level = if level == WarningLevel::Mild {
                WarningLevel::Severe
            } else {
                WarningLevel::Mild
            };
        }
        if eyes_dropping_heavy {
            level = WarningLevel::Severe;
        }

        if level > self.max_level {
            debug!(
                "Trend level raised to {:?} (decay_ratio={:.3}, yawning={})",
                level, decay_ratio, freq_yawning
            );
            self.max_level = level;
        }

        level
    }

    /// Calibrated baseline EAR, if any
    pub fn baseline(&self) -> Option<f64> {
        self.baseline_ear
    }

    /// Whether the calibration period has completed
    pub fn is_calibrated(&self) -> bool {
        self.baseline_ear.is_some()
    }

    /// Highest level returned so far
    pub fn max_level(&self) -> WarningLevel {
        self.max_level
    }
}
