//! Engine configuration

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::FatigueError;

/// Tuning table for the fatigue engine.
///
/// Read-only for the lifetime of a run; every pass borrows the same table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// EAR below this value counts as a closed eye
    pub eye_ar_thresh: f64,

    /// MAR above this value counts as a yawn
    pub mar_thresh: f64,

    /// Samples collected before the personal EAR baseline is fixed
    pub calibration_frames: usize,

    /// Sliding window length for EAR and yawn history
    pub trend_window: usize,

    /// Frames per group pass; sessions shorter than this get no group scores
    pub group_size: usize,

    /// Window-mean / baseline ratio below which eyes count as dropping
    pub eyes_dropping_ratio: f64,

    /// Window-mean / baseline ratio below which eyes count as heavily dropping
    pub eyes_dropping_heavy_ratio: f64,

    /// Yawns within the trend window that count as frequent yawning
    pub yawn_count_thresh: usize,

    /// Energy slot starting value
    pub energy_initial: f64,

    /// Energy slot upper bound
    pub energy_max: f64,

    /// Energy lost on a closed-eye frame
    pub penalty_eye_closed: f64,

    /// Energy lost on a yawning frame
    pub penalty_yawn: f64,

    /// Additional energy lost on the second and later frame of a closed-eye run
    pub penalty_consecutive_closed_extra: f64,

    /// Energy regained on a normal frame
    pub recovery_normal: f64,

    /// Closed-eye run length that forces the maximum warning level
    pub hard_override_run: u64,

    /// Lower bound of a reported score
    pub score_floor: f64,

    /// Upper bound of a reported score
    pub score_ceiling: f64,

    /// Ascending score thresholds for prediction status banding
    pub status_thresholds: Vec<f64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            eye_ar_thresh: 0.18,
            mar_thresh: 0.60,
            calibration_frames: 10,
            trend_window: 20,
            group_size: 30,
            eyes_dropping_ratio: 0.85,
            eyes_dropping_heavy_ratio: 0.5,
            yawn_count_thresh: 2,
            energy_initial: 90.0,
            energy_max: 100.0,
            penalty_eye_closed: 20.0,
            penalty_yawn: 10.0,
            penalty_consecutive_closed_extra: 10.0,
            recovery_normal: 5.0,
            hard_override_run: 2,
            score_floor: 0.05,
            score_ceiling: 0.99,
            status_thresholds: vec![0.1, 0.3, 0.5, 0.7, 0.9],
        }
    }
}

impl EngineConfig {
    /// Create strict config (eyes count as closed sooner, smaller yawns count)
    pub fn strict() -> Self {
        Self {
            eye_ar_thresh: 0.21,
            mar_thresh: 0.50,
            eyes_dropping_ratio: 0.90,
            ..Default::default()
        }
    }

    /// Create lenient config (only deep closures and wide yawns count)
    pub fn lenient() -> Self {
        Self {
            eye_ar_thresh: 0.15,
            mar_thresh: 0.65,
            eyes_dropping_ratio: 0.80,
            ..Default::default()
        }
    }

    /// Override the group pass size
    pub fn with_group_size(mut self, group_size: usize) -> Self {
        self.group_size = group_size;
        self
    }

    /// Override the trend window length
    pub fn with_trend_window(mut self, trend_window: usize) -> Self {
        self.trend_window = trend_window;
        self
    }

    /// Reject tables that break engine contracts before any pass runs
    pub fn validate(&self) -> Result<(), FatigueError> {
        if self.group_size == 0 {
            return Err(invalid("group_size must be at least 1"));
        }
        if self.trend_window == 0 {
            return Err(invalid("trend_window must be at least 1"));
        }
        if self.calibration_frames == 0 || self.calibration_frames > self.trend_window {
            return Err(invalid(format!(
                "calibration_frames must be in 1..={} (trend_window), got {}",
                self.trend_window, self.calibration_frames
            )));
        }

        for (name, value) in [
            ("eye_ar_thresh", self.eye_ar_thresh),
            ("mar_thresh", self.mar_thresh),
            ("eyes_dropping_ratio", self.eyes_dropping_ratio),
            ("eyes_dropping_heavy_ratio", self.eyes_dropping_heavy_ratio),
            ("energy_initial", self.energy_initial),
            ("penalty_eye_closed", self.penalty_eye_closed),
            ("penalty_yawn", self.penalty_yawn),
            (
                "penalty_consecutive_closed_extra",
                self.penalty_consecutive_closed_extra,
            ),
            ("recovery_normal", self.recovery_normal),
            ("score_floor", self.score_floor),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }

        if !self.energy_max.is_finite() || self.energy_max <= 0.0 {
            return Err(invalid(format!(
                "energy_max must be positive, got {}",
                self.energy_max
            )));
        }
        if self.energy_initial > self.energy_max {
            return Err(invalid(format!(
                "energy_initial {} exceeds energy_max {}",
                self.energy_initial, self.energy_max
            )));
        }
        if !self.score_ceiling.is_finite() || self.score_ceiling < self.score_floor {
            return Err(invalid(format!(
                "score band [{}, {}] is empty",
                self.score_floor, self.score_ceiling
            )));
        }

        if self.status_thresholds.is_empty() {
            return Err(invalid("status_thresholds must not be empty"));
        }
        if self.status_thresholds.iter().any(|t| !t.is_finite())
            || self
                .status_thresholds
                .windows(2)
                .any(|pair| pair[0].partial_cmp(&pair[1]) != Some(Ordering::Less))
        {
            return Err(invalid("status_thresholds must be strictly ascending"));
        }

        Ok(())
    }
}

fn invalid(reason: impl Into<String>) -> FatigueError {
    FatigueError::InvalidConfig(reason.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
        assert!(EngineConfig::strict().validate().is_ok());
        assert!(EngineConfig::lenient().validate().is_ok());
    }

    #[test]
    fn test_zero_group_size_rejected() {
        let err = EngineConfig::default().with_group_size(0).validate();
        assert!(matches!(err, Err(FatigueError::InvalidConfig(_))));
    }

    #[test]
    fn test_calibration_must_fit_window() {
        let config = EngineConfig::default().with_trend_window(5);
        assert!(config.validate().is_err());

        let config = EngineConfig {
            calibration_frames: 5,
            ..EngineConfig::default().with_trend_window(5)
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_negative_penalty_rejected() {
        let config = EngineConfig {
            penalty_yawn: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_energy_bounds() {
        let config = EngineConfig {
            energy_initial: 120.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = EngineConfig {
            energy_max: 0.0,
            energy_initial: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_status_thresholds_ascending() {
        let config = EngineConfig {
            status_thresholds: vec![0.1, 0.5, 0.3],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"group_size": 15}"#).unwrap();
        assert_eq!(config.group_size, 15);
        assert_eq!(config.trend_window, 20);
        assert_eq!(config.eye_ar_thresh, 0.18);
    }
}
