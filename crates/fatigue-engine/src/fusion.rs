//! Multi-signal score fusion

use tracing::warn;

use crate::config::EngineConfig;
use crate::state::{ScoreResult, WarningLevel};

/// End-of-pass signals fed into fusion
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FusionInputs {
    pub energy_score: f64,
    pub perclos_score: f64,
    pub max_closed_run: u64,
    pub trend_max_level: WarningLevel,
}

/// Combines energy and PERCLOS scores and applies the closure override
#[derive(Debug, Clone, Copy)]
pub struct ScoreFusion {
    score_floor: f64,
    score_ceiling: f64,
    hard_override_run: u64,
}

impl ScoreFusion {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            score_floor: config.score_floor,
            score_ceiling: config.score_ceiling,
            hard_override_run: config.hard_override_run,
        }
    }

    /// Fuse one pass's signals into its result
    pub fn fuse(&self, inputs: &FusionInputs) -> ScoreResult {
        let raw_score = inputs.energy_score.max(inputs.perclos_score);

        let mut warning_level = inputs.trend_max_level;
        if inputs.max_closed_run >= self.hard_override_run {
            warning_level = WarningLevel::Severe;
            warn!(
                "Hard rule triggered: {} consecutive closed-eye frames",
                inputs.max_closed_run
            );
        }

        ScoreResult {
            score: raw_score.clamp(self.score_floor, self.score_ceiling),
            warning_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fusion() -> ScoreFusion {
        ScoreFusion::new(&EngineConfig::default())
    }

    #[test]
    fn test_takes_stronger_signal() {
        let result = fusion().fuse(&FusionInputs {
            energy_score: 0.3,
            perclos_score: 0.6,
            ..Default::default()
        });
        assert_eq!(result.score, 0.6);

        let result = fusion().fuse(&FusionInputs {
            energy_score: 0.7,
            perclos_score: 0.2,
            ..Default::default()
        });
        assert_eq!(result.score, 0.7);
    }

    #[test]
    fn test_clamped_to_band() {
        let low = fusion().fuse(&FusionInputs::default());
        assert_eq!(low.score, 0.05);

        let high = fusion().fuse(&FusionInputs {
            energy_score: 1.0,
            perclos_score: 1.5,
            ..Default::default()
        });
        assert_eq!(high.score, 0.99);
    }

    #[test]
    fn test_trend_level_passes_through() {
        let result = fusion().fuse(&FusionInputs {
            trend_max_level: WarningLevel::Mild,
            max_closed_run: 1,
            ..Default::default()
        });
        assert_eq!(result.warning_level, WarningLevel::Mild);
    }

    #[test]
    fn test_closed_run_forces_severe() {
        let result = fusion().fuse(&FusionInputs {
            trend_max_level: WarningLevel::Normal,
            max_closed_run: 2,
            ..Default::default()
        });
        assert_eq!(result.warning_level, WarningLevel::Severe);
    }
}
