//! Response envelope for a scored session

use serde::{Deserialize, Serialize};

use crate::state::{SessionReport, WarningLevel};
use crate::status::PredictStatus;

/// Video section of a prediction response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoReport {
    /// Group scores in frame order
    pub predict_video_list: Vec<f64>,
    /// Overall score
    pub predict_video: f64,
    /// Overall warning level
    pub video_predict_stats: WarningLevel,
    /// Band of the overall score
    pub predict_stats: PredictStatus,
    /// Frames supplied
    pub frames_total: usize,
    /// Frames that decoded; `0` means the score carries no information
    pub frames_valid: u64,
}

impl VideoReport {
    /// Build the envelope, banding the overall score against `thresholds`
    pub fn new(report: &SessionReport, thresholds: &[f64]) -> Self {
        let result = report.to_result();
        let predict_stats = if report.overall.valid_frames == 0 {
            PredictStatus::UNKNOWN
        } else {
            PredictStatus::classify(result.overall_score, thresholds)
        };

        Self {
            predict_video_list: result.group_scores,
            predict_video: result.overall_score,
            video_predict_stats: result.overall_level,
            predict_stats,
            frames_total: report.frames_total,
            frames_valid: report.overall.valid_frames,
        }
    }

    /// Whether any frame contributed to the score
    pub fn has_data(&self) -> bool {
        self.frames_valid > 0
    }
}
