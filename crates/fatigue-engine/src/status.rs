//! Prediction status banding
//!
//! Maps a score onto ordinal bands `"1"` (lowest) upward, using ascending
//! thresholds. `"0"` marks a score that cannot be banded.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordinal band of a fatigue score, serialized as a string
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PredictStatus(u8);

impl PredictStatus {
    /// Status for a missing or out-of-range score
    pub const UNKNOWN: PredictStatus = PredictStatus(0);

    /// Band `score` against ascending `thresholds`.
    ///
    /// Returns `index + 1` of the first threshold the score is below, or
    /// `thresholds.len() + 1` when it reaches every threshold.
    pub fn classify(score: f64, thresholds: &[f64]) -> Self {
        if !score.is_finite() || !(0.0..=1.0).contains(&score) {
            return Self::UNKNOWN;
        }

        // The legacy status lookup had no band at or above the last
        // threshold; such scores get their own top band, `len + 1`.
        let band = thresholds
            .iter()
            .position(|&threshold| score < threshold)
            .unwrap_or(thresholds.len());

        PredictStatus(u8::try_from(band + 1).unwrap_or(u8::MAX))
    }

    pub fn as_u8(self) -> u8 {
        self.0
    }
}

impl fmt::Display for PredictStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<PredictStatus> for String {
    fn from(status: PredictStatus) -> Self {
        status.to_string()
    }
}

impl TryFrom<String> for PredictStatus {
    type Error = std::num::ParseIntError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse().map(PredictStatus)
    }
}
