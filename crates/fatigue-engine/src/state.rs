//! Warning levels and pass/session results

use serde::{Deserialize, Serialize};

use crate::FatigueError;

/// Fatigue warning level, serialized as `0`, `1` or `2`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum WarningLevel {
    /// No sign of fatigue
    #[default]
    Normal,
    /// Light warning - rest advised
    Mild,
    /// Heavy warning - dangerous
    Severe,
}

impl WarningLevel {
    /// Numeric level (0-2)
    pub fn as_u8(self) -> u8 {
        match self {
            WarningLevel::Normal => 0,
            WarningLevel::Mild => 1,
            WarningLevel::Severe => 2,
        }
    }
}

impl From<WarningLevel> for u8 {
    fn from(level: WarningLevel) -> Self {
        level.as_u8()
    }
}

impl TryFrom<u8> for WarningLevel {
    type Error = FatigueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(WarningLevel::Normal),
            1 => Ok(WarningLevel::Mild),
            2 => Ok(WarningLevel::Severe),
            other => Err(FatigueError::InvalidLevel(other)),
        }
    }
}

/// Outcome of one scoring pass
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Drowsiness score, inside the configured band unless the pass had no data
    pub score: f64,
    /// Warning level
    pub warning_level: WarningLevel,
}

impl ScoreResult {
    /// Result of a pass that saw no valid frames
    pub const NO_DATA: ScoreResult = ScoreResult {
        score: 0.0,
        warning_level: WarningLevel::Normal,
    };
}

/// Outcome of a full engine run over one frame list
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionResult {
    /// Score of each fixed-size group, in frame order
    pub group_scores: Vec<f64>,
    /// Score over all frames
    pub overall_score: f64,
    /// Warning level over all frames
    pub overall_level: WarningLevel,
}

/// Diagnostics for one pass
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PassReport {
    pub result: ScoreResult,
    /// Frames that decoded (faces and no-face frames alike)
    pub valid_frames: u64,
    pub closed_frames: u64,
    pub perclos: f64,
    pub perclos_score: f64,
    pub energy_score: f64,
    pub min_energy: f64,
    pub max_closed_run: u64,
    /// Highest level the trend analyzer returned during the pass
    pub trend_max_level: WarningLevel,
}

/// Diagnostics for a full run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionReport {
    /// Frames supplied, including those that failed to decode
    pub frames_total: usize,
    pub overall: PassReport,
    pub groups: Vec<PassReport>,
}

impl SessionReport {
    /// Collapse diagnostics into the public session result
    pub fn to_result(&self) -> SessionResult {
        SessionResult {
            group_scores: self.groups.iter().map(|g| g.result.score).collect(),
            overall_score: self.overall.result.score,
            overall_level: self.overall.result.warning_level,
        }
    }
}

impl From<SessionReport> for SessionResult {
    fn from(report: SessionReport) -> Self {
        report.to_result()
    }
}
