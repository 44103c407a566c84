//! Per-frame landmark types

use serde::{Deserialize, Serialize};

/// 2D landmark point (pixel or normalized coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    /// Create a new point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in the image plane
    pub fn distance(&self, other: &Point2) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Landmark subsets used for one video frame.
///
/// Point order is significant:
/// - eyes: `[outer corner, upper-1, upper-2, inner corner, lower-2, lower-1]`
/// - mouth: `[left corner, right corner, upper lip, lower lip]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkFrame {
    pub left_eye: [Point2; 6],
    pub right_eye: [Point2; 6],
    pub mouth: [Point2; 4],
}

impl LandmarkFrame {
    /// Create a landmark frame from its three ordered subsets
    pub fn new(left_eye: [Point2; 6], right_eye: [Point2; 6], mouth: [Point2; 4]) -> Self {
        Self {
            left_eye,
            right_eye,
            mouth,
        }
    }
}
