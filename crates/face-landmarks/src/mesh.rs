//! Dense face-mesh indexing
//!
//! The upstream detector emits a dense mesh (468 points, 478 with refined
//! irises). Only the eye and mouth subsets below feed the fatigue engine.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::frame::{LandmarkFrame, Point2};
use crate::LandmarkError;

/// Right-eye mesh indices in EAR order
pub const RIGHT_EYE: [usize; 6] = [33, 160, 158, 133, 153, 144];

/// Left-eye mesh indices in EAR order
pub const LEFT_EYE: [usize; 6] = [362, 385, 387, 263, 373, 380];

/// Mouth mesh indices in MAR order (corners, then upper and lower lip)
pub const MOUTH: [usize; 4] = [61, 291, 0, 17];

/// Dense face mesh in pixel coordinates
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FaceMesh {
    pub points: Vec<Point2>,
}

impl FaceMesh {
    /// Wrap mesh points that are already in pixel coordinates
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    /// Build a pixel mesh from normalized `[0, 1]` detector output.
    ///
    /// Coordinates are scaled by the image size and truncated toward zero,
    /// matching integer pixel addressing.
    pub fn from_normalized(
        normalized: &[Point2],
        width: u32,
        height: u32,
    ) -> Result<Self, LandmarkError> {
        if width == 0 || height == 0 {
            return Err(LandmarkError::InvalidDimensions { width, height });
        }

        let (w, h) = (f64::from(width), f64::from(height));
        let points = normalized
            .iter()
            .map(|p| Point2::new((p.x * w).trunc(), (p.y * h).trunc()))
            .collect();

        Ok(Self { points })
    }

    /// Minimum mesh size the fixed layout can index
    pub fn required_points() -> usize {
        LEFT_EYE
            .iter()
            .chain(RIGHT_EYE.iter())
            .chain(MOUTH.iter())
            .copied()
            .max()
            .map_or(0, |max| max + 1)
    }

    /// Select the eye and mouth subsets
    pub fn to_landmark_frame(&self) -> Result<LandmarkFrame, LandmarkError> {
        let required = Self::required_points();
        if self.points.len() < required {
            return Err(LandmarkError::MeshTooSmall {
                required,
                actual: self.points.len(),
            });
        }

        trace!("Selecting eye/mouth subsets from {} mesh points", self.points.len());

        Ok(LandmarkFrame::new(
            LEFT_EYE.map(|i| self.points[i]),
            RIGHT_EYE.map(|i| self.points[i]),
            MOUTH.map(|i| self.points[i]),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indexed_mesh(len: usize) -> FaceMesh {
        FaceMesh::new((0..len).map(|i| Point2::new(i as f64, 0.0)).collect())
    }

    #[test]
    fn test_required_points() {
        assert_eq!(FaceMesh::required_points(), 388);
    }

    #[test]
    fn test_subset_selection_order() {
        let frame = indexed_mesh(468).to_landmark_frame().unwrap();
        assert_eq!(frame.left_eye[0].x, 362.0);
        assert_eq!(frame.left_eye[5].x, 380.0);
        assert_eq!(frame.right_eye[0].x, 33.0);
        assert_eq!(frame.right_eye[4].x, 153.0);
        assert_eq!(frame.mouth[0].x, 61.0);
        assert_eq!(frame.mouth[3].x, 17.0);
    }

    #[test]
    fn test_mesh_too_small() {
        let err = indexed_mesh(100).to_landmark_frame().unwrap_err();
        assert_eq!(
            err,
            LandmarkError::MeshTooSmall {
                required: 388,
                actual: 100
            }
        );
    }

    #[test]
    fn test_from_normalized_truncates() {
        let mesh = FaceMesh::from_normalized(
            &[Point2::new(0.5, 0.5), Point2::new(0.999, 0.0014)],
            640,
            480,
        )
        .unwrap();
        assert_eq!(mesh.points[0], Point2::new(320.0, 240.0));
        // 639.36 -> 639, 0.672 -> 0
        assert_eq!(mesh.points[1], Point2::new(639.0, 0.0));
    }

    #[test]
    fn test_from_normalized_rejects_zero_dimensions() {
        let err = FaceMesh::from_normalized(&[Point2::default()], 0, 480).unwrap_err();
        assert_eq!(
            err,
            LandmarkError::InvalidDimensions {
                width: 0,
                height: 480
            }
        );
    }
}
