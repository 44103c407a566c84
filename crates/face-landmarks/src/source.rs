//! Pre-extraction hooks
//!
//! A [`LandmarkSource`] turns whatever the caller holds for one frame (encoded
//! bytes, detector output) into a [`Detection`]:
//! - `Ok(Some(frame))`: face found
//! - `Ok(None)`: frame decoded but no face detected
//! - `Err(_)`: frame could not be decoded and must be skipped

use tracing::debug;

use crate::frame::{LandmarkFrame, Point2};
use crate::mesh::FaceMesh;
use crate::LandmarkError;

/// Outcome of landmark extraction for one frame
pub type Detection = Result<Option<LandmarkFrame>, LandmarkError>;

/// Hook that extracts landmarks from one raw frame payload
pub trait LandmarkSource {
    /// Raw per-frame payload
    type Input: ?Sized;

    /// Extract landmarks for a single frame
    fn detect(&self, input: &Self::Input) -> Detection;
}

/// Adapter for detectors that emit a normalized dense mesh per frame.
///
/// Input is `None` when the detector found no face.
#[derive(Debug, Clone, Copy)]
pub struct NormalizedMeshSource {
    width: u32,
    height: u32,
}

impl NormalizedMeshSource {
    /// Create a source for frames of the given pixel size
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl LandmarkSource for NormalizedMeshSource {
    type Input = Option<Vec<Point2>>;

    fn detect(&self, input: &Self::Input) -> Detection {
        let Some(normalized) = input else {
            return Ok(None);
        };

        let mesh = FaceMesh::from_normalized(normalized, self.width, self.height)?;
        match mesh.to_landmark_frame() {
            Ok(frame) => Ok(Some(frame)),
            Err(e) => {
                debug!("Dropping frame: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_face_is_not_an_error() {
        let source = NormalizedMeshSource::new(640, 480);
        assert_eq!(source.detect(&None), Ok(None));
    }

    #[test]
    fn test_full_mesh_detects_face() {
        let source = NormalizedMeshSource::new(100, 100);
        let mesh = vec![Point2::new(0.5, 0.25); 478];
        let frame = source.detect(&Some(mesh)).unwrap().unwrap();
        assert_eq!(frame.mouth[0], Point2::new(50.0, 25.0));
    }

    #[test]
    fn test_truncated_mesh_is_decode_failure() {
        let source = NormalizedMeshSource::new(100, 100);
        let result = source.detect(&Some(vec![Point2::default(); 10]));
        assert!(matches!(result, Err(LandmarkError::MeshTooSmall { .. })));
    }
}
