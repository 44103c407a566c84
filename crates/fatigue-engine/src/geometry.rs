//! Eye and mouth aspect ratios

use face_landmarks::{LandmarkFrame, Point2};
use serde::{Deserialize, Serialize};

/// Guards the MAR denominator when mouth corners coincide
const MAR_EPSILON: f64 = 1e-6;

/// Per-frame geometry derived from one landmark set
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeometrySample {
    /// Mean eye aspect ratio of both eyes
    pub ear: f64,
    /// Mouth aspect ratio
    pub mar: f64,
}

impl GeometrySample {
    /// Sample reported when no face was found; scored as fully closed eyes
    pub const NO_FACE: GeometrySample = GeometrySample { ear: 0.0, mar: 0.0 };

    /// Create a sample from precomputed ratios
    pub fn new(ear: f64, mar: f64) -> Self {
        Self { ear, mar }
    }

    /// Eyes closed on this frame
    pub fn is_eye_closed(&self, eye_ar_thresh: f64) -> bool {
        self.ear < eye_ar_thresh
    }

    /// Mouth open wide enough to count as a yawn
    pub fn is_yawning(&self, mar_thresh: f64) -> bool {
        self.mar > mar_thresh
    }
}

/// EAR of one eye: `(|p1-p5| + |p2-p4|) / (2 |p0-p3|)`
pub fn eye_aspect_ratio(eye: &[Point2; 6]) -> f64 {
    let vertical_a = eye[1].distance(&eye[5]);
    let vertical_b = eye[2].distance(&eye[4]);
    let horizontal = eye[0].distance(&eye[3]);
    (vertical_a + vertical_b) / (2.0 * horizontal)
}

/// MAR: `|p2-p3| / (|p0-p1| + 1e-6)`
pub fn mouth_aspect_ratio(mouth: &[Point2; 4]) -> f64 {
    let vertical = mouth[2].distance(&mouth[3]);
    let horizontal = mouth[0].distance(&mouth[1]);
    vertical / (horizontal + MAR_EPSILON)
}

/// Stateless EAR/MAR extractor
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometryExtractor;

impl GeometryExtractor {
    /// Compute the sample for one frame; `None` (no face) yields [`GeometrySample::NO_FACE`]
    pub fn extract(frame: Option<&LandmarkFrame>) -> GeometrySample {
        match frame {
            Some(frame) => GeometrySample {
                ear: (eye_aspect_ratio(&frame.left_eye) + eye_aspect_ratio(&frame.right_eye))
                    / 2.0,
                mar: mouth_aspect_ratio(&frame.mouth),
            },
            None => GeometrySample::NO_FACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Eye 10px wide whose two vertical chords are `height` px
    fn eye(height: f64) -> [Point2; 6] {
        [
            Point2::new(0.0, 0.0),
            Point2::new(3.0, -height / 2.0),
            Point2::new(7.0, -height / 2.0),
            Point2::new(10.0, 0.0),
            Point2::new(7.0, height / 2.0),
            Point2::new(3.0, height / 2.0),
        ]
    }

    /// Mouth 20px wide, `opening` px tall
    fn mouth(opening: f64) -> [Point2; 4] {
        [
            Point2::new(0.0, 0.0),
            Point2::new(20.0, 0.0),
            Point2::new(10.0, -opening / 2.0),
            Point2::new(10.0, opening / 2.0),
        ]
    }

    #[test]
    fn test_eye_aspect_ratio() {
        // (4 + 4) / (2 * 10)
        assert!((eye_aspect_ratio(&eye(4.0)) - 0.4).abs() < 1e-12);
        assert_eq!(eye_aspect_ratio(&eye(0.0)), 0.0);
    }

    #[test]
    fn test_mouth_aspect_ratio() {
        let mar = mouth_aspect_ratio(&mouth(10.0));
        assert!((mar - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_coincident_mouth_corners_do_not_divide_by_zero() {
        let mouth = [
            Point2::new(5.0, 5.0),
            Point2::new(5.0, 5.0),
            Point2::new(5.0, 4.0),
            Point2::new(5.0, 6.0),
        ];
        let mar = mouth_aspect_ratio(&mouth);
        assert!(mar.is_finite());
        assert!((mar - 2.0e6).abs() < 1.0);
    }

    #[test]
    fn test_extract_averages_both_eyes() {
        let frame = LandmarkFrame::new(eye(4.0), eye(2.0), mouth(2.0));
        let sample = GeometryExtractor::extract(Some(&frame));
        // (0.4 + 0.2) / 2
        assert!((sample.ear - 0.3).abs() < 1e-12);
        assert!((sample.mar - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_no_face_is_closed_sample() {
        let sample = GeometryExtractor::extract(None);
        assert_eq!(sample, GeometrySample::NO_FACE);
        assert!(sample.is_eye_closed(0.18));
        assert!(!sample.is_yawning(0.60));
    }

    #[test]
    fn test_translation_invariant() {
        let shift = |p: Point2| Point2::new(p.x + 100.0, p.y + 50.0);
        let frame = LandmarkFrame::new(eye(4.0), eye(3.0), mouth(8.0));
        let moved = LandmarkFrame::new(
            frame.left_eye.map(shift),
            frame.right_eye.map(shift),
            frame.mouth.map(shift),
        );
        let a = GeometryExtractor::extract(Some(&frame));
        let b = GeometryExtractor::extract(Some(&moved));
        assert!((a.ear - b.ear).abs() < 1e-9);
        assert!((a.mar - b.mar).abs() < 1e-9);
    }
}
