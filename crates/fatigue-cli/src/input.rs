//! Recorded session input
//!
//! A session file is a JSON array with one entry per frame. Each entry is one of:
//! - `null`: the frame failed to decode and is skipped
//! - `{"ear": 0.31, "mar": 0.12}`: precomputed ratios
//! - `{"left_eye": [...], "right_eye": [...], "mouth": [...]}`: landmark subsets
//! - `{"width": 640, "height": 480, "points": [...] | null}`: normalized dense
//!   mesh, `points: null` meaning no face was detected

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use face_landmarks::{LandmarkFrame, LandmarkSource, NormalizedMeshSource, Point2};
use fatigue_engine::{sample_from_detection, GeometryExtractor, GeometrySample};
use serde::Deserialize;
use tracing::debug;

/// One recorded frame
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FrameRecord {
    Sample {
        ear: f64,
        mar: f64,
    },
    Landmarks(LandmarkFrame),
    Mesh {
        width: u32,
        height: u32,
        points: Option<Vec<Point2>>,
    },
}

impl FrameRecord {
    /// Reduce the record to an engine sample
    pub fn to_sample(&self) -> Option<GeometrySample> {
        match self {
            FrameRecord::Sample { ear, mar } => Some(GeometrySample::new(*ear, *mar)),
            FrameRecord::Landmarks(frame) => Some(GeometryExtractor::extract(Some(frame))),
            FrameRecord::Mesh {
                width,
                height,
                points,
            } => sample_from_detection(&NormalizedMeshSource::new(*width, *height).detect(points)),
        }
    }
}

/// Parse a session from JSON text
pub fn parse_session(json: &str) -> Result<Vec<Option<GeometrySample>>> {
    let records: Vec<Option<FrameRecord>> =
        serde_json::from_str(json).context("Session must be a JSON array of frame records")?;

    let samples: Vec<Option<GeometrySample>> = records
        .iter()
        .map(|record| record.as_ref().and_then(FrameRecord::to_sample))
        .collect();

    debug!(
        "Parsed {} frames ({} undecodable)",
        samples.len(),
        samples.iter().filter(|s| s.is_none()).count()
    );

    Ok(samples)
}

/// Read a session from a file, or stdin when `path` is `-`
pub fn read_session(path: &Path) -> Result<Vec<Option<GeometrySample>>> {
    let json = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read session from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read session file {}", path.display()))?
    };

    parse_session(&json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_records() {
        let json = r#"[
            {"ear": 0.31, "mar": 0.12},
            null,
            {"width": 640, "height": 480, "points": null}
        ]"#;
        let samples = parse_session(json).unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0], Some(GeometrySample::new(0.31, 0.12)));
        assert_eq!(samples[1], None);
        // No face: valid, fully closed
        assert_eq!(samples[2], Some(GeometrySample::NO_FACE));
    }

    #[test]
    fn test_parse_landmarks() {
        let eye = r#"[{"x":0,"y":0},{"x":3,"y":-2},{"x":7,"y":-2},{"x":10,"y":0},{"x":7,"y":2},{"x":3,"y":2}]"#;
        let mouth = r#"[{"x":0,"y":0},{"x":20,"y":0},{"x":10,"y":-1},{"x":10,"y":1}]"#;
        let json = format!(r#"[{{"left_eye": {eye}, "right_eye": {eye}, "mouth": {mouth}}}]"#);

        let samples = parse_session(&json).unwrap();
        let sample = samples[0].unwrap();
        assert!((sample.ear - 0.4).abs() < 1e-12);
        assert!((sample.mar - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_undersized_mesh_is_skipped() {
        let json = r#"[{"width": 640, "height": 480, "points": [{"x": 0.5, "y": 0.5}]}]"#;
        let samples = parse_session(json).unwrap();
        assert_eq!(samples, vec![None]);
    }

    #[test]
    fn test_rejects_non_array() {
        assert!(parse_session(r#"{"ear": 0.3}"#).is_err());
        assert!(parse_session(r#"[{"foo": 1}]"#).is_err());
    }
}
