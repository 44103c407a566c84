//! Facial Landmark Types
//!
//! Landmark data consumed by the fatigue engine:
//! - Fixed 2D point layout for both eyes and the mouth
//! - Dense face-mesh indexing and normalized-to-pixel conversion
//! - Pre-extraction hook turning raw frame payloads into landmark sets

pub mod frame;
pub mod mesh;
pub mod source;

pub use frame::{LandmarkFrame, Point2};
pub use mesh::{FaceMesh, LEFT_EYE, MOUTH, RIGHT_EYE};
pub use source::{Detection, LandmarkSource, NormalizedMeshSource};

use thiserror::Error;

/// Landmark error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LandmarkError {
    #[error("Face mesh has {actual} points, layout needs at least {required}")]
    MeshTooSmall { required: usize, actual: usize },

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Frame decode failed: {0}")]
    Decode(String),
}
