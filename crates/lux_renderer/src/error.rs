//! Errors raised while assembling a scene.

use thiserror::Error;

/// A material or light with values outside their valid range.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SceneError {
    #[error("invalid material {field}: {value}")]
    InvalidMaterial { field: &'static str, value: f32 },

    #[error("invalid light {field}: {value}")]
    InvalidLight { field: &'static str, value: f32 },
}

/// Geometry that cannot be built exactly as specified.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("OBB axes are not mutually orthogonal (|x . (y x z)| = {triple_product})")]
    NonOrthogonalAxes { triple_product: f32 },
}
