//! Scene loading and validation errors.

use crate::material::MaterialError;

/// Errors returned when loading, saving, or validating a scene.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    /// I/O error reading or writing the scene file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// RON deserialization error.
    #[error("ron parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// RON serialization error.
    #[error("ron serialize error: {0}")]
    Serialize(#[from] ron::Error),

    /// Material validation error.
    #[error("material error: {0}")]
    Material(#[from] MaterialError),

    /// A material slot names a material the scene does not define.
    #[error("object {object:?} references unknown material {material:?}")]
    UnknownMaterial { object: String, material: String },

    /// A layer does not hold exactly one color per face corner.
    #[error("layer {layer:?} of mesh {mesh:?} has {found} colors, expected {expected}")]
    CornerCountMismatch {
        mesh: String,
        layer: String,
        expected: usize,
        found: usize,
    },

    /// A face with fewer than three corners.
    #[error("face {face} of mesh {mesh:?} has fewer than three vertices")]
    DegenerateFace { mesh: String, face: usize },

    /// An active or render layer name that matches no layer.
    #[error("mesh {mesh:?} has no layer named {layer:?}")]
    UnknownLayer { mesh: String, layer: String },

    /// Two materials, objects or layers share a name.
    #[error("duplicate name: {0}")]
    DuplicateName(String),

    /// The active object index is out of range.
    #[error("active object index {0} is out of range")]
    InvalidActiveObject(usize),
}
