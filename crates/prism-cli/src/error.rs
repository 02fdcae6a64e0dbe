//! Errors that end a `prism` run.

use prism_paint::CopyError;
use prism_scene::SceneError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("copy failed: {0}")]
    Copy(#[from] CopyError),

    #[error("no object named {0:?} in the scene")]
    UnknownObject(String),

    #[error("scene has no active object; pass --object")]
    NoActiveObject,

    #[error("object {0:?} has no mesh")]
    NotAMesh(String),
}
