//! In-memory scene for the vertex color engine: materials, mesh objects with
//! vertex color layers, palettes and paint tool settings, stored as RON.
//!
//! [`Scene`] implements [`prism_paint::SceneAccess`] and hands out a
//! [`SceneHost`] per mesh object, so both single copies and the batch
//! transfer run directly against it.

mod error;
mod host;
mod material;
mod mesh;
mod scene;

pub use error::SceneError;
pub use host::SceneHost;
pub use material::{Material, MaterialError};
pub use mesh::{Face, Mesh, VertexColorLayer};
pub use scene::{Object, Scene, ToolSettings};
