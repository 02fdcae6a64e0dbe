//! Vertex color copy engine: resolves per-face source colors, composites them
//! into the active vertex color layer with a blend mode, and collects
//! palettes. The host (meshes, materials, palettes, tool state) is reached
//! only through the traits in [`host`].

mod composite;
pub mod host;
mod palette;
mod source;
mod transfer;

#[cfg(test)]
mod test_host;

pub use composite::{CopyError, CopyReport, CopyRequest, copy_vertex_colors};
pub use host::{
    FaceInfo, MaterialAccess, MaterialChannel, MaterialHandle, MeshAccess, ObjectMode, PaintHost,
    PaletteStore, SceneAccess, ToolState,
};
pub use palette::{DEFAULT_PALETTE_NAME, Palette, PaletteKey, PaletteLibrary};
pub use source::{
    ColorSourceResolver, FaceSource, ParseSourceError, SourceKind, mark_vertex_color_paint,
};
pub use transfer::{TransferOptions, TransferReport, transfer_material_colors};
