//! Accessor traits through which the engine reaches the host's meshes,
//! materials, palettes and tool state.
//!
//! The engine never stores host types. A host implements the four traits and
//! gets [`PaintHost`] for free.

use prism_color::{Linear, Srgb};
use serde::{Deserialize, Serialize};

use crate::palette::{Palette, PaletteKey};

/// What the engine needs to know about one face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceInfo {
    /// Number of corners (3 or more).
    pub vertex_count: usize,
    /// Index into the object's material slots.
    pub material_slot: usize,
    /// Participates in masked passes.
    pub selected: bool,
}

/// Opaque reference to a host material.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialHandle(pub usize);

/// A color attribute of a material.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaterialChannel {
    Diffuse,
    Specular,
    /// Freestyle line color; only its first three channels are read.
    Line,
}

/// Interaction mode of a scene object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectMode {
    #[default]
    Object,
    Edit,
    VertexPaint,
}

/// Faces and per-corner color layers of the mesh being painted.
///
/// Corners are addressed by their running index over all faces in order, so
/// face `i` owns the corners following those of faces `0..i`.
pub trait MeshAccess {
    fn face_count(&self) -> usize;

    /// Face `index`. Panics if out of range.
    fn face(&self, index: usize) -> FaceInfo;

    fn set_face_selected(&mut self, index: usize, selected: bool);

    /// When set, only selected faces take part in a pass.
    fn use_paint_mask(&self) -> bool;

    fn set_use_paint_mask(&mut self, enabled: bool);

    fn has_layer(&self, name: &str) -> bool;

    /// Adds a layer named `name`, initialised from the active layer (or white
    /// if there is none). Does nothing if the name is taken.
    fn create_layer(&mut self, name: &str);

    /// Returns `false` if no such layer existed.
    fn remove_layer(&mut self, name: &str) -> bool;

    /// The layer that receives writes.
    fn active_layer(&self) -> Option<&str>;

    /// Returns `false` if no such layer exists.
    fn set_active_layer(&mut self, name: &str) -> bool;

    /// The layer used for display and rendering.
    fn active_render_layer(&self) -> Option<&str>;

    /// Returns `false` if no such layer exists.
    fn set_active_render_layer(&mut self, name: &str) -> bool;

    fn corner_color(&self, layer: &str, corner: usize) -> Option<Srgb>;

    fn set_corner_color(&mut self, layer: &str, corner: usize, color: Srgb);
}

/// Material slots of the object being painted.
pub trait MaterialAccess {
    /// Material bound to `slot`, or `None` for a missing or empty slot.
    fn slot_material(&self, slot: usize) -> Option<MaterialHandle>;

    fn material_color(&self, material: MaterialHandle, channel: MaterialChannel) -> Linear;

    /// Sets the material's "vertex color paint" flag.
    fn set_vertex_color_paint(&mut self, material: MaterialHandle, enabled: bool);
}

/// Named palettes plus the palette slot of the vertex paint tool.
pub trait PaletteStore {
    /// Returns the palette for `key`, creating and registering it if needed.
    fn palette_mut(&mut self, key: &PaletteKey) -> &mut Palette;

    /// Points the tool slot at the palette called `name`, creating it if
    /// needed.
    fn assign_tool_palette(&mut self, name: &str);
}

/// Interaction state of the host.
pub trait ToolState {
    /// The active object is a mesh in vertex paint mode.
    fn is_paintable(&self) -> bool;

    /// Color of the active vertex paint brush.
    fn brush_color(&self) -> Srgb;
}

/// Everything [`crate::copy_vertex_colors`] needs.
pub trait PaintHost: MeshAccess + MaterialAccess + PaletteStore + ToolState {}

impl<T: MeshAccess + MaterialAccess + PaletteStore + ToolState> PaintHost for T {}

// Forwarding impls so a `&mut` borrow of a host is itself a host.

impl<T: MeshAccess + ?Sized> MeshAccess for &mut T {
    fn face_count(&self) -> usize {
        (**self).face_count()
    }

    fn face(&self, index: usize) -> FaceInfo {
        (**self).face(index)
    }

    fn set_face_selected(&mut self, index: usize, selected: bool) {
        (**self).set_face_selected(index, selected);
    }

    fn use_paint_mask(&self) -> bool {
        (**self).use_paint_mask()
    }

    fn set_use_paint_mask(&mut self, enabled: bool) {
        (**self).set_use_paint_mask(enabled);
    }

    fn has_layer(&self, name: &str) -> bool {
        (**self).has_layer(name)
    }

    fn create_layer(&mut self, name: &str) {
        (**self).create_layer(name);
    }

    fn remove_layer(&mut self, name: &str) -> bool {
        (**self).remove_layer(name)
    }

    fn active_layer(&self) -> Option<&str> {
        (**self).active_layer()
    }

    fn set_active_layer(&mut self, name: &str) -> bool {
        (**self).set_active_layer(name)
    }

    fn active_render_layer(&self) -> Option<&str> {
        (**self).active_render_layer()
    }

    fn set_active_render_layer(&mut self, name: &str) -> bool {
        (**self).set_active_render_layer(name)
    }

    fn corner_color(&self, layer: &str, corner: usize) -> Option<Srgb> {
        (**self).corner_color(layer, corner)
    }

    fn set_corner_color(&mut self, layer: &str, corner: usize, color: Srgb) {
        (**self).set_corner_color(layer, corner, color);
    }
}

impl<T: MaterialAccess + ?Sized> MaterialAccess for &mut T {
    fn slot_material(&self, slot: usize) -> Option<MaterialHandle> {
        (**self).slot_material(slot)
    }

    fn material_color(&self, material: MaterialHandle, channel: MaterialChannel) -> Linear {
        (**self).material_color(material, channel)
    }

    fn set_vertex_color_paint(&mut self, material: MaterialHandle, enabled: bool) {
        (**self).set_vertex_color_paint(material, enabled);
    }
}

impl<T: PaletteStore + ?Sized> PaletteStore for &mut T {
    fn palette_mut(&mut self, key: &PaletteKey) -> &mut Palette {
        (**self).palette_mut(key)
    }

    fn assign_tool_palette(&mut self, name: &str) {
        (**self).assign_tool_palette(name);
    }
}

impl<T: ToolState + ?Sized> ToolState for &mut T {
    fn is_paintable(&self) -> bool {
        (**self).is_paintable()
    }

    fn brush_color(&self) -> Srgb {
        (**self).brush_color()
    }
}

/// Objects of a scene, for drivers that walk every mesh.
pub trait SceneAccess {
    /// View of the active object.
    type Host<'a>: PaintHost
    where
        Self: 'a;

    fn object_count(&self) -> usize;

    fn object_name(&self, index: usize) -> &str;

    /// Name of the object's mesh, or `None` if it has none.
    fn mesh_name(&self, index: usize) -> Option<&str>;

    fn set_active_object(&mut self, index: usize);

    fn object_mode(&self, index: usize) -> ObjectMode;

    fn set_object_mode(&mut self, index: usize, mode: ObjectMode);

    /// Paint view of the active object, if there is one.
    fn active_host(&mut self) -> Option<Self::Host<'_>>;
}
