//! [`SceneHost`]: the paint engine's view of one scene object.

use prism_color::{Linear, Srgb};
use prism_paint::{
    FaceInfo, MaterialAccess, MaterialChannel, MaterialHandle, MeshAccess, ObjectMode, Palette,
    PaletteKey, PaletteLibrary, PaletteStore, ToolState,
};

use crate::material::Material;
use crate::mesh::Mesh;
use crate::scene::ToolSettings;

/// Borrows one object's mesh and slots together with the scene-wide
/// materials, palettes and tool settings.
pub struct SceneHost<'a> {
    mode: ObjectMode,
    mesh: &'a mut Mesh,
    slots: &'a [Option<String>],
    materials: &'a mut [Material],
    palettes: &'a mut PaletteLibrary,
    tool: &'a ToolSettings,
}

impl<'a> SceneHost<'a> {
    pub fn new(
        mode: ObjectMode,
        mesh: &'a mut Mesh,
        slots: &'a [Option<String>],
        materials: &'a mut [Material],
        palettes: &'a mut PaletteLibrary,
        tool: &'a ToolSettings,
    ) -> Self {
        Self {
            mode,
            mesh,
            slots,
            materials,
            palettes,
            tool,
        }
    }
}

impl MeshAccess for SceneHost<'_> {
    fn face_count(&self) -> usize {
        self.mesh.face_count()
    }

    fn face(&self, index: usize) -> FaceInfo {
        self.mesh.face(index)
    }

    fn set_face_selected(&mut self, index: usize, selected: bool) {
        self.mesh.set_face_selected(index, selected);
    }

    fn use_paint_mask(&self) -> bool {
        self.mesh.use_paint_mask
    }

    fn set_use_paint_mask(&mut self, enabled: bool) {
        self.mesh.use_paint_mask = enabled;
    }

    fn has_layer(&self, name: &str) -> bool {
        self.mesh.has_layer(name)
    }

    fn create_layer(&mut self, name: &str) {
        self.mesh.create_layer(name);
    }

    fn remove_layer(&mut self, name: &str) -> bool {
        self.mesh.remove_layer(name)
    }

    fn active_layer(&self) -> Option<&str> {
        self.mesh.active_layer.as_deref()
    }

    fn set_active_layer(&mut self, name: &str) -> bool {
        self.mesh.set_active_layer(name)
    }

    fn active_render_layer(&self) -> Option<&str> {
        self.mesh.active_render_layer.as_deref()
    }

    fn set_active_render_layer(&mut self, name: &str) -> bool {
        self.mesh.set_active_render_layer(name)
    }

    fn corner_color(&self, layer: &str, corner: usize) -> Option<Srgb> {
        self.mesh.corner_color(layer, corner)
    }

    fn set_corner_color(&mut self, layer: &str, corner: usize, color: Srgb) {
        self.mesh.set_corner_color(layer, corner, color);
    }
}

impl MaterialAccess for SceneHost<'_> {
    fn slot_material(&self, slot: usize) -> Option<MaterialHandle> {
        let name = self.slots.get(slot)?.as_deref()?;
        self.materials
            .iter()
            .position(|m| m.name == name)
            .map(MaterialHandle)
    }

    fn material_color(&self, material: MaterialHandle, channel: MaterialChannel) -> Linear {
        self.materials[material.0].color(channel)
    }

    fn set_vertex_color_paint(&mut self, material: MaterialHandle, enabled: bool) {
        if let Some(m) = self.materials.get_mut(material.0) {
            m.use_vertex_color_paint = enabled;
        }
    }
}

impl PaletteStore for SceneHost<'_> {
    fn palette_mut(&mut self, key: &PaletteKey) -> &mut Palette {
        self.palettes.palette_mut(key)
    }

    fn assign_tool_palette(&mut self, name: &str) {
        self.palettes.assign_tool_palette(name);
    }
}

impl ToolState for SceneHost<'_> {
    fn is_paintable(&self) -> bool {
        self.mode == ObjectMode::VertexPaint
    }

    fn brush_color(&self) -> Srgb {
        self.tool.brush_color
    }
}
