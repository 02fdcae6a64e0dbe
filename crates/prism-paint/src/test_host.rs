//! Minimal in-memory host used by the engine's unit tests.

use prism_color::{Linear, Srgb};

use crate::host::{
    FaceInfo, MaterialAccess, MaterialChannel, MaterialHandle, MeshAccess, ObjectMode,
    PaletteStore, SceneAccess, ToolState,
};
use crate::palette::{Palette, PaletteKey, PaletteLibrary};

#[derive(Clone, Debug)]
pub struct TestMaterial {
    pub diffuse: Linear,
    pub specular: Linear,
    pub line: Linear,
    pub vertex_color_paint: bool,
}

impl TestMaterial {
    pub fn diffuse(r: f64, g: f64, b: f64) -> Self {
        Self {
            diffuse: Linear::rgb(r, g, b),
            specular: Linear::rgb(1.0, 1.0, 1.0),
            line: Linear::rgb(0.0, 0.0, 0.0),
            vertex_color_paint: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct TestHost {
    pub paintable: bool,
    pub faces: Vec<FaceInfo>,
    pub use_mask: bool,
    pub layers: Vec<(String, Vec<Srgb>)>,
    pub active: Option<String>,
    pub active_render: Option<String>,
    /// Material index per slot.
    pub slots: Vec<Option<usize>>,
    pub materials: Vec<TestMaterial>,
    pub palettes: PaletteLibrary,
    pub brush: Srgb,
}

impl TestHost {
    /// Quads, one per entry of `face_slots`, with a single white layer "Col".
    pub fn quads(face_slots: &[usize]) -> Self {
        let faces: Vec<FaceInfo> = face_slots
            .iter()
            .map(|&slot| FaceInfo {
                vertex_count: 4,
                material_slot: slot,
                selected: true,
            })
            .collect();
        let corners = faces.len() * 4;
        Self {
            paintable: true,
            faces,
            use_mask: false,
            layers: vec![("Col".to_string(), vec![Srgb::rgb(1.0, 1.0, 1.0); corners])],
            active: Some("Col".to_string()),
            active_render: Some("Col".to_string()),
            slots: Vec::new(),
            materials: Vec::new(),
            palettes: PaletteLibrary::new(),
            brush: Srgb::rgb(1.0, 1.0, 1.0),
        }
    }

    pub fn with_material(mut self, material: TestMaterial) -> Self {
        self.materials.push(material);
        self.slots.push(Some(self.materials.len() - 1));
        self
    }

    pub fn with_empty_slot(mut self) -> Self {
        self.slots.push(None);
        self
    }

    pub fn layer(&self, name: &str) -> &[Srgb] {
        &self
            .layers
            .iter()
            .find(|(n, _)| n == name)
            .unwrap_or_else(|| panic!("no layer {name}"))
            .1
    }

    pub fn layer_mut(&mut self, name: &str) -> &mut Vec<Srgb> {
        &mut self
            .layers
            .iter_mut()
            .find(|(n, _)| n == name)
            .unwrap_or_else(|| panic!("no layer {name}"))
            .1
    }

    pub fn fill(&mut self, name: &str, color: Srgb) {
        self.layer_mut(name).iter_mut().for_each(|c| *c = color);
    }
}

impl MeshAccess for TestHost {
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn face(&self, index: usize) -> FaceInfo {
        self.faces[index]
    }

    fn set_face_selected(&mut self, index: usize, selected: bool) {
        self.faces[index].selected = selected;
    }

    fn use_paint_mask(&self) -> bool {
        self.use_mask
    }

    fn set_use_paint_mask(&mut self, enabled: bool) {
        self.use_mask = enabled;
    }

    fn has_layer(&self, name: &str) -> bool {
        self.layers.iter().any(|(n, _)| n == name)
    }

    fn create_layer(&mut self, name: &str) {
        if self.has_layer(name) {
            return;
        }
        let corners = self.faces.iter().map(|f| f.vertex_count).sum();
        let data = match &self.active {
            Some(active) => self.layer(active).to_vec(),
            None => vec![Srgb::rgb(1.0, 1.0, 1.0); corners],
        };
        self.layers.push((name.to_string(), data));
        if self.active.is_none() {
            self.active = Some(name.to_string());
        }
    }

    fn remove_layer(&mut self, name: &str) -> bool {
        let before = self.layers.len();
        self.layers.retain(|(n, _)| n != name);
        if self.active.as_deref() == Some(name) {
            self.active = self.layers.first().map(|(n, _)| n.clone());
        }
        if self.active_render.as_deref() == Some(name) {
            self.active_render = self.layers.first().map(|(n, _)| n.clone());
        }
        self.layers.len() != before
    }

    fn active_layer(&self) -> Option<&str> {
        self.active.as_deref()
    }

    fn set_active_layer(&mut self, name: &str) -> bool {
        if !self.has_layer(name) {
            return false;
        }
        self.active = Some(name.to_string());
        true
    }

    fn active_render_layer(&self) -> Option<&str> {
        self.active_render.as_deref()
    }

    fn set_active_render_layer(&mut self, name: &str) -> bool {
        if !self.has_layer(name) {
            return false;
        }
        self.active_render = Some(name.to_string());
        true
    }

    fn corner_color(&self, layer: &str, corner: usize) -> Option<Srgb> {
        self.layers
            .iter()
            .find(|(n, _)| n == layer)
            .and_then(|(_, data)| data.get(corner).copied())
    }

    fn set_corner_color(&mut self, layer: &str, corner: usize, color: Srgb) {
        self.layer_mut(layer)[corner] = color;
    }
}

impl MaterialAccess for TestHost {
    fn slot_material(&self, slot: usize) -> Option<MaterialHandle> {
        self.slots.get(slot).copied().flatten().map(MaterialHandle)
    }

    fn material_color(&self, material: MaterialHandle, channel: MaterialChannel) -> Linear {
        let m = &self.materials[material.0];
        match channel {
            MaterialChannel::Diffuse => m.diffuse,
            MaterialChannel::Specular => m.specular,
            MaterialChannel::Line => m.line,
        }
    }

    fn set_vertex_color_paint(&mut self, material: MaterialHandle, enabled: bool) {
        self.materials[material.0].vertex_color_paint = enabled;
    }
}

impl PaletteStore for TestHost {
    fn palette_mut(&mut self, key: &PaletteKey) -> &mut Palette {
        self.palettes.palette_mut(key)
    }

    fn assign_tool_palette(&mut self, name: &str) {
        self.palettes.assign_tool_palette(name);
    }
}

impl ToolState for TestHost {
    fn is_paintable(&self) -> bool {
        self.paintable
    }

    fn brush_color(&self) -> Srgb {
        self.brush
    }
}

/// A scene of named test hosts; `None` entries are objects without a mesh.
pub struct TestScene {
    pub objects: Vec<(String, Option<TestHost>, ObjectMode)>,
    pub active: Option<usize>,
}

impl SceneAccess for TestScene {
    type Host<'a> = &'a mut TestHost;

    fn object_count(&self) -> usize {
        self.objects.len()
    }

    fn object_name(&self, index: usize) -> &str {
        &self.objects[index].0
    }

    fn mesh_name(&self, index: usize) -> Option<&str> {
        self.objects[index].1.as_ref().map(|_| self.objects[index].0.as_str())
    }

    fn set_active_object(&mut self, index: usize) {
        self.active = Some(index);
    }

    fn object_mode(&self, index: usize) -> ObjectMode {
        self.objects[index].2
    }

    fn set_object_mode(&mut self, index: usize, mode: ObjectMode) {
        self.objects[index].2 = mode;
        if let Some(host) = self.objects[index].1.as_mut() {
            host.paintable = mode == ObjectMode::VertexPaint;
        }
    }

    fn active_host(&mut self) -> Option<Self::Host<'_>> {
        let index = self.active?;
        self.objects[index].1.as_mut()
    }
}
