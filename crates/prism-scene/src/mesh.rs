//! Polygon meshes with per-corner vertex color layers.

use prism_color::Srgb;
use prism_paint::{FaceInfo, MeshAccess};
use serde::{Deserialize, Serialize};

use crate::error::SceneError;

/// Color given to every corner of a layer created without a template.
const LAYER_FILL: Srgb = Srgb::new(prism_color::Color::WHITE);

/// One polygon.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face {
    /// Vertex indices, one per corner, in winding order.
    pub vertices: Vec<u32>,
    /// Index into the owning object's material slots.
    #[serde(default)]
    pub material_slot: usize,
    #[serde(default = "selected_by_default")]
    pub selected: bool,
}

fn selected_by_default() -> bool {
    true
}

impl Face {
    pub fn new(vertices: Vec<u32>, material_slot: usize) -> Self {
        Self {
            vertices,
            material_slot,
            selected: true,
        }
    }

    pub fn corner_count(&self) -> usize {
        self.vertices.len()
    }
}

/// Named per-corner colors, stored sRGB-encoded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VertexColorLayer {
    pub name: String,
    /// One entry per face corner, in face order.
    pub colors: Vec<Srgb>,
}

/// Faces plus the vertex color layers painted on them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub name: String,
    pub faces: Vec<Face>,
    #[serde(default)]
    pub layers: Vec<VertexColorLayer>,
    /// Layer receiving paint.
    #[serde(default)]
    pub active_layer: Option<String>,
    /// Layer shown when rendering.
    #[serde(default)]
    pub active_render_layer: Option<String>,
    /// Restrict painting to selected faces.
    #[serde(default)]
    pub use_paint_mask: bool,
}

impl Mesh {
    /// A mesh without layers.
    pub fn new(name: impl Into<String>, faces: Vec<Face>) -> Self {
        Self {
            name: name.into(),
            faces,
            layers: Vec::new(),
            active_layer: None,
            active_render_layer: None,
            use_paint_mask: false,
        }
    }

    /// Total number of face corners, i.e. the length of every layer.
    pub fn corner_count(&self) -> usize {
        self.faces.iter().map(Face::corner_count).sum()
    }

    pub fn layer(&self, name: &str) -> Option<&VertexColorLayer> {
        self.layers.iter().find(|l| l.name == name)
    }

    pub fn layer_mut(&mut self, name: &str) -> Option<&mut VertexColorLayer> {
        self.layers.iter_mut().find(|l| l.name == name)
    }

    /// Checks face sizes, layer lengths and active layer names.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found as a [`SceneError`].
    pub fn validate(&self) -> Result<(), SceneError> {
        if let Some(face) = self.faces.iter().position(|f| f.corner_count() < 3) {
            return Err(SceneError::DegenerateFace {
                mesh: self.name.clone(),
                face,
            });
        }

        let expected = self.corner_count();
        let mut seen: Vec<&str> = Vec::with_capacity(self.layers.len());
        for layer in &self.layers {
            if seen.contains(&layer.name.as_str()) {
                return Err(SceneError::DuplicateName(layer.name.clone()));
            }
            seen.push(&layer.name);
            if layer.colors.len() != expected {
                return Err(SceneError::CornerCountMismatch {
                    mesh: self.name.clone(),
                    layer: layer.name.clone(),
                    expected,
                    found: layer.colors.len(),
                });
            }
        }

        for name in [&self.active_layer, &self.active_render_layer]
            .into_iter()
            .flatten()
        {
            if self.layer(name).is_none() {
                return Err(SceneError::UnknownLayer {
                    mesh: self.name.clone(),
                    layer: name.clone(),
                });
            }
        }

        Ok(())
    }
}

impl MeshAccess for Mesh {
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn face(&self, index: usize) -> FaceInfo {
        let face = &self.faces[index];
        FaceInfo {
            vertex_count: face.corner_count(),
            material_slot: face.material_slot,
            selected: face.selected,
        }
    }

    fn set_face_selected(&mut self, index: usize, selected: bool) {
        if let Some(face) = self.faces.get_mut(index) {
            face.selected = selected;
        }
    }

    fn use_paint_mask(&self) -> bool {
        self.use_paint_mask
    }

    fn set_use_paint_mask(&mut self, enabled: bool) {
        self.use_paint_mask = enabled;
    }

    fn has_layer(&self, name: &str) -> bool {
        self.layer(name).is_some()
    }

    fn create_layer(&mut self, name: &str) {
        if self.has_layer(name) {
            return;
        }

        let colors = match self.active_layer.as_deref().and_then(|n| self.layer(n)) {
            Some(template) => template.colors.clone(),
            None => vec![LAYER_FILL; self.corner_count()],
        };
        self.layers.push(VertexColorLayer {
            name: name.to_string(),
            colors,
        });

        if self.active_layer.is_none() {
            self.active_layer = Some(name.to_string());
        }
        if self.active_render_layer.is_none() {
            self.active_render_layer = Some(name.to_string());
        }
    }

    fn remove_layer(&mut self, name: &str) -> bool {
        let Some(index) = self.layers.iter().position(|l| l.name == name) else {
            return false;
        };
        self.layers.remove(index);

        let fallback = self.layers.first().map(|l| l.name.clone());
        if self.active_layer.as_deref() == Some(name) {
            self.active_layer = fallback.clone();
        }
        if self.active_render_layer.as_deref() == Some(name) {
            self.active_render_layer = fallback;
        }
        true
    }

    fn active_layer(&self) -> Option<&str> {
        self.active_layer.as_deref()
    }

    fn set_active_layer(&mut self, name: &str) -> bool {
        if !self.has_layer(name) {
            return false;
        }
        self.active_layer = Some(name.to_string());
        true
    }

    fn active_render_layer(&self) -> Option<&str> {
        self.active_render_layer.as_deref()
    }

    fn set_active_render_layer(&mut self, name: &str) -> bool {
        if !self.has_layer(name) {
            return false;
        }
        self.active_render_layer = Some(name.to_string());
        true
    }

    fn corner_color(&self, layer: &str, corner: usize) -> Option<Srgb> {
        self.layer(layer)?.colors.get(corner).copied()
    }

    fn set_corner_color(&mut self, layer: &str, corner: usize, color: Srgb) {
        if let Some(slot) = self
            .layer_mut(layer)
            .and_then(|l| l.colors.get_mut(corner))
        {
            *slot = color;
        }
    }
}
