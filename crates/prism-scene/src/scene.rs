//! Scene: materials, objects and paint tool state, persisted as RON.
//!
//! A scene file looks like this (omitted fields take their defaults):
//!
//! ```ron
//! (
//!     materials: [
//!         (name: "Red", diffuse: (0.8, 0.05, 0.05)),
//!     ],
//!     objects: [
//!         (
//!             name: "Cube",
//!             mode: VertexPaint,
//!             material_slots: [Some("Red")],
//!             mesh: Some((
//!                 name: "CubeMesh",
//!                 faces: [(vertices: [0, 1, 2, 3])],
//!             )),
//!         ),
//!     ],
//!     active_object: Some(0),
//! )
//! ```

use std::collections::HashSet;
use std::path::Path;

use prism_color::{Color, Srgb};
use prism_paint::{ObjectMode, PaletteLibrary, SceneAccess};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::SceneError;
use crate::host::SceneHost;
use crate::material::Material;
use crate::mesh::Mesh;

// ---------------------------------------------------------------------------
// Object / ToolSettings
// ---------------------------------------------------------------------------

/// A scene object; only mesh objects can be painted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Object {
    pub name: String,
    #[serde(default)]
    pub mode: ObjectMode,
    /// Material name per slot; `None` is an empty slot.
    #[serde(default)]
    pub material_slots: Vec<Option<String>>,
    #[serde(default)]
    pub mesh: Option<Mesh>,
}

impl Object {
    pub fn new(name: impl Into<String>, mesh: Option<Mesh>) -> Self {
        Self {
            name: name.into(),
            mode: ObjectMode::Object,
            material_slots: Vec::new(),
            mesh,
        }
    }
}

/// Vertex paint tool settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Brush color, sRGB-encoded as shown in a color picker.
    pub brush_color: Srgb,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            brush_color: Srgb::new(Color::WHITE),
        }
    }
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// Everything a paint session works on.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    pub materials: Vec<Material>,
    pub objects: Vec<Object>,
    pub palettes: PaletteLibrary,
    pub tool: ToolSettings,
    /// Index into `objects`.
    pub active_object: Option<usize>,
}

impl Scene {
    /// Load a scene from a RON file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError`] on I/O, parse, or validation failures.
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let contents = std::fs::read_to_string(path)?;
        let scene = Self::from_ron_str(&contents)?;
        info!(
            "Loaded scene from {} ({} objects, {} materials)",
            path.display(),
            scene.objects.len(),
            scene.materials.len()
        );
        Ok(scene)
    }

    /// Parse and validate a scene from a RON string.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError`] on parse or validation failures.
    pub fn from_ron_str(ron_str: &str) -> Result<Self, SceneError> {
        let mut scene: Scene = ron::from_str(ron_str)?;
        scene.materials = std::mem::take(&mut scene.materials)
            .into_iter()
            .map(Material::validated)
            .collect::<Result<_, _>>()?;
        scene.validate()?;
        Ok(scene)
    }

    /// Serialize the scene as pretty RON.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Serialize`] if serialization fails.
    pub fn to_ron_string(&self) -> Result<String, SceneError> {
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(6)
            .separate_tuple_members(false)
            .enumerate_arrays(false);
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    /// Write the scene to `path`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError`] on serialization or I/O failures.
    pub fn save(&self, path: &Path) -> Result<(), SceneError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_ron_string()?)?;
        debug!("Saved scene to {}", path.display());
        Ok(())
    }

    /// Checks names, material references, mesh consistency and palette
    /// names.
    ///
    /// # Errors
    ///
    /// Returns the first problem found as a [`SceneError`].
    pub fn validate(&self) -> Result<(), SceneError> {
        let mut materials = HashSet::new();
        for material in &self.materials {
            if !materials.insert(material.name.as_str()) {
                return Err(SceneError::DuplicateName(material.name.clone()));
            }
        }

        let mut objects = HashSet::new();
        for object in &self.objects {
            if !objects.insert(object.name.as_str()) {
                return Err(SceneError::DuplicateName(object.name.clone()));
            }
            for name in object.material_slots.iter().flatten() {
                if !materials.contains(name.as_str()) {
                    return Err(SceneError::UnknownMaterial {
                        object: object.name.clone(),
                        material: name.clone(),
                    });
                }
            }
            if let Some(mesh) = &object.mesh {
                mesh.validate()?;
            }
        }

        let mut palettes = HashSet::new();
        for palette in self.palettes.palettes() {
            if !palettes.insert(palette.name.as_str()) {
                return Err(SceneError::DuplicateName(palette.name.clone()));
            }
        }

        match self.active_object {
            Some(index) if index >= self.objects.len() => {
                Err(SceneError::InvalidActiveObject(index))
            }
            _ => Ok(()),
        }
    }

    /// Index of the object called `name`.
    pub fn find_object(&self, name: &str) -> Option<usize> {
        self.objects.iter().position(|o| o.name == name)
    }

    pub fn material(&self, name: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.name == name)
    }

    /// Paint view of object `index`, or `None` if it has no mesh.
    pub fn host(&mut self, index: usize) -> Option<SceneHost<'_>> {
        let Scene {
            materials,
            objects,
            palettes,
            tool,
            ..
        } = self;
        let object = objects.get_mut(index)?;
        let mesh = object.mesh.as_mut()?;
        Some(SceneHost::new(
            object.mode,
            mesh,
            &object.material_slots,
            materials,
            palettes,
            tool,
        ))
    }
}

impl SceneAccess for Scene {
    type Host<'a> = SceneHost<'a>;

    fn object_count(&self) -> usize {
        self.objects.len()
    }

    fn object_name(&self, index: usize) -> &str {
        &self.objects[index].name
    }

    fn mesh_name(&self, index: usize) -> Option<&str> {
        self.objects[index].mesh.as_ref().map(|m| m.name.as_str())
    }

    fn set_active_object(&mut self, index: usize) {
        self.active_object = Some(index);
    }

    fn object_mode(&self, index: usize) -> ObjectMode {
        self.objects[index].mode
    }

    fn set_object_mode(&mut self, index: usize, mode: ObjectMode) {
        self.objects[index].mode = mode;
    }

    fn active_host(&mut self) -> Option<SceneHost<'_>> {
        let index = self.active_object?;
        self.host(index)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
