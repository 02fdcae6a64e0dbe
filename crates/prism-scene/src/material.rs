//! Scene materials and their color attributes.

use prism_color::{Color, Linear};
use prism_paint::MaterialChannel;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// MaterialError
// ---------------------------------------------------------------------------

/// Errors returned during material validation.
#[derive(Debug, Error)]
pub enum MaterialError {
    /// The material name must not be empty.
    #[error("material name must not be empty")]
    EmptyName,
}

// ---------------------------------------------------------------------------
// Material
// ---------------------------------------------------------------------------

/// A surface material as far as vertex color work is concerned.
///
/// All colors are validated and clamped via [`Material::validated`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Name referenced by object material slots.
    pub name: String,

    /// Diffuse color in linear RGB. Each component is clamped to `[0.0, 1.0]`.
    pub diffuse: Linear,

    /// Specular color in linear RGB. Each component is clamped to `[0.0, 1.0]`.
    pub specular: Linear,

    /// Line color in linear RGBA. Only the first three channels are ever
    /// copied; alpha is kept for round-tripping.
    pub line: [f64; 4],

    /// Render with vertex colors in place of the diffuse color.
    pub use_vertex_color_paint: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::from("Material"),
            diffuse: Linear::rgb(0.8, 0.8, 0.8),
            specular: Linear::rgb(1.0, 1.0, 1.0),
            line: [0.0, 0.0, 0.0, 1.0],
            use_vertex_color_paint: false,
        }
    }
}

impl Material {
    /// A default material called `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Validates and clamps all colors to `[0.0, 1.0]`.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::EmptyName`] if the name is empty.
    pub fn validated(mut self) -> Result<Self, MaterialError> {
        if self.name.is_empty() {
            return Err(MaterialError::EmptyName);
        }

        self.diffuse = self.diffuse.clamped();
        self.specular = self.specular.clamped();
        for c in &mut self.line {
            *c = c.clamp(0.0, 1.0);
        }

        Ok(self)
    }

    /// The RGB part of the line color.
    pub fn line_rgb(&self) -> Linear {
        let [r, g, b, _] = self.line;
        Linear::new(Color::new(r, g, b))
    }

    pub fn color(&self, channel: MaterialChannel) -> Linear {
        match channel {
            MaterialChannel::Diffuse => self.diffuse,
            MaterialChannel::Specular => self.specular,
            MaterialChannel::Line => self.line_rgb(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
