//! Where source colors come from: a uniform color, a material attribute of
//! the face's material, or another vertex color layer.

use std::fmt;
use std::str::FromStr;

use prism_color::Linear;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::host::{FaceInfo, MaterialAccess, MaterialChannel, MaterialHandle};

/// The kind of color copied into the destination layer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    /// One configured color for every face.
    Uniform,
    /// Diffuse color of the face's material.
    #[default]
    Diffuse,
    /// Specular color of the face's material.
    Specular,
    /// Line color of the face's material.
    Line,
    /// Per-corner colors of the named vertex color layer.
    VertexLayer(String),
}

impl SourceKind {
    /// The material attribute read by this kind, if any.
    pub fn material_channel(&self) -> Option<MaterialChannel> {
        match self {
            Self::Diffuse => Some(MaterialChannel::Diffuse),
            Self::Specular => Some(MaterialChannel::Specular),
            Self::Line => Some(MaterialChannel::Line),
            Self::Uniform | Self::VertexLayer(_) => None,
        }
    }

    pub fn layer_name(&self) -> Option<&str> {
        match self {
            Self::VertexLayer(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uniform => f.write_str("UNIFORM"),
            Self::Diffuse => f.write_str("DIFFUSE"),
            Self::Specular => f.write_str("SPECULAR"),
            Self::Line => f.write_str("LINE"),
            Self::VertexLayer(name) => write!(f, "VCOLOR:{name}"),
        }
    }
}

/// Returned when a string names no source kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown color source: {0:?} (expected uniform, diffuse, specular, line or vcolor:<layer>)")]
pub struct ParseSourceError(pub String);

impl FromStr for SourceKind {
    type Err = ParseSourceError;

    /// `uniform`, `diffuse`, `specular`, `line`, or `vcolor:<layer>`
    /// (`layer:<name>` is accepted too). Keywords are case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((kind, layer)) = s.split_once(':') {
            return match kind.to_ascii_lowercase().as_str() {
                "vcolor" | "layer" => Ok(Self::VertexLayer(layer.to_string())),
                _ => Err(ParseSourceError(s.to_string())),
            };
        }
        match s.to_ascii_lowercase().as_str() {
            "uniform" => Ok(Self::Uniform),
            "diffuse" => Ok(Self::Diffuse),
            "specular" => Ok(Self::Specular),
            "line" => Ok(Self::Line),
            _ => Err(ParseSourceError(s.to_string())),
        }
    }
}

/// Source resolved for one face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FaceSource<'a> {
    /// One linear color for every corner of the face.
    Constant(Linear),
    /// Corner colors are read from this layer at the same corner index.
    Layer(&'a str),
}

/// Resolves the source color of each face.
#[derive(Clone, Debug)]
pub struct ColorSourceResolver<'a> {
    kind: &'a SourceKind,
    uniform: Linear,
    set_paint_flag: bool,
}

impl<'a> ColorSourceResolver<'a> {
    /// `uniform` is used for [`SourceKind::Uniform`]. With `set_paint_flag`,
    /// resolving a diffuse color also flags its material for vertex color
    /// paint.
    pub fn new(kind: &'a SourceKind, uniform: Linear, set_paint_flag: bool) -> Self {
        Self {
            kind,
            uniform,
            set_paint_flag,
        }
    }

    /// Source for `face`, or `None` if the face has no usable material.
    ///
    /// Not pure: see [`mark_vertex_color_paint`].
    pub fn resolve<H: MaterialAccess>(
        &self,
        host: &mut H,
        face: &FaceInfo,
    ) -> Option<FaceSource<'a>> {
        match self.kind {
            SourceKind::Uniform => Some(FaceSource::Constant(self.uniform)),
            SourceKind::VertexLayer(name) => Some(FaceSource::Layer(name)),
            kind => {
                let channel = kind.material_channel()?;
                let material = host.slot_material(face.material_slot)?;
                let color = host.material_color(material, channel);
                if self.set_paint_flag && channel == MaterialChannel::Diffuse {
                    mark_vertex_color_paint(host, material);
                }
                Some(FaceSource::Constant(color))
            }
        }
    }
}

/// Side effect of resolving a diffuse color with the paint flag requested:
/// the source material is switched to vertex color paint so the copied
/// colors show up when it is rendered.
pub fn mark_vertex_color_paint<H: MaterialAccess>(host: &mut H, material: MaterialHandle) {
    host.set_vertex_color_paint(material, true);
}
