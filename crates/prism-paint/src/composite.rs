//! The composite pass: copy source colors into the active vertex color layer,
//! blending with what is already there, and collect palette colors.

use prism_color::{BlendMode, Linear, Srgb};
use thiserror::Error;
use tracing::{debug, warn};

use crate::host::PaintHost;
use crate::palette::PaletteKey;
use crate::source::{ColorSourceResolver, FaceSource, SourceKind};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a copy did not run. No vertex has been written when one of these is
/// returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CopyError {
    /// The active object is not a mesh in vertex paint mode.
    #[error("active object is not a mesh in vertex paint mode")]
    NotEligible,

    /// The vertex color layer named as the source does not exist.
    #[error("source vertex color layer not found: {0:?}")]
    MissingSourceLayer(String),

    /// The mesh has no active vertex color layer to write into.
    #[error("mesh has no active vertex color layer")]
    NoDestinationLayer,
}

// ---------------------------------------------------------------------------
// Request / report
// ---------------------------------------------------------------------------

/// Parameters of one copy.
#[derive(Clone, Debug, PartialEq)]
pub struct CopyRequest {
    /// Where colors come from. [`SourceKind::VertexLayer`] carries the source
    /// layer name.
    pub source: SourceKind,
    pub blend_mode: BlendMode,
    /// Blend strength, nominally in `[0.0, 1.0]`.
    pub factor: f64,
    /// Collect colors into the palette selected by `palette`.
    pub add_to_palette: bool,
    /// Flag diffuse source materials for vertex color paint.
    pub set_paint_flag: bool,
    /// Color for [`SourceKind::Uniform`]. `None` uses the brush color.
    pub uniform_color: Option<Linear>,
    pub palette: PaletteKey,
}

impl Default for CopyRequest {
    fn default() -> Self {
        Self {
            source: SourceKind::Diffuse,
            blend_mode: BlendMode::Replace,
            factor: 1.0,
            add_to_palette: false,
            set_paint_flag: false,
            uniform_color: None,
            palette: PaletteKey::ToolSlot,
        }
    }
}

/// Counters describing what a copy did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CopyReport {
    pub faces_visited: usize,
    pub faces_written: usize,
    /// Faces left alone because the paint mask excluded them.
    pub faces_masked: usize,
    /// Faces left alone because they had no source color.
    pub faces_without_source: usize,
    pub corners_written: usize,
    pub palette_colors_added: usize,
}

// ---------------------------------------------------------------------------
// copy_vertex_colors
// ---------------------------------------------------------------------------

/// Fills the active vertex color layer of `host` from `request.source`.
///
/// Faces are visited in host order. A face is skipped, and its corners left
/// untouched, when the paint mask is on and the face is not selected, or when
/// its source has no color (e.g. an empty material slot). Every corner of the
/// remaining faces is written exactly once.
///
/// # Errors
///
/// Returns [`CopyError`] before writing anything if the host is not
/// paintable, has no active layer, or lacks the named source layer.
pub fn copy_vertex_colors<H: PaintHost>(
    host: &mut H,
    request: &CopyRequest,
) -> Result<CopyReport, CopyError> {
    if !host.is_paintable() {
        return Err(CopyError::NotEligible);
    }

    let destination = host
        .active_layer()
        .ok_or(CopyError::NoDestinationLayer)?
        .to_string();

    if let Some(layer) = request.source.layer_name()
        && !host.has_layer(layer)
    {
        return Err(CopyError::MissingSourceLayer(layer.to_string()));
    }

    let mode = request.blend_mode;
    if mode.is_hsv() && request.factor != 1.0 {
        warn!(
            "{mode} blending ignores the blend factor ({})",
            request.factor
        );
    }

    let uniform = request
        .uniform_color
        .unwrap_or_else(|| host.brush_color().to_linear());
    let mut report = CopyReport::default();

    if request.add_to_palette
        && request.source == SourceKind::Uniform
        && mode != BlendMode::Replace
    {
        report.palette_colors_added +=
            blend_palette(host, &request.palette, uniform, mode, request.factor);
    } else if request.add_to_palette {
        // Make sure the palette exists even if nothing ends up in it.
        host.palette_mut(&request.palette);
    }

    let collect_faces = request.add_to_palette
        && mode == BlendMode::Replace
        && request.source.material_channel().is_some();

    let resolver = ColorSourceResolver::new(&request.source, uniform, request.set_paint_flag);
    let use_mask = host.use_paint_mask();
    let mut cursor = 0;

    for index in 0..host.face_count() {
        let face = host.face(index);
        let corners = cursor..cursor + face.vertex_count;
        cursor += face.vertex_count;
        report.faces_visited += 1;

        if use_mask && !face.selected {
            report.faces_masked += 1;
            continue;
        }

        let Some(source) = resolver.resolve(host, &face) else {
            report.faces_without_source += 1;
            continue;
        };

        let mut written = 0;
        match (mode, source) {
            (BlendMode::Replace, FaceSource::Constant(color)) => {
                let color = color.to_srgb();
                for corner in corners {
                    host.set_corner_color(&destination, corner, color);
                    written += 1;
                }
                if collect_faces && host.palette_mut(&request.palette).add(color) {
                    report.palette_colors_added += 1;
                }
            }
            (BlendMode::Replace, FaceSource::Layer(layer)) => {
                for corner in corners {
                    if let Some(color) = host.corner_color(layer, corner) {
                        host.set_corner_color(&destination, corner, color);
                        written += 1;
                    }
                }
            }
            (mode, source) => {
                for corner in corners {
                    let Some(current) = host.corner_color(&destination, corner) else {
                        continue;
                    };
                    let incoming = match source {
                        FaceSource::Constant(color) => color,
                        FaceSource::Layer(layer) => match host.corner_color(layer, corner) {
                            Some(color) => color.to_linear(),
                            None => continue,
                        },
                    };
                    let blended = mode.apply(current.to_linear(), incoming, request.factor);
                    host.set_corner_color(&destination, corner, blended.to_srgb());
                    written += 1;
                }
            }
        }

        report.faces_written += 1;
        report.corners_written += written;
    }

    if request.add_to_palette
        && request.source == SourceKind::Uniform
        && mode == BlendMode::Replace
        && report.faces_written > 0
        && host.palette_mut(&request.palette).add(uniform.to_srgb())
    {
        report.palette_colors_added += 1;
    }

    debug!(
        "Copied {} into {destination:?} with {mode}: {} of {} faces written ({} masked, {} without source), {} palette colors added",
        request.source,
        report.faces_written,
        report.faces_visited,
        report.faces_masked,
        report.faces_without_source,
        report.palette_colors_added,
    );

    Ok(report)
}

/// Blends every color already in the palette with `color` and adds the
/// results. Entries appended during the pass are not blended again.
fn blend_palette<H: PaintHost>(
    host: &mut H,
    key: &PaletteKey,
    color: Linear,
    mode: BlendMode,
    factor: f64,
) -> usize {
    let palette = host.palette_mut(key);
    let existing: Vec<Srgb> = palette.colors().to_vec();
    let mut added = 0;
    for entry in existing {
        if palette.add(mode.apply(entry.to_linear(), color, factor).to_srgb()) {
            added += 1;
        }
    }
    added
}
