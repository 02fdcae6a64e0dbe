//! Batch transfer of material colors into per-mesh vertex color layers.
//!
//! For every mesh object the diffuse colors land in one layer and the
//! specular colors in another, and each mesh collects its material colors in
//! a palette named after it. Faces already painted in the paint layer are
//! masked out of the diffuse pass.

use prism_color::Srgb;
use tracing::info;

use crate::composite::{CopyError, CopyReport, CopyRequest, copy_vertex_colors};
use crate::host::{MeshAccess, ObjectMode, PaintHost, SceneAccess};
use crate::palette::PaletteKey;
use crate::source::SourceKind;

/// Layer names used by [`transfer_material_colors`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferOptions {
    /// Hand-painted layer whose non-white faces are kept out of the diffuse
    /// pass.
    pub paint_layer: String,
    /// Receives material diffuse colors; becomes active and render layer.
    pub diffuse_layer: String,
    /// Receives material specular colors.
    pub specular_layer: String,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            paint_layer: "Col".to_string(),
            diffuse_layer: "Diffuse".to_string(),
            specular_layer: "Specular".to_string(),
        }
    }
}

/// Outcome for one mesh object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferReport {
    pub object: String,
    pub mesh: String,
    /// Faces found already painted in the paint layer.
    pub painted_faces: usize,
    pub diffuse: CopyReport,
    pub specular: CopyReport,
}

/// Runs the diffuse and specular transfer over every mesh object of `scene`.
///
/// Each object is made active and put in vertex paint mode for the duration
/// of its transfer, then returned to its previous mode. Objects without a
/// mesh are skipped.
///
/// # Errors
///
/// Stops at the first [`CopyError`]; objects processed before it keep their
/// new layers.
pub fn transfer_material_colors<S: SceneAccess>(
    scene: &mut S,
    options: &TransferOptions,
) -> Result<Vec<TransferReport>, CopyError> {
    let mut reports = Vec::new();

    for index in 0..scene.object_count() {
        let Some(mesh) = scene.mesh_name(index).map(str::to_string) else {
            continue;
        };
        let object = scene.object_name(index).to_string();

        scene.set_active_object(index);
        let saved_mode = scene.object_mode(index);
        scene.set_object_mode(index, ObjectMode::VertexPaint);

        let result = match scene.active_host() {
            Some(mut host) => transfer_mesh(&mut host, &mesh, options),
            None => Err(CopyError::NotEligible),
        };

        scene.set_object_mode(index, saved_mode);
        let (painted_faces, diffuse, specular) = result?;

        info!(
            "Transferred material colors for {object:?}: {} diffuse and {} specular faces, {} painted faces kept",
            diffuse.faces_written, specular.faces_written, painted_faces
        );

        reports.push(TransferReport {
            object,
            mesh,
            painted_faces,
            diffuse,
            specular,
        });
    }

    Ok(reports)
}

fn transfer_mesh<H: PaintHost>(
    host: &mut H,
    mesh: &str,
    options: &TransferOptions,
) -> Result<(usize, CopyReport, CopyReport), CopyError> {
    let painted_faces = mask_painted_faces(host, &options.paint_layer);

    host.assign_tool_palette(mesh);
    let palette = PaletteKey::Named(mesh.to_string());

    replace_layer(host, &options.diffuse_layer);
    host.set_active_layer(&options.diffuse_layer);
    let diffuse = copy_vertex_colors(
        host,
        &CopyRequest {
            source: SourceKind::Diffuse,
            add_to_palette: true,
            set_paint_flag: true,
            palette: palette.clone(),
            ..CopyRequest::default()
        },
    )?;

    replace_layer(host, &options.specular_layer);
    host.set_use_paint_mask(false);
    host.set_active_layer(&options.specular_layer);
    let specular = copy_vertex_colors(
        host,
        &CopyRequest {
            source: SourceKind::Specular,
            add_to_palette: true,
            palette,
            ..CopyRequest::default()
        },
    )?;

    if host.set_active_layer(&options.diffuse_layer) {
        host.set_active_render_layer(&options.diffuse_layer);
    }

    Ok((painted_faces, diffuse, specular))
}

/// Selects the faces whose corners are all white in `layer` and turns the
/// paint mask on if any face was painted. Without such a layer the mask is
/// turned off. Returns the number of painted faces.
fn mask_painted_faces<H: MeshAccess>(host: &mut H, layer: &str) -> usize {
    host.set_use_paint_mask(false);
    if !host.set_active_layer(layer) {
        return 0;
    }

    let white = Srgb::rgb(1.0, 1.0, 1.0);
    let mut painted = 0;
    let mut cursor = 0;
    for index in 0..host.face_count() {
        let count = host.face(index).vertex_count;
        let untouched =
            (cursor..cursor + count).all(|corner| host.corner_color(layer, corner) == Some(white));
        host.set_face_selected(index, untouched);
        if !untouched {
            painted += 1;
        }
        cursor += count;
    }

    host.set_use_paint_mask(painted > 0);
    painted
}

/// Removes `name` if present and creates it again from the active layer.
fn replace_layer<H: MeshAccess>(host: &mut H, name: &str) {
    host.remove_layer(name);
    host.create_layer(name);
}
