//! One `prism` invocation: load the scene, paint, save.

use std::path::PathBuf;

use prism_config::{CliArgs, Config};
use prism_paint::{copy_vertex_colors, transfer_material_colors};
use prism_scene::Scene;
use tracing::info;

use crate::error::AppError;

/// Runs the copy (or, with `--transfer`, the batch transfer) described by
/// `args` and `config`, and writes the scene. Returns the path written.
pub fn run(args: &CliArgs, config: &Config) -> Result<PathBuf, AppError> {
    let mut scene = Scene::load(&args.scene)?;

    if args.transfer {
        let reports = transfer_material_colors(&mut scene, &config.transfer.to_options())?;
        info!("Transferred material colors for {} meshes", reports.len());
    } else {
        let index = select_object(&mut scene, args.object.as_deref())?;
        let name = scene.objects[index].name.clone();
        let mut host = scene
            .host(index)
            .ok_or_else(|| AppError::NotAMesh(name.clone()))?;
        let request = config.copy.to_request();
        let report = copy_vertex_colors(&mut host, &request)?;
        info!(
            "Painted {name:?} from {} with {}: {} faces, {} corners, {} palette colors added",
            request.source,
            request.blend_mode,
            report.faces_written,
            report.corners_written,
            report.palette_colors_added
        );
    }

    let output = args.output.clone().unwrap_or_else(|| args.scene.clone());
    scene.save(&output)?;
    info!("Wrote {}", output.display());
    Ok(output)
}

/// Index of the object to paint. A named object also becomes the active one.
fn select_object(scene: &mut Scene, name: Option<&str>) -> Result<usize, AppError> {
    match name {
        Some(name) => {
            let index = scene
                .find_object(name)
                .ok_or_else(|| AppError::UnknownObject(name.to_string()))?;
            scene.active_object = Some(index);
            Ok(index)
        }
        None => scene.active_object.ok_or(AppError::NoActiveObject),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::Parser;
    use prism_paint::{CopyError, ObjectMode};

    use super::*;

    const SCENE: &str = r#"(
        materials: [
            (name: "Red", diffuse: (1.0, 0.0, 0.0)),
            (name: "Gray", diffuse: (0.2, 0.2, 0.2), specular: (0.5, 0.5, 0.5)),
        ],
        objects: [
            (
                name: "Cube",
                mode: VertexPaint,
                material_slots: [Some("Red"), Some("Gray")],
                mesh: Some((
                    name: "CubeMesh",
                    faces: [
                        (vertices: [0, 1, 2, 3]),
                        (vertices: [4, 5, 6], material_slot: 1),
                    ],
                    layers: [
                        (name: "Col", colors: [
                            (1.0, 1.0, 1.0), (1.0, 1.0, 1.0), (1.0, 1.0, 1.0), (1.0, 1.0, 1.0),
                            (1.0, 1.0, 1.0), (1.0, 1.0, 1.0), (1.0, 1.0, 1.0),
                        ]),
                    ],
                    active_layer: Some("Col"),
                    active_render_layer: Some("Col"),
                )),
            ),
            (name: "Lamp"),
        ],
    )"#;

    fn write_scene(dir: &Path) -> PathBuf {
        let path = dir.join("scene.ron");
        std::fs::write(&path, SCENE).unwrap();
        path
    }

    fn args(scene: &Path, extra: &[&str]) -> CliArgs {
        let scene = scene.to_string_lossy().into_owned();
        CliArgs::try_parse_from(
            ["prism", scene.as_str()]
                .into_iter()
                .chain(extra.iter().copied()),
        )
        .unwrap()
    }

    fn configured(args: &CliArgs) -> Config {
        let mut config = Config::default();
        config.apply_cli_overrides(args);
        config
    }

    #[test]
    fn test_copy_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_scene(dir.path());
        let out = dir.path().join("out.ron");
        let out_arg = out.to_string_lossy().into_owned();
        let args = args(&path, &["--object", "Cube", "--palette", "-o", out_arg.as_str()]);

        let written = run(&args, &configured(&args)).unwrap();
        assert_eq!(written, out);

        let scene = Scene::load(&out).unwrap();
        let mesh = scene.objects[0].mesh.as_ref().unwrap();
        let red = mesh.layer("Col").unwrap().colors[0].color();
        assert!((red.r() - 1.0).abs() < 1e-9 && red.g() == 0.0, "{red}");
        assert_eq!(scene.palettes.get("Palette").map(|p| p.len()), Some(2));
        assert_eq!(scene.active_object, Some(0));

        // The input is left alone when --output is given.
        assert_eq!(std::fs::read_to_string(&path).unwrap(), SCENE);
    }

    #[test]
    fn test_copy_in_place_with_blend() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_scene(dir.path());
        let args = args(
            &path,
            &["--object", "Cube", "--blend", "multiply", "--source", "diffuse"],
        );

        run(&args, &configured(&args)).unwrap();

        let scene = Scene::load(&path).unwrap();
        let col = &scene.objects[0].mesh.as_ref().unwrap().layer("Col").unwrap().colors;
        // White times gray is gray.
        let gray = col[4].to_linear().color();
        assert!((gray.r() - 0.2).abs() < 1e-9, "{gray}");
    }

    #[test]
    fn test_transfer_creates_layers() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_scene(dir.path());
        let args = args(&path, &["--transfer"]);

        run(&args, &configured(&args)).unwrap();

        let scene = Scene::load(&path).unwrap();
        let mesh = scene.objects[0].mesh.as_ref().unwrap();
        assert!(mesh.layer("Diffuse").is_some());
        assert!(mesh.layer("Specular").is_some());
        assert_eq!(mesh.active_render_layer.as_deref(), Some("Diffuse"));
        assert_eq!(scene.objects[0].mode, ObjectMode::VertexPaint);
        assert!(scene.palettes.get("CubeMesh").is_some());
    }

    #[test]
    fn test_missing_active_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_scene(dir.path());
        let args = args(&path, &[]);
        assert!(matches!(
            run(&args, &configured(&args)),
            Err(AppError::NoActiveObject)
        ));
    }

    #[test]
    fn test_unknown_and_meshless_objects() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_scene(dir.path());

        let args_unknown = args(&path, &["--object", "Sphere"]);
        assert!(matches!(
            run(&args_unknown, &configured(&args_unknown)),
            Err(AppError::UnknownObject(name)) if name == "Sphere"
        ));

        let args_lamp = args(&path, &["--object", "Lamp"]);
        assert!(matches!(
            run(&args_lamp, &configured(&args_lamp)),
            Err(AppError::NotAMesh(name)) if name == "Lamp"
        ));
    }

    #[test]
    fn test_missing_source_layer_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_scene(dir.path());
        let args = args(&path, &["--object", "Cube", "--source-layer", "Paint"]);

        let result = run(&args, &configured(&args));
        assert!(matches!(
            result,
            Err(AppError::Copy(CopyError::MissingSourceLayer(_)))
        ));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), SCENE);
    }
}
