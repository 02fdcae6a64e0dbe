//! Command-line argument parsing for the `prism` tool.

use std::path::PathBuf;

use clap::Parser;
use prism_color::{BlendMode, Linear};
use prism_paint::SourceKind;

use crate::Config;

/// Copy material or vertex colors into a vertex color layer.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "prism", about = "Vertex color copy and blend tool")]
pub struct CliArgs {
    /// Scene file (RON) to paint.
    pub scene: PathBuf,

    /// Write the result here instead of overwriting the scene file.
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Run the batch material transfer over every mesh object instead of a
    /// single copy.
    #[arg(long)]
    pub transfer: bool,

    /// Object to paint (defaults to the scene's active object).
    #[arg(long)]
    pub object: Option<String>,

    /// Color source: uniform, diffuse, specular, line or vcolor:<layer>.
    #[arg(long)]
    pub source: Option<SourceKind>,

    /// Copy from this vertex color layer (shorthand for --source vcolor:<layer>).
    #[arg(long, conflicts_with = "source")]
    pub source_layer: Option<String>,

    /// Blend mode, e.g. replace, mix, multiply, color-dodge.
    #[arg(long)]
    pub blend: Option<BlendMode>,

    /// Blend factor in [0, 1].
    #[arg(long)]
    pub factor: Option<f64>,

    /// Add copied colors to a palette; `--palette=NAME` names it.
    #[arg(long, require_equals = true, value_name = "NAME")]
    pub palette: Option<Option<String>>,

    /// Flag diffuse source materials for vertex color paint.
    #[arg(long)]
    pub vcpaint: bool,

    /// Uniform source color as linear "r,g,b".
    #[arg(long, value_parser = parse_color)]
    pub color: Option<Linear>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Parses `"r,g,b"` into a linear color. Channels must be finite.
pub fn parse_color(s: &str) -> Result<Linear, String> {
    let channels = s
        .split(',')
        .map(|c| c.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid color {s:?}: {e}"))?;
    match channels[..] {
        [r, g, b] if channels.iter().all(|c| c.is_finite()) => Ok(Linear::rgb(r, g, b)),
        [_, _, _] => Err(format!("invalid color {s:?}: channels must be finite")),
        _ => Err(format!("invalid color {s:?}: expected three channels r,g,b")),
    }
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref source) = args.source {
            self.copy.source = source.clone();
        }
        if let Some(ref layer) = args.source_layer {
            self.copy.source = SourceKind::VertexLayer(layer.clone());
        }
        if let Some(mode) = args.blend {
            self.copy.blend_mode = mode;
        }
        if let Some(factor) = args.factor {
            self.copy.factor = factor;
        }
        if let Some(ref palette) = args.palette {
            self.copy.add_to_palette = true;
            if palette.is_some() {
                self.copy.palette = palette.clone();
            }
        }
        if args.vcpaint {
            self.copy.set_paint_flag = true;
        }
        if let Some(color) = args.color {
            self.copy.uniform_color = Some(color);
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
