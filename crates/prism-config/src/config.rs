//! Configuration structs with defaults and RON persistence.

use std::path::{Path, PathBuf};

use prism_color::{BlendMode, Linear};
use prism_paint::{CopyRequest, PaletteKey, SourceKind, TransferOptions};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// `<OS config dir>/prism`, if the OS has a config dir.
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|d| d.join("prism"))
        .ok_or(ConfigError::NoConfigDir)
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Defaults for a single copy.
    pub copy: CopyConfig,
    /// Layer names for the batch transfer.
    pub transfer: TransferConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Copy settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CopyConfig {
    /// Where colors come from, e.g. `Diffuse` or `VertexLayer("Col")`.
    pub source: SourceKind,
    pub blend_mode: BlendMode,
    /// Blend strength, clamped to `[0.0, 1.0]` when a request is built.
    pub factor: f64,
    /// Collect written colors into a palette.
    pub add_to_palette: bool,
    /// Palette to collect into; `None` uses the paint tool's palette.
    pub palette: Option<String>,
    /// Flag diffuse source materials for vertex color paint.
    pub set_paint_flag: bool,
    /// Linear color for the `Uniform` source; `None` uses the brush color.
    pub uniform_color: Option<Linear>,
}

/// Batch transfer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TransferConfig {
    /// Hand-painted layer whose painted faces are masked from the diffuse
    /// pass.
    pub paint_layer: String,
    pub diffuse_layer: String,
    pub specular_layer: String,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            source: SourceKind::Diffuse,
            blend_mode: BlendMode::Replace,
            factor: 1.0,
            add_to_palette: false,
            palette: None,
            set_paint_flag: false,
            uniform_color: None,
        }
    }
}

impl Default for TransferConfig {
    fn default() -> Self {
        let options = TransferOptions::default();
        Self {
            paint_layer: options.paint_layer,
            diffuse_layer: options.diffuse_layer,
            specular_layer: options.specular_layer,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Conversion into engine parameters ---

impl CopyConfig {
    /// The engine request for these settings. An out-of-range factor is
    /// clamped, and a NaN factor falls back to `1.0`.
    pub fn to_request(&self) -> CopyRequest {
        let factor = if self.factor.is_nan() {
            log::warn!("Blend factor is NaN, using 1.0");
            1.0
        } else if !(0.0..=1.0).contains(&self.factor) {
            let clamped = self.factor.clamp(0.0, 1.0);
            log::warn!("Blend factor {} clamped to {clamped}", self.factor);
            clamped
        } else {
            self.factor
        };

        CopyRequest {
            source: self.source.clone(),
            blend_mode: self.blend_mode,
            factor,
            add_to_palette: self.add_to_palette,
            set_paint_flag: self.set_paint_flag,
            uniform_color: self.uniform_color,
            palette: self
                .palette
                .clone()
                .map_or(PaletteKey::ToolSlot, PaletteKey::Named),
        }
    }
}

impl TransferConfig {
    pub fn to_options(&self) -> TransferOptions {
        TransferOptions {
            paint_layer: self.paint_layer.clone(),
            diffuse_layer: self.diffuse_layer.clone(),
            specular_layer: self.specular_layer.clone(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(false)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path.clone(),
            source,
        })?;
        Ok(())
    }

    /// Re-reads the file: returns `Some(new_config)` if it differs from
    /// `self`, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
