//! Where `prism` keeps its config and log files.

use std::path::{Path, PathBuf};

use prism_config::{ConfigError, default_config_dir};

/// Config and log directories for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDirs {
    /// Holds `config.ron`.
    pub config_dir: PathBuf,
    /// Holds `prism.log` in debug builds.
    pub log_dir: PathBuf,
}

impl PlatformDirs {
    /// Uses `config_override` (from `--config`) if given, otherwise the OS
    /// config directory. Nothing is created on disk.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoConfigDir`] if there is no override and the
    /// OS does not expose a configuration directory.
    pub fn resolve(config_override: Option<&Path>) -> Result<Self, ConfigError> {
        let config_dir = match config_override {
            Some(dir) => dir.to_path_buf(),
            None => default_config_dir()?,
        };
        Ok(Self {
            log_dir: config_dir.join("logs"),
            config_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_is_used_verbatim() {
        let root = Path::new("/tmp/prism-test");
        let dirs = PlatformDirs::resolve(Some(root)).unwrap();
        assert_eq!(dirs.config_dir, root);
        assert_eq!(dirs.log_dir, root.join("logs"));
    }

    #[test]
    fn test_default_lives_under_prism() {
        if let Ok(dirs) = PlatformDirs::resolve(None) {
            assert!(dirs.config_dir.ends_with("prism"));
            assert!(dirs.log_dir.starts_with(&dirs.config_dir));
        }
    }
}
