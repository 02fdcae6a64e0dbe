//! Configuration system for Prism.
//!
//! Default copy and transfer settings persist to disk as `config.ron`. CLI
//! arguments override them per run, and unknown or missing fields keep old
//! and new config files loadable.

mod cli;
mod config;
mod error;

pub use cli::{CliArgs, parse_color};
pub use config::{Config, CopyConfig, DebugConfig, TransferConfig, default_config_dir};
pub use error::ConfigError;
