//! `prism`: copy material colors, a uniform color or another vertex color
//! layer into a vertex color layer of a RON scene.

mod error;
mod platform;
mod run;

use std::process::ExitCode;

use clap::Parser;
use prism_config::{CliArgs, Config};
use tracing::error;

use crate::platform::PlatformDirs;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let dirs = match PlatformDirs::resolve(args.config.as_deref()) {
        Ok(dirs) => dirs,
        Err(e) => {
            eprintln!("prism: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&dirs.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    prism_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));

    match run::run(&args, &config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
