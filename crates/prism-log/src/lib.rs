//! Logging setup for Prism.
//!
//! Library crates only emit `tracing` events (and `log` records, which the
//! subscriber bridges). The binary calls [`init_logging`] once to print them
//! to the console and, in debug builds, to a JSON file.

use std::path::{Path, PathBuf};

use prism_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config sets a level.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log file written in debug builds.
pub const LOG_FILE_NAME: &str = "prism.log";

/// Initialize the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` if set, otherwise from
/// `config.debug.log_level`, otherwise [`DEFAULT_FILTER`]. Console output
/// carries uptime timestamps and module paths. With `debug_build` and a
/// `log_dir`, events are also written as JSON to [`LOG_FILE_NAME`] there.
///
/// Returns the path of the log file if one was opened.
///
/// # Examples
///
/// ```no_run
/// use prism_config::Config;
/// use prism_log::init_logging;
///
/// let config = Config::default();
/// init_logging(Some(std::path::Path::new("./logs")), true, Some(&config));
/// ```
pub fn init_logging(
    log_dir: Option<&Path>,
    debug_build: bool,
    config: Option<&Config>,
) -> Option<PathBuf> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(config)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE_NAME))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return Some(log_dir.join(LOG_FILE_NAME));
    }

    subscriber.init();
    None
}

/// Filter directives taken from the config, or [`DEFAULT_FILTER`] when the
/// config is absent or its level is blank.
pub fn filter_directives(config: Option<&Config>) -> String {
    config
        .map(|c| c.debug.log_level.trim())
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// `EnvFilter` for [`DEFAULT_FILTER`].
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}
