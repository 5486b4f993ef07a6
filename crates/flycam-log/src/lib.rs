//! Structured logging for flycam.
//!
//! Console output with uptime timestamps and module targets, filtered by
//! `RUST_LOG` or the configured level. Debug builds can additionally write a
//! JSON log file for inspecting a session after the fact.

use flycam_config::DebugConfig;
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config names a level.
pub const DEFAULT_FILTER: &str = "info,winit=warn";

/// Name of the JSON log file written in debug builds.
pub const LOG_FILE_NAME: &str = "flycam.log";

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins over `debug.log_level`, which wins over [`DEFAULT_FILTER`].
/// When `json_file` is set and `log_dir` is writable, a JSON file layer is
/// added. Calling this twice is harmless; the second call is ignored.
///
/// ```no_run
/// use flycam_config::DebugConfig;
///
/// flycam_log::init_logging(None, false, &DebugConfig::default());
/// ```
pub fn init_logging(log_dir: Option<&Path>, json_file: bool, debug: &DebugConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(debug)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if json_file
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_file_path(log_dir))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        let _ = subscriber.with(file_layer).try_init();
        return;
    }

    let _ = subscriber.try_init();
}

/// Filter directives derived from the config, falling back to [`DEFAULT_FILTER`].
#[must_use]
pub fn filter_directives(debug: &DebugConfig) -> String {
    let level = debug.log_level.trim();
    if level.is_empty() {
        DEFAULT_FILTER.to_string()
    } else {
        level.to_string()
    }
}

/// Location of the JSON log file inside `log_dir`.
#[must_use]
pub fn log_file_path(log_dir: &Path) -> PathBuf {
    log_dir.join(LOG_FILE_NAME)
}
