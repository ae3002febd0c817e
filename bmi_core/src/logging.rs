//! Logging setup for the two front-ends.
//!
//! The CLI logs to stderr so stdout stays parseable; the desktop app has no
//! terminal and appends to a log file under the data directory.

use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::Subscriber;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default log file for the desktop app: `<data_local_dir>/bmi-tracker/bmi_gui.log`
pub fn default_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bmi-tracker")
        .join("bmi_gui.log")
}

/// Stderr logging at WARN unless RUST_LOG says otherwise.
pub fn init() {
    init_with_level("warn")
}

/// Stderr logging with a specific default level
///
/// # Arguments
/// * `default_level` - Default log level (debug, info, warn, error)
///
/// This can still be overridden by RUST_LOG environment variable.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

/// Install a global subscriber that appends to `path`.
///
/// Failing to install (a subscriber is already set) is ignored.
pub fn init_file(path: &Path) {
    let _ = tracing::subscriber::set_global_default(file_subscriber(path, "info"));
}

/// Subscriber appending compact, uncoloured lines to `path`.
///
/// The file is reopened per event so it may be rotated externally; if it
/// cannot be opened the event goes to stderr instead.
pub fn file_subscriber(path: &Path, default_level: &str) -> impl Subscriber + Send + Sync {
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let path = path.to_path_buf();

    tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .compact()
            .with_ansi(false)
            .with_writer(move || -> Box<dyn Write + Send> {
                match std::fs::File::options().create(true).append(true).open(&path) {
                    Ok(f) => Box::new(f),
                    Err(_) => Box::new(std::io::stderr()),
                }
            }),
    )
}

/// Initialize logging for testing (captures logs for test output)
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_subscriber_appends_to_log() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("logs").join("bmi_gui.log");

        tracing::subscriber::with_default(file_subscriber(&log_path, "info"), || {
            tracing::warn!("recorded bmi 21.6");
        });

        let contents = std::fs::read_to_string(&log_path).unwrap();
        assert!(contents.contains("recorded bmi 21.6"));
        assert!(!contents.contains('\x1b'));
    }

    #[test]
    fn test_default_log_path() {
        assert!(default_log_path().ends_with("bmi-tracker/bmi_gui.log"));
    }
}
