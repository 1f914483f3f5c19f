//! Process-wide logging setup.
//!
//! `init` installs the `tracing` subscriber once at start-up and returns a [`LogGuard`]
//! that `app::run` holds until exit. Filtering comes from `QRGEN_LOG` (same syntax as
//! `RUST_LOG`); without it, stderr gets warnings only and a log file gets `info`.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{AppError, EXIT_IO};

pub const LOG_ENV: &str = "QRGEN_LOG";

/// Keeps the log sink alive; syncs the log file when dropped.
#[derive(Debug)]
pub struct LogGuard {
    log_file: Option<(PathBuf, File)>,
}

impl LogGuard {
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_ref().map(|(path, _)| path.as_path())
    }
}

impl Drop for LogGuard {
    fn drop(&mut self) {
        if let Some((_, file)) = &self.log_file {
            let _ = file.sync_all();
        }
    }
}

/// Install the global subscriber, writing to `log_file` when given, else stderr.
///
/// A subscriber installed earlier (e.g. by a test harness) is left in place.
pub fn init(log_file: Option<&Path>) -> Result<LogGuard, AppError> {
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| AppError::new(EXIT_IO, format!("Failed to open log file '{}': {e}", path.display())))?;
            let handle = file
                .try_clone()
                .map_err(|e| AppError::new(EXIT_IO, format!("Failed to open log file '{}': {e}", path.display())))?;

            let _ = tracing_subscriber::registry()
                .with(env_filter("info"))
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .try_init();

            Ok(LogGuard {
                log_file: Some((path.to_path_buf(), handle)),
            })
        }
        None => {
            let _ = tracing_subscriber::registry()
                .with(env_filter("warn"))
                .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
                .try_init();

            Ok(LogGuard { log_file: None })
        }
    }
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_is_created_and_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qrgen.log");

        let guard = init(Some(&path)).unwrap();

        assert!(path.exists());
        assert_eq!(guard.log_file(), Some(path.as_path()));
    }

    #[test]
    fn unopenable_log_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = init(Some(&dir.path().join("missing").join("qrgen.log"))).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_IO);
    }
}
