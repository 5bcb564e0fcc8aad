// ============================================
// src/logging.rs
// File logging (the terminal belongs to the game)
// ============================================

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE_PREFIX: &str = "wortblitz.log";

/// Keeps the background log writer alive; drop it last.
pub struct LogGuard {
    _guard: WorkerGuard,
}

/// Send `tracing` output to a daily log file in `log_dir`.
/// `RUST_LOG` wins over `level` when set.
///
/// Logging is optional: if the file can't be set up, a warning goes to
/// stderr and the game runs without logs (`None`).
pub fn init(log_dir: &Path, level: &str) -> Option<LogGuard> {
    let appender = match open_log_file(log_dir) {
        Ok(appender) => appender,
        Err(err) => {
            eprintln!("warning: file logging disabled: {err:#}");
            return None;
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init();
    if let Err(err) = installed {
        eprintln!("warning: file logging disabled: {err}");
        return None;
    }

    Some(LogGuard { _guard: guard })
}

fn open_log_file(log_dir: &Path) -> Result<RollingFileAppender> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(log_dir)
        .with_context(|| format!("failed to open log file in {}", log_dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_dir_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("logs");
        fs::write(&blocker, b"not a directory").unwrap();

        assert!(open_log_file(&blocker).is_err());
        assert!(init(&blocker, "info").is_none());
    }

    #[test]
    fn test_log_file_path_taken_by_directory() {
        let dir = tempfile::tempdir().unwrap();
        // daily files are named `<prefix>.<UTC date>`
        let today = chrono::Utc::now().format("%Y-%m-%d");
        fs::create_dir_all(dir.path().join(format!("{LOG_FILE_PREFIX}.{today}"))).unwrap();

        assert!(open_log_file(dir.path()).is_err());
        assert!(init(dir.path(), "info").is_none());
    }

    #[test]
    fn test_opens_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let logs = dir.path().join("nested").join("logs");

        assert!(open_log_file(&logs).is_ok());
        assert!(logs.is_dir());
    }
}
