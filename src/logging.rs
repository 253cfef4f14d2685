use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;

const LOG_FILE_PREFIX: &str = "pipeline.log";

/// Initializes console logging on stdout and, when enabled, a daily JSON log
/// file. The returned guard must be held until exit so the file is flushed.
pub fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter.as_str()));

    let (file_layer, guard) = if prepare_log_dir(config) {
        let file_appender = tracing_appender::rolling::daily(&config.dir, LOG_FILE_PREFIX);
        let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);
        let layer = fmt::layer().json().with_writer(non_blocking_writer);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(fmt::layer().with_target(false).with_writer(std::io::stdout))
        .init();

    guard
}

/// Whether the JSON log file should be written. Creates the log directory;
/// a directory that cannot be created falls back to console-only logging.
fn prepare_log_dir(config: &LoggingConfig) -> bool {
    if !config.file {
        return false;
    }
    match fs::create_dir_all(&config.dir) {
        Ok(()) => true,
        Err(e) => {
            eprintln!(
                "file logging disabled, could not create {}: {}",
                config.dir.display(),
                e
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn config(dir: std::path::PathBuf, file: bool) -> LoggingConfig {
        LoggingConfig {
            dir,
            file,
            filter: "info".to_string(),
        }
    }

    #[test]
    fn test_disabled_file_logging_creates_nothing() {
        let root = tempdir().unwrap();
        let dir = root.path().join("logs");
        assert!(!prepare_log_dir(&config(dir.clone(), false)));
        assert!(!dir.exists());
    }

    #[test]
    fn test_unwritable_log_dir_falls_back_to_console() {
        let root = tempdir().unwrap();
        let blocker = root.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();
        assert!(!prepare_log_dir(&config(blocker.join("logs"), true)));
    }

    // The only test in this crate that installs the global subscriber.
    #[test]
    fn test_init_logging_with_file_layer() {
        let root = tempdir().unwrap();
        let dir = root.path().join("nested").join("logs");

        let guard = init_logging(&config(dir.clone(), true));

        assert!(guard.is_some());
        assert!(dir.is_dir());
        tracing::info!("file logging initialized");
    }
}
