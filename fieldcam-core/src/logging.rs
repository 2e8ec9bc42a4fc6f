//! src/logging.rs
//! ============================================================================
//! # Logging: JSON lines to a rolling file
//!
//! The terminal belongs to the UI, so every `tracing` event goes through a
//! non-blocking rolling file appender. `main` keeps the returned
//! [`WorkerGuard`] alive until exit so buffered lines are flushed.

use std::path::{Path, PathBuf};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggerConfig {
    pub log_dir: PathBuf,
    pub log_file_prefix: CompactString,
    pub log_level: CompactString,
    pub max_log_files: usize,
    pub rotation: LogRotation,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Never,
    Daily,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("./logs"),
            log_file_prefix: CompactString::const_new("fieldcam"),
            log_level: CompactString::const_new("info"),
            max_log_files: 10,
            rotation: LogRotation::Daily,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Logger already initialized")]
    AlreadyInitialized,

    #[error("Invalid log directory: {0}")]
    InvalidLogDirectory(String),

    #[error("Failed to create log directory: {0}")]
    DirectoryCreationFailed(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub struct Logger;

impl Logger {
    /// Install the global subscriber. `RUST_LOG` wins over the configured
    /// level when set.
    pub fn init(config: &LoggerConfig) -> Result<WorkerGuard, LoggingError> {
        validate_config(config)?;
        setup_log_directory(&config.log_dir)?;

        let rotation = match config.rotation {
            LogRotation::Never => Rotation::NEVER,
            LogRotation::Daily => Rotation::DAILY,
        };

        let file_appender = RollingFileAppender::builder()
            .rotation(rotation)
            .filename_prefix(config.log_file_prefix.as_str())
            .filename_suffix("jsonl")
            .max_log_files(config.max_log_files)
            .build(&config.log_dir)
            .map_err(|e| LoggingError::ConfigError(e.to_string()))?;

        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(config.log_level.as_str()))
            .map_err(|e| LoggingError::ConfigError(e.to_string()))?;

        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_writer(non_blocking)
                    .with_ansi(false)
                    .with_target(true)
                    .with_current_span(true),
            )
            .try_init()
            .map_err(|_| LoggingError::AlreadyInitialized)?;

        Ok(guard)
    }
}

fn validate_config(config: &LoggerConfig) -> Result<(), LoggingError> {
    if config.log_file_prefix.trim().is_empty() {
        return Err(LoggingError::ConfigError(
            "log_file_prefix cannot be empty".to_string(),
        ));
    }

    if config.max_log_files == 0 {
        return Err(LoggingError::ConfigError(
            "max_log_files must be at least 1".to_string(),
        ));
    }

    EnvFilter::try_new(config.log_level.as_str())
        .map_err(|e| LoggingError::ConfigError(format!("invalid log_level: {e}")))?;

    validate_log_directory(&config.log_dir)
}

fn validate_log_directory(path: &Path) -> Result<(), LoggingError> {
    if path.as_os_str().is_empty() {
        return Err(LoggingError::InvalidLogDirectory(
            "log_dir cannot be empty".to_string(),
        ));
    }

    if path.exists() && !path.is_dir() {
        return Err(LoggingError::InvalidLogDirectory(format!(
            "{} is not a directory",
            path.display()
        )));
    }

    Ok(())
}

fn setup_log_directory(log_dir: &Path) -> Result<(), LoggingError> {
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_valid() {
        let tmp = TempDir::new().unwrap();
        let config = LoggerConfig {
            log_dir: tmp.path().join("logs"),
            ..LoggerConfig::default()
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn rejects_empty_prefix_and_zero_files() {
        let mut config = LoggerConfig {
            log_file_prefix: CompactString::const_new(" "),
            ..LoggerConfig::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(LoggingError::ConfigError(_))
        ));

        config.log_file_prefix = CompactString::const_new("fieldcam");
        config.max_log_files = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_file_as_log_dir() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("not_a_dir");
        std::fs::write(&file, b"x").unwrap();

        assert!(matches!(
            validate_log_directory(&file),
            Err(LoggingError::InvalidLogDirectory(_))
        ));
    }

    #[test]
    fn setup_creates_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("a/b/logs");
        setup_log_directory(&dir).unwrap();
        assert!(dir.is_dir());
    }
}
