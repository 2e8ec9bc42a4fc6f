//! src/error.rs
//! ============================================================================
//! # `AppError`: Unified Error Type for fieldcam
//!
//! Every user-triggered operation returns `Result<T, AppError>`. The action
//! dispatcher catches these at the point of the action and turns them into
//! an error notification; none of them are fatal.

use std::{io, path::PathBuf};
use thiserror::Error;

/// Convenient alias carrying the unified error type.
pub type AppResult<T> = Result<T, AppError>;

/// Unified error type for navigator, camera and config operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// A filesystem call failed (permission denied, vanished path, disk full).
    #[error("Filesystem operation '{operation}' failed on {path:?}: {source}")]
    Filesystem {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// User input rejected before touching the filesystem.
    #[error("Invalid input: {field} - {message}")]
    Validation { field: String, message: String },

    /// Camera unavailable or the capture produced nothing usable.
    #[error("Capture failed: {0}")]
    Capture(String),

    /// A location could not be entered (usually not a directory).
    #[error("Navigation failed: cannot open {path:?}: {reason}")]
    Navigation { path: PathBuf, reason: String },

    /// TOML config parsing error.
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// Config file I/O error with path.
    #[error("Failed to read config file {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AppError {
    /// Create a filesystem failure error
    pub fn filesystem<P: Into<PathBuf>>(operation: &'static str, path: P, source: io::Error) -> Self {
        Self::Filesystem {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Create an input validation error
    pub fn validation<S1: Into<String>, S2: Into<String>>(field: S1, message: S2) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a navigation failure error
    pub fn navigation<P: Into<PathBuf>, S: Into<String>>(path: P, reason: S) -> Self {
        Self::Navigation {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a capture failure error
    pub fn capture<S: Into<String>>(reason: S) -> Self {
        Self::Capture(reason.into())
    }

    /// True when the underlying cause is a missing path.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Filesystem { source, .. } | Self::ConfigIo { source, .. } => {
                source.kind() == io::ErrorKind::NotFound
            }
            _ => false,
        }
    }

    /// Short, human-readable text for the notification popup.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Filesystem {
                operation,
                path,
                source,
            } => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                let reason = match source.kind() {
                    io::ErrorKind::PermissionDenied => "permission denied".to_string(),
                    io::ErrorKind::NotFound => "no longer exists".to_string(),
                    _ => source.to_string(),
                };
                format!("Could not {operation} '{name}': {reason}")
            }
            Self::Validation { message, .. } => message.clone(),
            Self::Capture(reason) => format!("Could not take photo: {reason}"),
            Self::Navigation { path, reason } => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                format!("Cannot open '{name}': {reason}")
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_is_shown_verbatim() {
        let err = AppError::validation("name", "Enter a home name");
        assert_eq!(err.user_message(), "Enter a home name");
        assert_eq!(err.to_string(), "Invalid input: name - Enter a home name");
    }

    #[test]
    fn filesystem_message_names_the_entry() {
        let err = AppError::filesystem(
            "delete",
            "/base/home1/entrance2",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(
            err.user_message(),
            "Could not delete 'entrance2': permission denied"
        );
        assert!(!err.is_not_found());
    }

    #[test]
    fn not_found_is_detected() {
        let err = AppError::filesystem(
            "list",
            "/gone",
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.is_not_found());
    }
}
