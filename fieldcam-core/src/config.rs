//! src/config.rs
//! ============================================================================
//! # Config: Application Configuration Loader and Saver
//!
//! Loads and saves settings as TOML from the platform config path using the
//! [`directories`](https://docs.rs/directories) crate. A missing file is
//! created with defaults on first start.
//!
//! ## Example
//! ```rust,ignore
//! let config = Config::load().await?;
//! let base = config.base_path()?;
//! ```

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use tokio::fs as TokioFs;

use crate::error::AppError;
use crate::logging::LoggerConfig;

/// Environment override for [`Config::base_dir`].
pub const BASE_DIR_ENV: &str = "FIELDCAM_BASE_DIR";

/// External capture program. The image is read from its stdout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CameraConfig {
    pub program: Option<String>,

    pub args: Vec<String>,

    /// A capture still running after this long is killed.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            program: Some("fswebcam".to_string()),
            args: ["--no-banner", "--png", "0", "-"]
                .into_iter()
                .map(String::from)
                .collect(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Main configuration struct for the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the managed tree. Defaults to
    /// `<data dir>/main_directory/directory`.
    pub base_dir: Option<PathBuf>,

    /// Prefix of the numbered entries made by "New entrance".
    pub entrance_prefix: String,

    /// Lifetime of info/success notifications.
    #[serde(with = "humantime_serde")]
    pub notification_timeout: Duration,

    pub camera: CameraConfig,

    pub logging: LoggerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: None,
            entrance_prefix: "entrance".to_string(),
            notification_timeout: Duration::from_secs(3),
            camera: CameraConfig::default(),
            logging: LoggerConfig::default(),
        }
    }
}

impl Config {
    /// Loads config from the platform config dir, or writes and returns
    /// defaults when there is none yet.
    pub async fn load() -> anyhow::Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            info!("Loading config from {}", path.display());
            Ok(Self::load_from(&path).await?)
        } else {
            info!(
                "No config file found at {}, using default configuration. Creating it now.",
                path.display()
            );

            let default_config = Self::default();
            default_config.save_to(&path).await?;

            Ok(default_config)
        }
    }

    /// Parse a specific TOML file.
    pub async fn load_from(path: &Path) -> Result<Self, AppError> {
        let text = TokioFs::read_to_string(path)
            .await
            .map_err(|source| AppError::ConfigIo {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(toml::from_str(&text)?)
    }

    /// Writes the config as pretty TOML, creating parent folders.
    pub async fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        info!("Saving config to {}", path.display());

        if let Some(parent) = path.parent() {
            TokioFs::create_dir_all(parent).await?;
        }

        let toml_str = toml::to_string_pretty(self)?;
        TokioFs::write(path, toml_str).await?;

        Ok(())
    }

    /// Resolved base path: env override, then config, then the data-dir
    /// default.
    pub fn base_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(dir) = std::env::var_os(BASE_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(dir));
        }
        if let Some(dir) = &self.base_dir {
            return Ok(dir.clone());
        }
        Ok(Self::project_dirs()?
            .data_dir()
            .join("main_directory")
            .join("directory"))
    }

    /// Returns the canonical config file path using `directories::ProjectDirs`.
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    fn project_dirs() -> anyhow::Result<ProjectDirs> {
        ProjectDirs::from("org", "fieldcam", "fieldcam")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn save_and_load_roundtrip_keeps_fields() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/config.toml");

        let config = Config {
            base_dir: Some(tmp.path().join("survey")),
            entrance_prefix: "unit".to_string(),
            notification_timeout: Duration::from_millis(1500),
            ..Config::default()
        };
        config.save_to(&path).await.unwrap();

        let loaded = Config::load_from(&path).await.unwrap();
        assert_eq!(loaded.base_dir, Some(tmp.path().join("survey")));
        assert_eq!(loaded.entrance_prefix, "unit");
        assert_eq!(loaded.notification_timeout, Duration::from_millis(1500));
        assert_eq!(loaded.camera, CameraConfig::default());
    }

    #[tokio::test]
    async fn partial_file_falls_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        TokioFs::write(
            &path,
            "entrance_prefix = \"podezd\"\nnotification_timeout = \"5s\"\n[camera]\ntimeout = \"2s 500ms\"\n",
        )
        .await
        .unwrap();

        let loaded = Config::load_from(&path).await.unwrap();
        assert_eq!(loaded.entrance_prefix, "podezd");
        assert_eq!(loaded.notification_timeout, Duration::from_secs(5));
        assert!(loaded.base_dir.is_none());
        assert_eq!(loaded.camera.program.as_deref(), Some("fswebcam"));
        assert_eq!(loaded.camera.timeout, Duration::from_millis(2500));
    }

    #[tokio::test]
    async fn broken_toml_is_a_config_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        TokioFs::write(&path, "entrance_prefix = [").await.unwrap();

        assert!(matches!(
            Config::load_from(&path).await,
            Err(AppError::Config(_))
        ));
    }

    #[tokio::test]
    async fn missing_file_is_a_config_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = Config::load_from(&tmp.path().join("nope.toml"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ConfigIo { .. }));
        assert!(err.is_not_found());
    }
}
