//! Platform directories and application-level errors.

use std::path::{Path, PathBuf};

use flycam_camera::SettingsError;
use flycam_config::ConfigError;

/// Errors that stop the application before or while it runs.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The OS did not provide a configuration directory.
    #[error("could not determine OS configuration directory")]
    NoConfigDir,
    #[error("failed to create {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid camera settings: {0}")]
    Camera(#[from] SettingsError),
    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

const APP_NAME: &str = "flycam";

/// Where configuration and logs live on this OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDirs {
    /// Holds `config.ron`.
    pub config_dir: PathBuf,
    /// Holds the JSON log written by debug builds.
    pub log_dir: PathBuf,
}

impl PlatformDirs {
    /// Resolve OS conventions (XDG on Linux, Known Folders on Windows,
    /// Library on macOS) without touching the disk.
    pub fn resolve() -> Result<Self, AppError> {
        let config_base = dirs::config_dir().ok_or(AppError::NoConfigDir)?;
        let app_dir = config_base.join(APP_NAME);
        let log_dir = dirs::data_local_dir()
            .map(|d| d.join(APP_NAME))
            .unwrap_or_else(|| app_dir.clone())
            .join("logs");
        Ok(Self {
            config_dir: app_dir,
            log_dir,
        })
    }

    /// Directories rooted under `root`, for tests and portable installs.
    pub fn with_root(root: &Path) -> Self {
        let app_dir = root.join(APP_NAME);
        Self {
            config_dir: app_dir.join("config"),
            log_dir: app_dir.join("logs"),
        }
    }

    /// Replaces the config directory, e.g. from `--config`.
    #[must_use]
    pub fn with_config_dir(mut self, config_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = config_dir {
            self.config_dir = dir;
        }
        self
    }

    /// Create both directories on disk.
    pub fn create_dirs(&self) -> Result<(), AppError> {
        for dir in [&self.config_dir, &self.log_dir] {
            std::fs::create_dir_all(dir).map_err(|source| AppError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(())
    }
}
