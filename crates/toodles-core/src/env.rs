//! Application directory discovery.

use crate::{Error, Result};
use directories::BaseDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Dot-directory created in the user's home directory.
pub const APP_DIR_NAME: &str = ".toodles";
/// SQLite database file inside the application directory.
pub const STORAGE_FILE_NAME: &str = "toodles.sqlite";
/// Optional configuration file inside the application directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Locations toodles reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppEnv {
    app_dir: PathBuf,
}

impl AppEnv {
    /// Resolve the application directory and make sure it exists.
    ///
    /// `TOODLES_HOME` overrides the location (used by tests and portable
    /// installs); otherwise the directory is `~/.toodles`.
    pub fn init() -> Result<Self> {
        if let Ok(dir) = std::env::var("TOODLES_HOME") {
            let trimmed = dir.trim();
            if !trimmed.is_empty() {
                return Self::with_app_dir(PathBuf::from(trimmed));
            }
        }

        let base = BaseDirs::new()
            .ok_or_else(|| Error::Environment("HOME environment variable not set.".into()))?;
        Self::with_app_dir(base.home_dir().join(APP_DIR_NAME))
    }

    /// Use an explicit application directory, creating it if necessary.
    pub fn with_app_dir(app_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&app_dir).map_err(|e| {
            Error::Environment(format!(
                "Failed to create application directory {}: {e}",
                app_dir.display()
            ))
        })?;
        debug!(dir = %app_dir.display(), "application directory ready");
        Ok(Self { app_dir })
    }

    /// Returns the application directory.
    #[must_use]
    pub fn app_dir(&self) -> &Path {
        &self.app_dir
    }

    /// Returns the path of the SQLite database file.
    #[must_use]
    pub fn storage_file(&self) -> PathBuf {
        self.app_dir.join(STORAGE_FILE_NAME)
    }

    /// Returns the path of the optional configuration file.
    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.app_dir.join(CONFIG_FILE_NAME)
    }
}
