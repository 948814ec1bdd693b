//! Unified path management for meetcost files.
//!
//! Configuration lives in the platform config directory, the session snapshot
//! and logs in the platform data directory. Both are resolved via `dirs` so the
//! layout is correct on Linux, macOS and Windows.

use std::ffi::OsString;
use std::path::PathBuf;

use meetcost_core::MeetcostError;
use meetcost_core::config::MeetcostConfig;

/// Application directory name under the platform config/data directories.
const APP_DIR: &str = "meetcost";

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "MEETCOST_DATA_DIR";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for MeetcostError {
    fn from(e: PathError) -> Self {
        MeetcostError::config(e.to_string())
    }
}

/// Unified path management for meetcost.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/meetcost/                  # Config directory
/// └── config.toml                      # Application configuration
///
/// ~/.local/share/meetcost/             # Data directory (or $MEETCOST_DATA_DIR)
/// ├── le-chrono-cheque-ugo-v1.json     # Session snapshot, one file per key
/// └── logs/
///     └── meetcost.log.YYYY-MM-DD
/// ```
#[derive(Debug, Clone, Default)]
pub struct MeetcostPaths {
    /// Replaces the platform data directory when set
    data_dir_override: Option<PathBuf>,
}

impl MeetcostPaths {
    pub fn new(data_dir_override: Option<PathBuf>) -> Self {
        Self { data_dir_override }
    }

    /// Builds the paths for a loaded configuration.
    ///
    /// `MEETCOST_DATA_DIR` wins over the `data_dir` config entry, which wins
    /// over the platform default.
    pub fn from_config(config: &MeetcostConfig) -> Self {
        Self::new(resolve_data_dir_override(
            std::env::var_os(DATA_DIR_ENV),
            config.data_dir.clone(),
        ))
    }

    /// Returns the meetcost configuration directory (e.g. `~/.config/meetcost/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the data directory (e.g. `~/.local/share/meetcost/`).
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(dir) = &self.data_dir_override {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("logs"))
    }

    /// Returns the snapshot file for a storage key.
    pub fn snapshot_file(&self, key: &str) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join(format!("{key}.json")))
    }
}

/// Picks the data directory override: environment first, then config.
///
/// An empty environment value counts as unset.
fn resolve_data_dir_override(
    env_value: Option<OsString>,
    config_value: Option<PathBuf>,
) -> Option<PathBuf> {
    env_value
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or(config_value)
}
