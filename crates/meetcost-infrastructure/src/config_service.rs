//! Configuration service implementation.
//!
//! Loads [`MeetcostConfig`] from `config.toml` in the meetcost config
//! directory (`~/.config/meetcost/config.toml` on Linux).

use std::path::{Path, PathBuf};

use meetcost_core::config::MeetcostConfig;
use meetcost_core::error::Result;

use crate::paths::MeetcostPaths;

/// Reads the configuration file at a fixed location.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Uses the platform config file location.
    pub fn at_default_location() -> Result<Self> {
        Ok(Self::new(MeetcostPaths::config_file()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the configuration.
    ///
    /// A missing or empty file yields the defaults; a malformed one is a
    /// `Config` error.
    pub fn load(&self) -> Result<MeetcostConfig> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(MeetcostConfig::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        MeetcostConfig::from_toml_str(&content)
    }
}
