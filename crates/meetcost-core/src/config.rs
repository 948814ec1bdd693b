//! User configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{MeetcostError, Result};

/// Key of the snapshot slot when none is configured.
pub const DEFAULT_SNAPSHOT_KEY: &str = "le-chrono-cheque-ugo-v1";

pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// Contents of `config.toml`. Every field is optional in the file.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct MeetcostConfig {
    /// Period of the accrual tick, in milliseconds
    pub tick_interval_ms: u64,
    /// Name of the snapshot slot (used as a file stem)
    pub snapshot_key: String,
    /// Symbol printed after amounts
    pub currency_symbol: String,
    /// Where the snapshot and logs live; platform data dir when unset
    pub data_dir: Option<PathBuf>,
}

impl Default for MeetcostConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            snapshot_key: DEFAULT_SNAPSHOT_KEY.to_string(),
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            data_dir: None,
        }
    }
}

impl MeetcostConfig {
    /// Parses and validates a TOML document. Blank input gives the defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = toml::from_str(content)
            .map_err(|e| MeetcostError::config(format!("invalid config.toml: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(MeetcostError::config("tick_interval_ms must be greater than zero"));
        }
        let key_is_safe = !self.snapshot_key.is_empty()
            && self
                .snapshot_key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !self.snapshot_key.starts_with('.');
        if !key_is_safe {
            return Err(MeetcostError::config(format!(
                "snapshot_key '{}' must be non-empty and use only letters, digits, '-', '_' or '.'",
                self.snapshot_key
            )));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_config_is_default() {
        let config = MeetcostConfig::from_toml_str("  \n").unwrap();
        assert_eq!(config, MeetcostConfig::default());
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = MeetcostConfig::from_toml_str("currency_symbol = \"€\"\n").unwrap();
        assert_eq!(config.currency_symbol, "€");
        assert_eq!(config.snapshot_key, DEFAULT_SNAPSHOT_KEY);
        assert_eq!(config.tick_interval_ms, 1000);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = MeetcostConfig::from_toml_str("tick_interval_ms = 0").unwrap_err();
        assert!(matches!(err, MeetcostError::Config(_)));

        let err = MeetcostConfig::from_toml_str("snapshot_key = \"../escape\"").unwrap_err();
        assert!(matches!(err, MeetcostError::Config(_)));

        let err = MeetcostConfig::from_toml_str("tick_interval_ms = \"fast\"").unwrap_err();
        assert!(matches!(err, MeetcostError::Config(_)));
    }
}
