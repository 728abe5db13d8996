//! Configuration management for splitlog

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::logging::{parse_level_mask, RecordFormat};

/// Environment variable overriding the configured levels
pub const LEVELS_ENV: &str = "SPLITLOG_LEVELS";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Level specification: a mask number or names such as "warn|error"
    #[serde(default = "default_levels")]
    pub levels: String,

    /// Base directory under which dated log directories are created
    #[serde(default = "logs_dir")]
    pub logs_dir: PathBuf,

    /// Prefix records with the local date and time
    #[serde(default = "default_true")]
    pub timestamps: bool,

    /// Prefix records with the caller's file and line
    #[serde(default = "default_true")]
    pub locations: bool,
}

fn default_levels() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            levels: default_levels(),
            logs_dir: logs_dir(),
            timestamps: true,
            locations: true,
        }
    }
}

impl Config {
    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from `path`, or return default if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_file_path())
    }

    /// Save configuration to `path`, creating its parent directory
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Apply the `SPLITLOG_LEVELS` override, if set
    pub fn apply_env(mut self) -> Self {
        if let Ok(levels) = std::env::var(LEVELS_ENV) {
            self.levels = levels;
        }
        self
    }

    /// The configured level mask
    pub fn level_mask(&self) -> Result<u32> {
        parse_level_mask(&self.levels)
            .with_context(|| format!("Invalid levels setting '{}'", self.levels))
    }

    /// Record layout selected by the configuration
    pub fn record_format(&self) -> RecordFormat {
        RecordFormat {
            timestamp: self.timestamps,
            location: self.locations,
        }
    }
}

/// Get the base configuration directory (~/.splitlog)
/// Falls back to ./.splitlog if home directory cannot be determined
pub fn config_dir() -> PathBuf {
    try_config_dir().unwrap_or_else(|| {
        tracing::warn!("Could not determine home directory, using current directory for config");
        PathBuf::from(".splitlog")
    })
}

/// Try to get the base configuration directory, returning None if home dir is unavailable
pub fn try_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".splitlog"))
}

/// Get the path to the config file
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Get the path to the logs directory
pub fn logs_dir() -> PathBuf {
    config_dir().join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LEVEL_ERROR, LEVEL_INFO, LEVEL_WARNING};
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.levels, "info");
        assert_eq!(config.level_mask().unwrap(), LEVEL_INFO);
        assert!(config.logs_dir.ends_with("logs"));
        assert_eq!(config.record_format(), RecordFormat::default());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed = Config::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed = Config::from_toml("levels = \"warn|error\"\nlocations = false\n").unwrap();
        assert_eq!(parsed.level_mask().unwrap(), LEVEL_WARNING | LEVEL_ERROR);
        assert!(parsed.timestamps);
        assert!(!parsed.locations);
        assert_eq!(parsed.logs_dir, logs_dir());
    }

    #[test]
    fn test_invalid_levels_setting() {
        let config = Config {
            levels: "chatty".to_string(),
            ..Config::default()
        };
        let err = config.level_mask().unwrap_err();
        assert!(err.to_string().contains("chatty"));
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");
        let config = Config {
            levels: "warn|error".to_string(),
            logs_dir: temp_dir.path().join("logs"),
            timestamps: false,
            locations: true,
        };

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();

        assert_eq!(loaded, config);
        assert_eq!(loaded.level_mask().unwrap(), LEVEL_WARNING | LEVEL_ERROR);
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = Config::load_from(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_load_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "timestamps = \"yes\"").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_malformed_toml() {
        assert!(Config::from_toml("levels = [").is_err());
    }

    #[test]
    fn test_config_dir_does_not_panic() {
        let dir = config_dir();
        assert!(dir.ends_with(".splitlog"));
    }

    #[test]
    fn test_try_config_dir() {
        // CI might not have a home dir; only check the shape when it does
        if let Some(path) = try_config_dir() {
            assert!(path.ends_with(".splitlog"));
        }
    }
}
