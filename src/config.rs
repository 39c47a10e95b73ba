//! Configuration for the depth body tracking adapter.
//!
//! The adapter's own settings are named integers (see [`crate::host`]); this
//! file-backed configuration is the settings store used by the CLI host.

use crate::host::{
    SettingsStore, ORIENTATION_DEFAULT, ORIENTATION_SETTING, TRACKING_DEFAULT, TRACKING_SETTING,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration for the adapter CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Named integer settings read by the adapter ("Tracking", "Orientation")
    pub settings: BTreeMap<String, i32>,

    /// Interval between host update ticks
    #[serde(with = "duration_millis")]
    pub tick_interval: Duration,

    /// Path for storing run statistics
    pub data_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("depth-body-adapter");

        let mut settings = BTreeMap::new();
        settings.insert(TRACKING_SETTING.to_string(), TRACKING_DEFAULT);
        settings.insert(ORIENTATION_SETTING.to_string(), ORIENTATION_DEFAULT);

        Self {
            settings,
            tick_interval: Duration::from_millis(33),
            data_path: data_dir,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, falling back to defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content =
                std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("depth-body-adapter")
            .join("config.json")
    }
}

impl SettingsStore for Config {
    fn get_setting(&self, key: &str, default: i32) -> i32 {
        self.settings.get(key).copied().unwrap_or(default)
    }

    fn set_setting(&mut self, key: &str, value: i32) {
        self.settings.insert(key.to_string(), value);
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::ParseError(e) => write!(f, "Parse error: {e}"),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Serde support for Duration as whole milliseconds.
mod duration_millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (duration.as_millis() as u64).serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.tick_interval, Duration::from_millis(33));
        assert_eq!(config.get_setting(TRACKING_SETTING, -1), 4);
        assert_eq!(config.get_setting(ORIENTATION_SETTING, -1), 0);
    }

    #[test]
    fn test_unknown_setting_uses_default() {
        let config = Config::default();
        assert_eq!(config.get_setting("Smoothing", 7), 7);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = std::env::temp_dir()
            .join(format!("depth-body-config-{}", uuid::Uuid::new_v4()))
            .join("config.json");

        let mut config = Config::default();
        config.set_setting(ORIENTATION_SETTING, 3);
        config.tick_interval = Duration::from_millis(50);
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.get_setting(ORIENTATION_SETTING, 0), 3);
        assert_eq!(loaded.tick_interval, Duration::from_millis(50));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("depth-body-config-missing/none.json");
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.get_setting(TRACKING_SETTING, -1), TRACKING_DEFAULT);
    }

    #[test]
    fn test_invalid_file_is_parse_error() {
        let dir = std::env::temp_dir().join(format!("depth-body-config-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(Config::load_from(&path), Err(ConfigError::ParseError(_))));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
