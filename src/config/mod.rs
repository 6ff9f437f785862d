//! Configuration management for the feedback client.
//!
//! This module handles loading and saving the user's configuration file,
//! which holds the feedback service address and a few UI settings.

mod settings;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub use settings::{Settings, DEFAULT_TICK_RATE_MS};

/// Default address of the feedback service.
pub const DEFAULT_BASE_URL: &str = "https://backend-sf-form.vercel.app";

/// Errors raised while loading, saving, or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform configuration directory could not be determined.
    #[error("could not determine configuration directory")]
    NoConfigDir,

    /// The configuration directory could not be created.
    #[error("failed to create configuration directory: {0}")]
    CreateDirError(std::io::Error),

    /// The configuration file could not be read.
    #[error("failed to read configuration file: {0}")]
    ReadError(std::io::Error),

    /// The configuration file could not be written.
    #[error("failed to write configuration file: {0}")]
    WriteError(std::io::Error),

    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("failed to serialize configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// A configuration value is invalid.
    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Connection settings for the feedback service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL the `/api/feedback` endpoints hang off.
    pub base_url: String,

    /// Optional per-request timeout. Requests wait indefinitely when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: None,
        }
    }
}

impl ApiConfig {
    /// Validate the API settings.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` if the base URL is empty or
    /// does not use an HTTP scheme, or if the timeout is zero.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "api.base_url cannot be empty".to_string(),
            ));
        }

        if !self.base_url.starts_with("https://") && !self.base_url.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "api.base_url '{}' must start with http:// or https://",
                self.base_url
            )));
        }

        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::ValidationError(
                "api.request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// The full application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Feedback service connection settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// UI settings.
    #[serde(default)]
    pub settings: Settings,
}

impl Config {
    /// Load the configuration from the default location.
    ///
    /// A missing file is not an error; the defaults are returned instead.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load the configuration from a specific file.
    ///
    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Save the configuration to a specific file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::CreateDirError)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(ConfigError::WriteError)?;

        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Validate every section of the configuration.
    pub fn validate(&self) -> Result<()> {
        self.api.validate()?;
        self.settings.validate()
    }

    /// The default configuration file path.
    ///
    /// - Linux: `~/.config/student-feedback/config.toml`
    /// - macOS: `~/Library/Application Support/student-feedback/config.toml`
    /// - Windows: `C:\Users\<User>\AppData\Roaming\student-feedback\config.toml`
    pub fn config_path() -> Result<PathBuf> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("student-feedback").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert!(config.api.request_timeout_secs.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.api.base_url = "http://localhost:5000".to_string();
        config.api.request_timeout_secs = Some(15);
        config.settings.tick_rate_ms = 250;

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nbase_url = \"http://localhost:5000\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:5000");
        assert_eq!(config.settings, Settings::default());
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nbase_url = ").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_invalid_scheme_rejected() {
        let api = ApiConfig {
            base_url: "backend-sf-form.vercel.app".to_string(),
            request_timeout_secs: None,
        };

        let result = api.validate();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("must start with http"));
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let api = ApiConfig {
            base_url: "  ".to_string(),
            request_timeout_secs: None,
        };
        assert!(api.validate().unwrap_err().to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let api = ApiConfig {
            request_timeout_secs: Some(0),
            ..ApiConfig::default()
        };
        assert!(api.validate().is_err());
    }

    #[test]
    fn test_config_path_ends_with_app_dir() {
        if let Ok(path) = Config::config_path() {
            assert!(path.ends_with("student-feedback/config.toml"));
        }
    }
}
