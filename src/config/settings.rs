//! Application settings configuration.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// Default event loop tick in milliseconds.
pub const DEFAULT_TICK_RATE_MS: u64 = 100;

/// UI-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// How often the event loop wakes up to animate spinners.
    pub tick_rate_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
        }
    }
}

impl Settings {
    /// Validate the settings.
    pub fn validate(&self) -> Result<()> {
        if !(10..=5_000).contains(&self.tick_rate_ms) {
            return Err(ConfigError::ValidationError(format!(
                "settings.tick_rate_ms must be between 10 and 5000, got {}",
                self.tick_rate_ms
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.tick_rate_ms, DEFAULT_TICK_RATE_MS);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_tick_rate_bounds() {
        let settings = Settings { tick_rate_ms: 0 };
        assert!(settings.validate().is_err());

        let settings = Settings { tick_rate_ms: 10_000 };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_serialization() {
        let settings = Settings { tick_rate_ms: 50 };
        let toml_str = toml::to_string(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, settings);
    }
}
