//! Application configuration module
//!
//! Handles loading and validating configuration from `.env`, an optional
//! `urbanpulse.{toml,json,yaml}` file and `URBANPULSE__*` environment variables.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::error::AppError;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

/// Simulation run configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// City id from the built-in catalog
    pub city: String,
    /// Optional JSON file with city features; the built-in sample is used otherwise
    pub features_path: Option<PathBuf>,
    /// Optional JSON file with an array of scenario configs
    pub scenarios_path: Option<PathBuf>,
    /// Where to write the report; stdout when unset
    pub output_path: Option<PathBuf>,
    /// Budget for a full scenario comparison
    pub timeout_secs: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            city: "nairobi".to_string(),
            features_path: None,
            scenarios_path: None,
            output_path: None,
            timeout_secs: 5,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
    /// Emit JSON lines instead of the compact human format
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,urbanpulse=debug".to_string(),
            json: false,
        }
    }
}

/// Complete application settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub simulation: SimulationConfig,
    pub logging: LoggingConfig,
}

impl Settings {
    /// Load settings from `.env`, the optional settings file and the environment
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if it exists (ignore errors if file not found)
        let _ = dotenvy::dotenv();

        let raw = ::config::Config::builder()
            .add_source(::config::File::with_name("urbanpulse").required(false))
            .add_source(
                ::config::Environment::with_prefix("URBANPULSE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = raw.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.city.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "simulation.city must not be empty".to_string(),
            ));
        }
        if self.simulation.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "simulation.timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_simulation_config() {
        let config = SimulationConfig::default();
        assert_eq!(config.city, "nairobi");
        assert_eq!(config.timeout_secs, 5);
        assert!(config.scenarios_path.is_none());
    }

    #[test]
    fn test_default_logging_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.filter, "info,urbanpulse=debug");
        assert!(!config.json);
    }

    #[test]
    fn test_partial_settings_fill_in_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"simulation": {"timeout_secs": 2}}"#).unwrap();
        assert_eq!(settings.simulation.timeout_secs, 2);
        assert_eq!(settings.simulation.city, "nairobi");
        assert_eq!(settings.logging.filter, "info,urbanpulse=debug");
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut settings = Settings::default();
        settings.simulation.timeout_secs = 0;
        assert!(matches!(settings.validate(), Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_validate_rejects_blank_city() {
        let mut settings = Settings::default();
        settings.simulation.city = "  ".to_string();
        assert!(settings.validate().is_err());
    }
}
