//! Configuration management for the CLI

use crate::output::OutputFormat;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable prefix for config overrides
const ENV_PREFIX: &str = "FLEETKEY";

/// CLI configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Host ID used when `--host` is not given
    pub default_host: Option<String>,
    /// Default output format (`table` or `json`)
    pub default_format: Option<String>,
}

impl Config {
    /// Load from the default config file (if present) and environment
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        Self::load_from(path.as_deref())
    }

    /// Load from an explicit file (if present) and environment.
    /// Environment variables override file values.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("Failed to load configuration")?;

        settings
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    /// Parse `default_format`, failing on names other than table or json
    pub fn output_format(&self) -> Result<Option<OutputFormat>> {
        self.default_format
            .as_deref()
            .map(|name| {
                OutputFormat::from_config(name).with_context(|| {
                    format!("Invalid default_format {:?} in configuration (expected table or json)", name)
                })
            })
            .transpose()
    }

    /// Get the configuration file path
    fn config_path() -> Option<PathBuf> {
        dirs_next::home_dir().map(|home| home.join(".config").join("fleetkey").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.default_format, None);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "default_format = \"json\"\n").unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.default_format.as_deref(), Some("json"));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "default_format = [").unwrap();

        assert!(Config::load_from(Some(&path)).is_err());
    }

    #[test]
    fn test_output_format() {
        let config = Config {
            default_format: Some("json".to_string()),
            ..Default::default()
        };
        assert_eq!(config.output_format().unwrap(), Some(OutputFormat::Json));
        assert_eq!(Config::default().output_format().unwrap(), None);
    }

    #[test]
    fn test_invalid_output_format_is_an_error() {
        let config = Config {
            default_format: Some("yaml".to_string()),
            ..Default::default()
        };
        let err = config.output_format().unwrap_err();
        assert!(err.to_string().contains("Invalid default_format"));
    }
}
