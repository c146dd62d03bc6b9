//! Configuration management for `Peakcision`
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::PeakcisionError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `Peakcision` application
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeakcisionConfig {
    /// Catalog source configuration
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Preference store configuration
    #[serde(default)]
    pub preferences: PreferencesConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// HTTP service configuration
    #[serde(default)]
    pub server: ServerConfig,
}

/// Catalog source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Remote catalog root. The built-in catalog is used when unset.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Maximum number of records requested per fetch
    #[serde(default = "default_catalog_limit")]
    pub limit: usize,
}

/// Preference store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencesConfig {
    /// Directory of the on-disk store
    #[serde(default = "default_preferences_location")]
    pub location: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// HTTP service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_port")]
    pub port: u16,
}

// Default value functions
fn default_catalog_limit() -> usize {
    50
}

fn default_preferences_location() -> String {
    "~/.local/share/peakcision/preferences".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_server_port() -> u16 {
    8080
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            limit: default_catalog_limit(),
        }
    }
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            location: default_preferences_location(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
        }
    }
}

impl PreferencesConfig {
    /// Store directory with a leading `~` expanded to the home directory
    #[must_use]
    pub fn resolved_location(&self) -> PathBuf {
        match self.location.strip_prefix("~/") {
            Some(rest) => dirs::home_dir().map_or_else(|| PathBuf::from(rest), |home| home.join(rest)),
            None => PathBuf::from(&self.location),
        }
    }
}

impl PeakcisionConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // PEAKCISION_SERVER__PORT=9000 overrides server.port
        builder = builder.add_source(
            Environment::with_prefix("PEAKCISION")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: PeakcisionConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("peakcision").join("config.toml"))
    }

    /// Apply default values to missing configuration fields
    pub fn apply_defaults(&mut self) {
        if self
            .catalog
            .base_url
            .as_ref()
            .is_some_and(|url| url.trim().is_empty())
        {
            self.catalog.base_url = None;
        }
        if self.catalog.limit == 0 {
            self.catalog.limit = default_catalog_limit();
        }
        if self.preferences.location.is_empty() {
            self.preferences.location = default_preferences_location();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.server.port == 0 {
            self.server.port = default_server_port();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.catalog.limit > 500 {
            return Err(PeakcisionError::config("Catalog limit cannot exceed 500").into());
        }

        if self.server.port < 1024 {
            return Err(PeakcisionError::config(
                "Server port must be 1024 or higher",
            )
            .into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(PeakcisionError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(PeakcisionError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if let Some(url) = &self.catalog.base_url
            && !url.starts_with("http://")
            && !url.starts_with("https://")
        {
            return Err(PeakcisionError::config(
                "Catalog base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = PeakcisionConfig::default();
        assert!(config.catalog.base_url.is_none());
        assert_eq!(config.catalog.limit, 50);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.server.port, 8080);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(
            r#"
            [catalog]
            base_url = "https://catalog.example.com"
            limit = 20

            [logging]
            level = "debug"
            "#,
        );
        let config = PeakcisionConfig::load_from_path(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(
            config.catalog.base_url.as_deref(),
            Some("https://catalog.example.com")
        );
        assert_eq!(config.catalog.limit, 20);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config =
            PeakcisionConfig::load_from_path(Some(dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.catalog.limit, 50);
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = PeakcisionConfig::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_format() {
        let mut config = PeakcisionConfig::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_catalog_url() {
        let file = write_config("[catalog]\nbase_url = \"ftp://catalog\"\n");
        assert!(PeakcisionConfig::load_from_path(Some(file.path().to_path_buf())).is_err());
    }

    #[test]
    fn test_limit_range() {
        let mut config = PeakcisionConfig::default();
        config.catalog.limit = 501;
        assert!(config.validate().is_err());

        config.catalog.limit = 0;
        config.apply_defaults();
        assert_eq!(config.catalog.limit, 50);
    }

    #[test]
    fn test_empty_base_url_means_builtin_catalog() {
        let mut config = PeakcisionConfig::default();
        config.catalog.base_url = Some("  ".to_string());
        config.apply_defaults();
        assert!(config.catalog.base_url.is_none());
    }

    #[test]
    fn test_resolved_location() {
        let prefs = PreferencesConfig {
            location: "/tmp/peakcision-prefs".to_string(),
        };
        assert_eq!(prefs.resolved_location(), PathBuf::from("/tmp/peakcision-prefs"));

        let home = PreferencesConfig::default().resolved_location();
        assert!(home.ends_with(".local/share/peakcision/preferences"));
    }
}
