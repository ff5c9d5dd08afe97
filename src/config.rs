//! Configuration management for the `halfway` service
//!
//! Handles loading configuration from files and environment variables
//! and provides validation for all configuration settings.

use crate::HalfwayError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `halfway` service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HalfwayConfig {
    /// Geocoding service configuration
    #[serde(default)]
    pub geocoder: GeocoderConfig,
    /// Listing dataset configuration
    #[serde(default)]
    pub listings: ListingsConfig,
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Geocoding service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderConfig {
    /// Base URL of the Nominatim instance
    #[serde(default = "default_geocoder_base_url")]
    pub base_url: String,
    /// User agent sent with every request (required by Nominatim)
    #[serde(default = "default_geocoder_user_agent")]
    pub user_agent: String,
    /// Request timeout in seconds
    #[serde(default = "default_geocoder_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for transient failures
    #[serde(default = "default_geocoder_max_retries")]
    pub max_retries: u32,
}

/// Listing dataset settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingsConfig {
    /// Path of the delimited listings file
    #[serde(default = "default_listings_path")]
    pub path: PathBuf,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on
    #[serde(default = "default_server_port")]
    pub port: u16,
    /// Optional directory of frontend assets
    pub static_dir: Option<PathBuf>,
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

// Default value functions
fn default_geocoder_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_geocoder_user_agent() -> String {
    format!("halfway/{}", crate::VERSION)
}

fn default_geocoder_timeout() -> u32 {
    10
}

fn default_geocoder_max_retries() -> u32 {
    0
}

fn default_listings_path() -> PathBuf {
    PathBuf::from("rental_clean.csv")
}

fn default_server_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoder_base_url(),
            user_agent: default_geocoder_user_agent(),
            timeout_seconds: default_geocoder_timeout(),
            max_retries: default_geocoder_max_retries(),
        }
    }
}

impl Default for ListingsConfig {
    fn default() -> Self {
        Self {
            path: default_listings_path(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
            static_dir: None,
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

impl HalfwayConfig {
    /// Load configuration from the default file location and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

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

        // HALFWAY__GEOCODER__USER_AGENT etc.
        builder = builder.add_source(
            Environment::with_prefix("HALFWAY")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: HalfwayConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("halfway").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.geocoder.timeout_seconds == 0 || self.geocoder.timeout_seconds > 120 {
            return Err(
                HalfwayError::config("Geocoder timeout must be between 1 and 120 seconds").into(),
            );
        }

        if self.geocoder.max_retries > 10 {
            return Err(HalfwayError::config("Geocoder max retries cannot exceed 10").into());
        }

        if self.server.port == 0 {
            return Err(HalfwayError::config("Server port cannot be 0").into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(HalfwayError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(HalfwayError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.geocoder.base_url.starts_with("http://")
            && !self.geocoder.base_url.starts_with("https://")
        {
            return Err(
                HalfwayError::config("Geocoder base URL must be a valid HTTP or HTTPS URL").into(),
            );
        }

        if self.geocoder.user_agent.trim().is_empty() {
            return Err(HalfwayError::config(
                "Geocoder user agent cannot be empty; Nominatim rejects anonymous clients",
            )
            .into());
        }

        Ok(())
    }
}
