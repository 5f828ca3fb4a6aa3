//! Configuration management for the Thursday weather service
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::WeatherAppError;
use anyhow::{Context, Result};
use chrono::Weekday;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable the provider key has historically been read from
pub const API_KEY_ENV: &str = "WEATHER_API_KEY";

/// Dotenv file read from the working directory before the environment source
pub const ENV_FILE: &str = ".env";

/// Earliest and latest year the date range may cover
pub const YEAR_BOUNDS: (i32, i32) = (1970, 2100);

/// Root configuration structure for the service
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WeatherAppConfig {
    /// Weather provider configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Enumerated date range
    #[serde(default)]
    pub range: RangeConfig,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Weather provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Visual Crossing API key
    pub api_key: Option<String>,
    /// Timeline API base URL, without the city segment
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// City the observations are requested for
    #[serde(default = "default_city")]
    pub city: String,
    /// Request timeout in seconds, 0 keeps the transport default
    #[serde(default)]
    pub timeout_seconds: u32,
}

/// Year range and weekday to enumerate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeConfig {
    #[serde(default = "default_start_year")]
    pub start_year: i32,
    #[serde(default = "default_end_year")]
    pub end_year: i32,
    /// Weekday name, e.g. `thursday` or `thu`
    #[serde(default = "default_weekday")]
    pub weekday: String,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum simultaneous in-flight provider requests
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
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
fn default_weather_base_url() -> String {
    "https://weather.visualcrossing.com/VisualCrossingWebServices/rest/services/timeline"
        .to_string()
}

fn default_city() -> String {
    "Sankt-Peterburg".to_string()
}

fn default_start_year() -> i32 {
    2023
}

fn default_end_year() -> i32 {
    2025
}

fn default_weekday() -> String {
    "thursday".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_concurrency() -> usize {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            city: default_city(),
            timeout_seconds: 0,
        }
    }
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            start_year: default_start_year(),
            end_year: default_end_year(),
            weekday: default_weekday(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_concurrency: default_max_concurrency(),
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

impl WeatherConfig {
    /// Request timeout, `None` when the transport default applies
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_seconds > 0).then(|| Duration::from_secs(self.timeout_seconds.into()))
    }
}

impl RangeConfig {
    /// Parse the configured weekday name
    pub fn weekday(&self) -> Result<Weekday> {
        self.weekday.parse::<Weekday>().map_err(|_| {
            WeatherAppError::config(format!(
                "Invalid weekday '{}'. Use a name such as 'thursday' or 'thu'",
                self.weekday
            ))
            .into()
        })
    }
}

impl ServerConfig {
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl WeatherAppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from an explicit path, or the default locations
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        Self::load_env_file(Path::new(ENV_FILE))?;

        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path()
                .filter(|path| path.exists())
                .unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // THURSDAY_WEATHER_SERVER__PORT=9000 and friends
        builder = builder.add_source(
            Environment::with_prefix("THURSDAY_WEATHER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: WeatherAppConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.fill_api_key(|name| std::env::var(name).ok());

        // Apply defaults for missing values
        config.apply_defaults();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Export the variables of a dotenv file into the process environment.
    ///
    /// Variables that are already set are left alone. Returns `false` when
    /// the file does not exist.
    pub fn load_env_file(path: &Path) -> Result<bool> {
        match dotenvy::from_path(path) {
            Ok(()) => Ok(true),
            Err(e) if e.not_found() => Ok(false),
            Err(e) => Err(WeatherAppError::config(format!(
                "Failed to load {}: {e}",
                path.display()
            ))
            .into()),
        }
    }

    /// Take the API key from `WEATHER_API_KEY` when no other source set one
    pub fn fill_api_key(&mut self, lookup: impl FnOnce(&str) -> Option<String>) {
        if self.weather.api_key.is_none() {
            self.weather.api_key = lookup(API_KEY_ENV);
        }
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("thursday-weather").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.city.is_empty() {
            self.weather.city = default_city();
        }
        if self.range.weekday.is_empty() {
            self.range.weekday = default_weekday();
        }
        if self.server.host.is_empty() {
            self.server.host = default_host();
        }
        if self.server.max_concurrency == 0 {
            self.server.max_concurrency = default_max_concurrency();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_key()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// The provider rejects every request without a key
    pub fn validate_api_key(&self) -> Result<()> {
        match self.weather.api_key.as_deref().map(str::trim) {
            None => Err(WeatherAppError::config(format!(
                "Missing weather API key. Set {API_KEY_ENV} or weather.api_key in the config file."
            ))
            .into()),
            Some("") => Err(WeatherAppError::config(
                "Weather API key cannot be empty.",
            )
            .into()),
            Some(_) => Ok(()),
        }
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.range.start_year > self.range.end_year {
            return Err(WeatherAppError::validation(format!(
                "Start year {} is after end year {}",
                self.range.start_year, self.range.end_year
            ))
            .into());
        }

        let (min_year, max_year) = YEAR_BOUNDS;
        for year in [self.range.start_year, self.range.end_year] {
            if !(min_year..=max_year).contains(&year) {
                return Err(WeatherAppError::validation(format!(
                    "Year {year} is outside {min_year}..={max_year}"
                ))
                .into());
            }
        }

        if self.weather.timeout_seconds > 300 {
            return Err(WeatherAppError::config(
                "Weather API timeout cannot exceed 300 seconds",
            )
            .into());
        }

        if self.server.max_concurrency > 100 {
            return Err(WeatherAppError::config(
                "Maximum concurrency cannot exceed 100",
            )
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WeatherAppError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WeatherAppError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(WeatherAppError::config(
                "Weather API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        self.range.weekday()?;

        Ok(())
    }
}
