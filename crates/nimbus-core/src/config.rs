use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::{AppError, ConfigError};

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Forecast endpoint and location
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Launch sequence timing
    #[serde(default)]
    pub launch: LaunchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Open-Meteo forecast endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_latitude")]
    pub latitude: f64,

    #[serde(default = "default_longitude")]
    pub longitude: f64,

    /// Timezone passed to the API; decides which local day each hour belongs to
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Display name for the location header
    #[serde(default = "default_location_name")]
    pub location_name: String,

    /// HTTP timeout in seconds (0 disables the timeout)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Number of hours shown in the hourly strip
    #[serde(default = "default_hourly_slots")]
    pub hourly_slots: usize,
}

fn default_base_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

fn default_latitude() -> f64 {
    28.6358
}

fn default_longitude() -> f64 {
    77.2245
}

fn default_timezone() -> String {
    "IST".to_string()
}

fn default_location_name() -> String {
    "New Delhi".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_hourly_slots() -> usize {
    24
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            latitude: default_latitude(),
            longitude: default_longitude(),
            timezone: default_timezone(),
            location_name: default_location_name(),
            request_timeout_secs: default_request_timeout_secs(),
            hourly_slots: default_hourly_slots(),
        }
    }
}

impl WeatherConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchConfig {
    /// How long the loading screen stays up before onboarding or main
    #[serde(default = "default_splash_seconds")]
    pub splash_seconds: u64,
}

fn default_splash_seconds() -> u64 {
    3
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            splash_seconds: default_splash_seconds(),
        }
    }
}

impl LaunchConfig {
    pub fn splash_delay(&self) -> Duration {
        Duration::from_secs(self.splash_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nimbus");

        Self {
            config_dir,
            weather: WeatherConfig::default(),
            launch: LaunchConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] when the platform has no config
    /// directory, [`ConfigError::ParseError`] for a malformed file, and
    /// [`AppError::Io`] when the file cannot be read or created.
    pub fn load() -> Result<Self, AppError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if it is missing
    pub fn load_from(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path)?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Warnings are logged. Validation errors fail with [`ConfigError::Invalid`].
    pub fn load_validated() -> Result<Self, AppError> {
        Self::load()?.into_validated()
    }

    /// Validate an already loaded configuration, logging warnings.
    pub fn into_validated(self) -> Result<Self, AppError> {
        let validation = self.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.weather.base_url, "weather.base_url", &mut result);

        if !(-90.0..=90.0).contains(&self.weather.latitude) {
            result.add_error(
                "weather.latitude",
                format!("Latitude must be within -90..90, got {}", self.weather.latitude),
            );
        }

        if !(-180.0..=180.0).contains(&self.weather.longitude) {
            result.add_error(
                "weather.longitude",
                format!(
                    "Longitude must be within -180..180, got {}",
                    self.weather.longitude
                ),
            );
        }

        if self.weather.timezone.trim().is_empty() {
            result.add_error("weather.timezone", "Timezone must not be empty");
        }

        if self.weather.request_timeout_secs == 0 {
            result.add_warning(
                "weather.request_timeout_secs",
                "Request timeout disabled; a hung request will never finish",
            );
        }

        if self.weather.hourly_slots == 0 {
            result.add_warning("weather.hourly_slots", "Hourly strip is empty (0 slots)");
        }

        if self.launch.splash_seconds > 30 {
            result.add_warning(
                "launch.splash_seconds",
                "Splash screen is unusually long (>30 seconds)",
            );
        }

        result
    }

    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Invalid(format!("cannot serialize config: {}", e)))?;

        std::fs::write(path, contents)?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::NotFound("platform config directory".to_string()))?
            .join("nimbus");

        Ok(config_dir.join("config.toml"))
    }
}
