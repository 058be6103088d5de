//! Configuration management for the local weather engine
//!
//! Handles loading settings from files and environment variables, replaces
//! unusable values with defaults, and validates the rest. The derivation
//! engine never reads configuration itself; callers pass the resolved units
//! system in.

use crate::WeatherError;
use crate::models::UnitsSystem;
use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LocalWeatherConfig {
    /// Place the weather is reported for
    pub location: LocationConfig,
    /// Weather provider settings
    pub provider: ProviderConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Location settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    /// ISO 3166-1 alpha-2 country code, lower case
    pub country: String,
    /// Postal code, upper case
    pub zipcode: String,
}

/// Weather provider settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Provider API key (32 alphanumerics)
    pub api_key: String,
    /// Units tag: standard, metric or imperial
    pub units: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
}

// Default value functions
fn default_country() -> String {
    "ad".to_string()
}

fn default_zipcode() -> String {
    "AD500".to_string()
}

fn default_api_key() -> String {
    "samplApiKeyGetYourOwn12345678901".to_string()
}

fn default_units() -> String {
    UnitsSystem::default().to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            country: default_country(),
            zipcode: default_zipcode(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            units: default_units(),
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

/// Normalise a country code; `None` when no usable code remains
#[must_use]
pub fn sanitize_country(input: &str) -> Option<String> {
    let code: String = input.trim().to_lowercase().chars().take(2).collect();
    (code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic())).then_some(code)
}

/// Normalise a postal code; `None` when no usable code remains.
///
/// Accepted as-is: at least five characters, alphanumerics except for an
/// optional `-` among the last four. Longer unrecognised input is cut to its
/// first five characters.
#[must_use]
pub fn sanitize_zipcode(input: &str) -> Option<String> {
    let code = input.trim().to_uppercase();
    let chars: Vec<char> = code.chars().collect();
    if chars.len() >= 5 {
        let (head, tail) = chars.split_at(chars.len() - 4);
        let valid = head.iter().all(char::is_ascii_alphanumeric)
            && tail.iter().all(|c| c.is_ascii_alphanumeric() || *c == '-');
        if valid {
            return Some(code);
        }
    }
    (chars.len() > 5).then(|| chars[..5].iter().collect())
}

/// Normalise a units tag; `None` for unknown units
#[must_use]
pub fn sanitize_units(input: &str) -> Option<String> {
    input.parse::<UnitsSystem>().ok().map(|u| u.to_string())
}

/// Check an API key; `None` unless it is exactly 32 ASCII alphanumerics
#[must_use]
pub fn sanitize_api_key(input: &str) -> Option<String> {
    let key = input.trim();
    (key.len() == 32 && key.chars().all(|c| c.is_ascii_alphanumeric())).then(|| key.to_string())
}

/// Environment overrides, e.g. `LOCAL_WEATHER_PROVIDER__UNITS=imperial`.
///
/// Values stay strings: postal codes like `08001` and all-digit API keys
/// must not be read as numbers.
fn environment() -> Environment {
    Environment::with_prefix("LOCAL_WEATHER")
        .prefix_separator("_")
        .separator("__")
}

impl LocalWeatherConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path.
    ///
    /// An explicit path must exist; the default location is optional.
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(WeatherError::config(format!(
                        "Config file not found: {}",
                        path.display()
                    ))
                    .into());
                }
                builder = builder.add_source(File::from(path).format(config::FileFormat::Toml));
            }
            None => {
                let path = Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"));
                builder = builder.add_source(
                    File::from(path)
                        .required(false)
                        .format(config::FileFormat::Toml),
                );
            }
        }

        Self::from_builder(builder.add_source(environment()))
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: LocalWeatherConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.sanitize();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("local-weather").join("config.toml"))
    }

    /// Replace unusable location and provider values with defaults
    pub fn sanitize(&mut self) {
        self.location.country = sanitize_country(&self.location.country).unwrap_or_else(|| {
            warn!("Invalid country code '{}', using default", self.location.country);
            default_country()
        });
        self.location.zipcode = sanitize_zipcode(&self.location.zipcode).unwrap_or_else(|| {
            warn!("Invalid postal code '{}', using default", self.location.zipcode);
            default_zipcode()
        });
        self.provider.units = sanitize_units(&self.provider.units).unwrap_or_else(|| {
            warn!("Unknown units '{}', using default", self.provider.units);
            default_units()
        });
        self.provider.api_key = sanitize_api_key(&self.provider.api_key).unwrap_or_else(|| {
            warn!("Invalid API key, using the sample key");
            default_api_key()
        });
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate settings that have no safe default
    pub fn validate(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WeatherError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WeatherError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        self.units()?;
        Ok(())
    }

    /// Units system to request and interpret provider data in
    pub fn units(&self) -> crate::Result<UnitsSystem> {
        self.provider.units.parse()
    }

    /// Whether the API key is still the shipped placeholder
    #[must_use]
    pub fn uses_sample_api_key(&self) -> bool {
        self.provider.api_key == default_api_key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;

    #[test]
    fn test_default_config() {
        let config = LocalWeatherConfig::default();
        assert_eq!(config.location.country, "ad");
        assert_eq!(config.location.zipcode, "AD500");
        assert_eq!(config.provider.units, "metric");
        assert_eq!(config.logging.level, "info");
        assert!(config.uses_sample_api_key());
        assert_eq!(config.units().unwrap(), UnitsSystem::Metric);
        assert!(config.validate().is_ok());
    }

    #[rstest]
    #[case("ES", Some("es"))]
    #[case(" fr ", Some("fr"))]
    #[case("spain", Some("sp"))]
    #[case("e", None)]
    #[case("1a", None)]
    #[case("", None)]
    fn test_sanitize_country(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(sanitize_country(input).as_deref(), expected);
    }

    #[rstest]
    #[case("ad500", Some("AD500"))]
    #[case("08001", Some("08001"))]
    #[case("1234-567", Some("1234-567"))]
    #[case("SW1A 1AA", Some("SW1A "))]
    #[case("1-2345", Some("1-234"))]
    #[case("-1234", None)]
    #[case("123", None)]
    #[case("12 34", None)]
    fn test_sanitize_zipcode(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(sanitize_zipcode(input).as_deref(), expected);
    }

    #[rstest]
    #[case("Imperial", Some("imperial"))]
    #[case("standard", Some("standard"))]
    #[case("kelvin", None)]
    fn test_sanitize_units(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(sanitize_units(input).as_deref(), expected);
    }

    #[test]
    fn test_sanitize_api_key() {
        let key = "0123456789abcdefABCDEF0123456789";
        assert_eq!(sanitize_api_key(key).as_deref(), Some(key));
        assert_eq!(sanitize_api_key("short"), None);
        assert_eq!(sanitize_api_key("0123456789abcdefABCDEF012345678!"), None);
    }

    #[test]
    fn test_sanitize_substitutes_defaults() {
        let mut config = LocalWeatherConfig::default();
        config.location.country = "9".to_string();
        config.location.zipcode = "1".to_string();
        config.provider.units = "furlongs".to_string();
        config.provider.api_key = "nope".to_string();
        config.sanitize();

        assert_eq!(config.location.country, "ad");
        assert_eq!(config.location.zipcode, "AD500");
        assert_eq!(config.provider.units, "metric");
        assert!(config.uses_sample_api_key());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = LocalWeatherConfig::default();
        config.logging.level = "invalid".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_invalid_log_format() {
        let mut config = LocalWeatherConfig::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("local-weather-{}.toml", std::process::id()));
        fs::write(
            &path,
            "[location]\ncountry = \"ES\"\nzipcode = \"08001\"\n\n[provider]\nunits = \"imperial\"\n",
        )
        .unwrap();

        let config = LocalWeatherConfig::load_from_path(Some(path.clone())).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.location.country, "es");
        assert_eq!(config.location.zipcode, "08001");
        assert_eq!(config.units().unwrap(), UnitsSystem::Imperial);
        assert_eq!(config.logging.level, "info");
        assert!(config.uses_sample_api_key());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join("local-weather-does-not-exist.toml");
        let result = LocalWeatherConfig::load_from_path(Some(path));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Config file not found"));
    }

    #[test]
    fn test_environment_values_stay_strings() {
        let vars = config::Map::from([
            ("LOCAL_WEATHER_LOCATION__ZIPCODE".to_string(), "08001".to_string()),
            (
                "LOCAL_WEATHER_PROVIDER__API_KEY".to_string(),
                "01234567890123456789012345678901".to_string(),
            ),
            ("LOCAL_WEATHER_PROVIDER__UNITS".to_string(), "imperial".to_string()),
        ]);
        let builder = Config::builder().add_source(environment().source(Some(vars)));

        let config = LocalWeatherConfig::from_builder(builder).unwrap();

        assert_eq!(config.location.zipcode, "08001");
        assert_eq!(config.provider.api_key, "01234567890123456789012345678901");
        assert!(!config.uses_sample_api_key());
        assert_eq!(config.units().unwrap(), UnitsSystem::Imperial);
    }

    #[test]
    fn test_config_path_generation() {
        if let Some(path) = LocalWeatherConfig::get_config_path() {
            assert!(path.to_string_lossy().contains("local-weather"));
            assert!(path.to_string_lossy().contains("config.toml"));
        }
    }
}
