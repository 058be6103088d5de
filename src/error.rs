//! Error types and handling for the local weather engine

use crate::air_quality::Species;
use thiserror::Error;

/// Main error type for the local weather engine
#[derive(Error, Debug)]
pub enum WeatherError {
    /// A measurement is negative or not a finite number
    #[error("Invalid measurement: {quantity} = {value}")]
    InvalidMeasurement { quantity: String, value: f64 },

    /// Air quality was requested without all four pollutants
    #[error("Incomplete reading: missing {}", format_species(missing))]
    IncompleteReading { missing: Vec<Species> },

    /// Units tag outside the supported set
    #[error("Invalid units: '{units}' (expected standard, metric or imperial)")]
    InvalidUnits { units: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Error payload returned by the weather provider
    #[error("Provider error {code}: {message}")]
    Provider { code: String, message: String },

    /// Provider JSON that does not match the expected record shape
    #[error("Parse error: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },
}

fn format_species(species: &[Species]) -> String {
    species
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl WeatherError {
    /// Create a new invalid measurement error
    pub fn invalid_measurement<S: Into<String>>(quantity: S, value: f64) -> Self {
        Self::InvalidMeasurement {
            quantity: quantity.into(),
            value,
        }
    }

    /// Create a new incomplete reading error
    #[must_use]
    pub fn incomplete_reading(missing: Vec<Species>) -> Self {
        Self::IncompleteReading { missing }
    }

    /// Create a new invalid units error
    pub fn invalid_units<S: Into<String>>(units: S) -> Self {
        Self::InvalidUnits {
            units: units.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new provider error
    pub fn provider<C: Into<String>, M: Into<String>>(code: C, message: M) -> Self {
        Self::Provider {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherError::InvalidMeasurement { quantity, .. } => {
                format!("The reported {quantity} is not a valid measurement.")
            }
            WeatherError::IncompleteReading { missing } => format!(
                "Air quality is unavailable: no data for {}.",
                format_species(missing)
            ),
            WeatherError::InvalidUnits { units } => {
                format!("Unknown units '{units}'. Use standard, metric or imperial.")
            }
            WeatherError::Config { message } => {
                format!("Configuration error: {message}. Please check your config file.")
            }
            WeatherError::Provider { message, .. } => {
                format!("The weather provider reported an error: {message}")
            }
            WeatherError::Parse { .. } => {
                "The weather data could not be read. It may be malformed.".to_string()
            }
        }
    }
}
