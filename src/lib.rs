//! Local Weather - weather summaries and air quality from raw measurements
//!
//! This library derives presentable values from the measurements a weather
//! provider returns: the European Common Air Quality Index from pollutant
//! concentrations, Beaufort wind categories and compass directions, and a
//! composed summary record. Every derivation is a pure function; fetching
//! and rendering data is left to callers.

pub mod air_quality;
pub mod config;
pub mod error;
pub mod models;
pub mod summary;
pub mod wind_analysis;

// Re-export core types for public API
pub use air_quality::{
    AirQualityCategory, AirQualitySummary, OVERFLOW_SUB_INDEX, PollutantReading,
    PollutantReadings, Species, compute_air_quality, sub_index,
};
pub use config::LocalWeatherConfig;
pub use error::WeatherError;
pub use models::{AirPollution, CurrentWeather, UnitsSystem};
pub use summary::{WeatherSummary, compose_summary};
pub use wind_analysis::{
    CompassPoint, WindCategory, WindDescription, WindObservation, compass_direction,
    describe_wind, wind_category,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
