//! Units systems understood by the weather provider

use crate::error::WeatherError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Metres per second in one mile per hour
pub const MPH_TO_MS: f64 = 0.44704;

/// Units family in which the provider delivers measurements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitsSystem {
    /// Kelvin, m/s
    Standard,
    /// Celsius, m/s
    #[default]
    Metric,
    /// Fahrenheit, mph
    Imperial,
}

impl UnitsSystem {
    pub const ALL: [UnitsSystem; 3] = [
        UnitsSystem::Standard,
        UnitsSystem::Metric,
        UnitsSystem::Imperial,
    ];

    /// Tag used by the provider API
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            UnitsSystem::Standard => "standard",
            UnitsSystem::Metric => "metric",
            UnitsSystem::Imperial => "imperial",
        }
    }

    #[must_use]
    pub fn temperature_unit(self) -> &'static str {
        match self {
            UnitsSystem::Standard => "K",
            UnitsSystem::Metric => "°C",
            UnitsSystem::Imperial => "°F",
        }
    }

    #[must_use]
    pub fn wind_unit(self) -> &'static str {
        match self {
            UnitsSystem::Standard | UnitsSystem::Metric => "m/s",
            UnitsSystem::Imperial => "mph",
        }
    }

    /// Convert a wind speed in this units system to m/s
    #[must_use]
    pub fn speed_to_ms(self, speed: f64) -> f64 {
        match self {
            UnitsSystem::Imperial => speed * MPH_TO_MS,
            UnitsSystem::Standard | UnitsSystem::Metric => speed,
        }
    }
}

impl FromStr for UnitsSystem {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        UnitsSystem::ALL
            .into_iter()
            .find(|u| u.as_str() == tag)
            .ok_or_else(|| WeatherError::invalid_units(s))
    }
}

impl fmt::Display for UnitsSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("standard", UnitsSystem::Standard)]
    #[case("metric", UnitsSystem::Metric)]
    #[case("IMPERIAL", UnitsSystem::Imperial)]
    #[case(" Metric ", UnitsSystem::Metric)]
    fn test_parse_units(#[case] tag: &str, #[case] expected: UnitsSystem) {
        assert_eq!(tag.parse::<UnitsSystem>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_units() {
        let err = "kelvin".parse::<UnitsSystem>().unwrap_err();
        assert!(matches!(err, WeatherError::InvalidUnits { ref units } if units == "kelvin"));
    }

    #[test]
    fn test_speed_conversion() {
        assert_eq!(UnitsSystem::Metric.speed_to_ms(10.0), 10.0);
        assert_eq!(UnitsSystem::Standard.speed_to_ms(10.0), 10.0);
        assert!((UnitsSystem::Imperial.speed_to_ms(10.0) - 4.4704).abs() < 1e-9);
    }

    #[test]
    fn test_unit_labels() {
        assert_eq!(UnitsSystem::Imperial.wind_unit(), "mph");
        assert_eq!(UnitsSystem::Standard.temperature_unit(), "K");
        assert_eq!(UnitsSystem::default(), UnitsSystem::Metric);
    }
}
