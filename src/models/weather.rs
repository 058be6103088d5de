//! Current weather record as delivered by the provider

use crate::error::WeatherError;
use crate::models::provider::ProviderStatus;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Current weather observation for one place
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CurrentWeather {
    /// Place name reported by the provider
    #[serde(default)]
    pub name: String,
    /// Observation time, unix seconds (UTC)
    pub dt: i64,
    /// Offset of local time from UTC, in seconds
    #[serde(default)]
    pub timezone: i32,
    pub coord: Option<Coordinates>,
    /// Condition descriptions, most relevant first
    #[serde(default)]
    pub weather: Vec<Condition>,
    pub main: MainReadings,
    pub wind: Wind,
    #[serde(default)]
    pub clouds: Clouds,
    /// Visibility in metres
    pub visibility: Option<f64>,
    pub sys: Sys,
}

/// Geographic coordinates of the observation
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lon: f64,
    pub lat: f64,
}

/// Weather condition description and icon code
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Condition {
    #[serde(default)]
    pub description: String,
    pub icon: Option<String>,
}

/// Temperature, humidity and pressure readings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MainReadings {
    /// Temperature in the requested units
    pub temp: f64,
    pub feels_like: Option<f64>,
    /// Relative humidity in %
    pub humidity: f64,
    /// Sea level pressure in hPa
    pub pressure: f64,
}

/// Wind readings in the requested units
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Wind {
    pub speed: f64,
    pub gust: Option<f64>,
    /// Direction the wind blows from, degrees
    #[serde(default)]
    pub deg: f64,
}

/// Cloudiness in %
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Clouds {
    #[serde(default)]
    pub all: f64,
}

/// Country and sun times
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Sys {
    pub country: Option<String>,
    /// Sunrise, unix seconds (UTC)
    pub sunrise: i64,
    /// Sunset, unix seconds (UTC)
    pub sunset: i64,
}

impl CurrentWeather {
    /// Parse a provider response, rejecting provider error payloads first
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        ProviderStatus::from_json(&value).into_result()?;
        Ok(serde_json::from_value(value)?)
    }

    /// Fixed offset of the observed place
    pub fn offset(&self) -> crate::Result<FixedOffset> {
        FixedOffset::east_opt(self.timezone)
            .ok_or_else(|| WeatherError::invalid_measurement("timezone offset", f64::from(self.timezone)))
    }

    /// Convert a unix timestamp into local time of the observed place
    pub fn local_time(&self, timestamp: i64) -> crate::Result<DateTime<FixedOffset>> {
        let offset = self.offset()?;
        DateTime::from_timestamp(timestamp, 0)
            .map(|utc| utc.with_timezone(&offset))
            .ok_or_else(|| WeatherError::invalid_measurement("timestamp", timestamp as f64))
    }

    /// First condition, if the provider sent any
    #[must_use]
    pub fn primary_condition(&self) -> Option<&Condition> {
        self.weather.first()
    }
}

/// Capitalise the first letter of every word
#[must_use]
pub fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "coord": {"lon": 1.5218, "lat": 42.5075},
            "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
            "main": {"temp": 12.4, "feels_like": 11.6, "humidity": 81, "pressure": 1016},
            "visibility": 10000,
            "wind": {"speed": 3.6, "deg": 250, "gust": 6.2},
            "clouds": {"all": 75},
            "dt": 1_700_000_000,
            "sys": {"country": "AD", "sunrise": 1_699_944_000, "sunset": 1_699_980_000},
            "timezone": 3600,
            "name": "Andorra la Vella",
            "cod": 200
        })
    }

    #[test]
    fn test_parse_current_weather() {
        let weather = CurrentWeather::from_json_str(&sample().to_string()).unwrap();
        assert_eq!(weather.name, "Andorra la Vella");
        assert_eq!(weather.wind.gust, Some(6.2));
        assert_eq!(weather.main.humidity, 81.0);
        assert_eq!(weather.primary_condition().unwrap().icon.as_deref(), Some("10d"));
    }

    #[test]
    fn test_parse_without_gust() {
        let mut value = sample();
        value["wind"] = json!({"speed": 1.0, "deg": 10});
        let weather = CurrentWeather::from_json_str(&value.to_string()).unwrap();
        assert_eq!(weather.wind.gust, None);
    }

    #[test]
    fn test_provider_error_payload() {
        let result = CurrentWeather::from_json_str(r#"{"cod": "404", "message": "city not found"}"#);
        assert!(matches!(result, Err(WeatherError::Provider { .. })));
    }

    #[test]
    fn test_malformed_payload() {
        let result = CurrentWeather::from_json_str(r#"{"name": "nowhere"}"#);
        assert!(matches!(result, Err(WeatherError::Parse { .. })));
    }

    #[test]
    fn test_local_time_applies_offset() {
        let weather = CurrentWeather::from_json_str(&sample().to_string()).unwrap();
        let local = weather.local_time(weather.dt).unwrap();
        // 1_700_000_000 is 2023-11-14 22:13:20 UTC
        assert_eq!(local.format("%Y-%m-%d %H:%M").to_string(), "2023-11-14 23:13");
    }

    #[test]
    fn test_capitalize_words() {
        assert_eq!(capitalize_words("light rain"), "Light Rain");
        assert_eq!(capitalize_words("overcast  clouds"), "Overcast  Clouds");
        assert_eq!(capitalize_words(""), "");
    }
}
