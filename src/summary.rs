//! Weather summary composition
//!
//! Combines the provider's current weather record with the wind and air
//! quality engines into one record ready for presentation.

use crate::air_quality::{AirQualitySummary, compute_air_quality};
use crate::models::weather::capitalize_words;
use crate::models::{AirPollution, CurrentWeather, UnitsSystem};
use crate::wind_analysis::{WindDescription, WindObservation, describe_wind};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Presentable weather summary for one place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub place: String,
    /// ISO 3166-1 alpha-2 country code, if reported
    pub country: Option<String>,
    /// Observation time in local time of the place
    pub observed_at: DateTime<FixedOffset>,
    pub description: String,
    pub icon: Option<String>,
    pub units: UnitsSystem,
    pub temperature_unit: String,
    pub temperature: i32,
    pub feels_like: Option<i32>,
    /// Relative humidity in %
    pub humidity: u8,
    /// Pressure in hPa
    pub pressure: u32,
    /// Cloudiness in %
    pub cloudiness: u8,
    /// Visibility in metres
    pub visibility: Option<u32>,
    pub wind: WindDescription,
    pub sunrise: DateTime<FixedOffset>,
    pub sunset: DateTime<FixedOffset>,
    pub air_quality: Option<AirQualitySummary>,
}

impl WeatherSummary {
    /// Temperature with its unit, e.g. `12 °C`
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{} {}", self.temperature, self.temperature_unit)
    }

    /// Sunrise and sunset as `HH:MM` local time
    #[must_use]
    pub fn format_sun_times(&self) -> (String, String) {
        (
            self.sunrise.format("%H:%M").to_string(),
            self.sunset.format("%H:%M").to_string(),
        )
    }
}

/// Compose a summary from a current weather record and optional air data.
///
/// `units` must be the units system the weather record was requested in.
///
/// # Errors
///
/// Propagates wind errors, invalid timestamps and, when air data is given,
/// [`crate::WeatherError::IncompleteReading`] or
/// [`crate::WeatherError::InvalidMeasurement`] from the air quality engine.
#[instrument(level = "debug", skip(weather, air), fields(place = %weather.name))]
pub fn compose_summary(
    weather: &CurrentWeather,
    air: Option<&AirPollution>,
    units: UnitsSystem,
) -> crate::Result<WeatherSummary> {
    let wind = describe_wind(&WindObservation {
        speed: weather.wind.speed,
        gust: weather.wind.gust,
        deg: weather.wind.deg,
        units,
    })?;
    debug!("Wind: {}", wind);

    let air_quality = match air {
        Some(air) => {
            let summary = compute_air_quality(&air.readings())?;
            debug!("Air quality: {}", summary.headline());
            Some(summary)
        }
        None => None,
    };

    let condition = weather.primary_condition();

    Ok(WeatherSummary {
        place: weather.name.clone(),
        country: weather.sys.country.clone(),
        observed_at: weather.local_time(weather.dt)?,
        description: condition
            .map(|c| capitalize_words(&c.description))
            .unwrap_or_default(),
        icon: condition.and_then(|c| c.icon.clone()),
        units,
        temperature_unit: units.temperature_unit().to_string(),
        temperature: weather.main.temp.round() as i32,
        feels_like: weather.main.feels_like.map(|t| t.round() as i32),
        humidity: weather.main.humidity.round() as u8,
        pressure: weather.main.pressure.round() as u32,
        cloudiness: weather.clouds.all.round() as u8,
        visibility: weather.visibility.map(|v| v.round() as u32),
        wind,
        sunrise: weather.local_time(weather.sys.sunrise)?,
        sunset: weather.local_time(weather.sys.sunset)?,
        air_quality,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WeatherError;
    use crate::air_quality::{AirQualityCategory, Species};
    use crate::wind_analysis::{CompassPoint, WindCategory};
    use serde_json::json;

    fn weather() -> CurrentWeather {
        serde_json::from_value(json!({
            "coord": {"lon": 1.5218, "lat": 42.5075},
            "weather": [{"description": "scattered clouds", "icon": "03d"}],
            "main": {"temp": 12.5, "feels_like": 11.4, "humidity": 80.6, "pressure": 1015.5},
            "visibility": 9999.6,
            "wind": {"speed": 5.4, "deg": 11.25, "gust": 8.6},
            "clouds": {"all": 40},
            "dt": 1_700_000_000,
            "sys": {"country": "AD", "sunrise": 1_699_944_000, "sunset": 1_699_980_000},
            "timezone": 3600,
            "name": "Andorra la Vella"
        }))
        .unwrap()
    }

    fn air(no2: f64) -> AirPollution {
        serde_json::from_value(json!({
            "list": [{"components": {"no2": no2, "pm10": 6.3, "o3": 68.7, "pm2_5": 4.1}}]
        }))
        .unwrap()
    }

    #[test]
    fn test_compose_rounds_display_numbers() {
        let summary = compose_summary(&weather(), None, UnitsSystem::Metric).unwrap();
        assert_eq!(summary.place, "Andorra la Vella");
        assert_eq!(summary.description, "Scattered Clouds");
        assert_eq!(summary.temperature, 13);
        assert_eq!(summary.feels_like, Some(11));
        assert_eq!(summary.humidity, 81);
        assert_eq!(summary.pressure, 1016);
        assert_eq!(summary.cloudiness, 40);
        assert_eq!(summary.visibility, Some(10000));
        assert_eq!(summary.format_temperature(), "13 °C");
        assert!(summary.air_quality.is_none());
    }

    #[test]
    fn test_compose_wind() {
        let summary = compose_summary(&weather(), None, UnitsSystem::Metric).unwrap();
        assert_eq!(summary.wind.category, WindCategory::GentleBreeze);
        assert_eq!(summary.wind.direction, CompassPoint::NNE);
        assert_eq!(summary.wind.speed, 5);
        assert_eq!(summary.wind.gust, Some(9));
    }

    #[test]
    fn test_compose_local_times() {
        let summary = compose_summary(&weather(), None, UnitsSystem::Metric).unwrap();
        // 1_699_944_000 is 06:40 UTC, 1_699_980_000 is 16:40 UTC
        assert_eq!(
            summary.format_sun_times(),
            ("07:40".to_string(), "17:40".to_string())
        );
        assert_eq!(summary.observed_at.offset().local_minus_utc(), 3600);
    }

    #[test]
    fn test_compose_with_air_quality() {
        // NO2 75 -> 38 dominates PM10 6 (6), O3 68.7 (29), PM2.5 4.1 (7)
        let summary = compose_summary(&weather(), Some(&air(75.0)), UnitsSystem::Metric).unwrap();
        let aq = summary.air_quality.unwrap();
        assert_eq!(aq.dominant, Species::No2);
        assert_eq!(aq.index, 38);
        assert_eq!(aq.category, AirQualityCategory::Good);
    }

    #[test]
    fn test_compose_propagates_incomplete_air_data() {
        let partial: AirPollution =
            serde_json::from_value(json!({"list": [{"components": {"no2": 10.0}}]})).unwrap();
        let result = compose_summary(&weather(), Some(&partial), UnitsSystem::Metric);
        assert!(matches!(result, Err(WeatherError::IncompleteReading { .. })));
    }

    #[test]
    fn test_compose_propagates_invalid_wind() {
        let mut weather = weather();
        weather.wind.speed = -3.0;
        let result = compose_summary(&weather, None, UnitsSystem::Metric);
        assert!(matches!(result, Err(WeatherError::InvalidMeasurement { .. })));
    }

    #[test]
    fn test_compose_imperial_labels() {
        let summary = compose_summary(&weather(), None, UnitsSystem::Imperial).unwrap();
        assert_eq!(summary.temperature_unit, "°F");
        assert_eq!(summary.wind.unit, "mph");
        // 5.4 mph = 2.41 m/s
        assert_eq!(summary.wind.category, WindCategory::LightBreeze);
    }
}
