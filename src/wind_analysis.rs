//! Wind Analysis Engine
//!
//! Classifies wind speed on the Beaufort scale and names the compass point
//! the wind blows from.

use crate::error::WeatherError;
use crate::models::UnitsSystem;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Beaufort wind speed categories, ordered by increasing speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindCategory {
    Calm,
    LightAir,
    LightBreeze,
    GentleBreeze,
    ModerateBreeze,
    FreshBreeze,
    StrongBreeze,
    ModerateGale,
    Gale,
    StrongGale,
    Storm,
    ViolentStorm,
    Hurricane,
}

/// Upper (exclusive) speed limit in m/s of every category below hurricane
const BEAUFORT_LIMITS: [(f64, WindCategory); 12] = [
    (0.3, WindCategory::Calm),
    (1.5, WindCategory::LightAir),
    (3.3, WindCategory::LightBreeze),
    (5.5, WindCategory::GentleBreeze),
    (7.9, WindCategory::ModerateBreeze),
    (10.7, WindCategory::FreshBreeze),
    (13.8, WindCategory::StrongBreeze),
    (17.1, WindCategory::ModerateGale),
    (20.7, WindCategory::Gale),
    (24.4, WindCategory::StrongGale),
    (28.4, WindCategory::Storm),
    (32.6, WindCategory::ViolentStorm),
];

impl WindCategory {
    /// Beaufort force number, 0 (calm) to 12 (hurricane)
    #[must_use]
    pub fn beaufort_number(self) -> u8 {
        self as u8
    }

    /// Classify a speed already expressed in m/s
    fn from_ms(speed_ms: f64) -> Self {
        BEAUFORT_LIMITS
            .iter()
            .find(|(limit, _)| speed_ms < *limit)
            .map_or(WindCategory::Hurricane, |(_, category)| *category)
    }
}

/// The 16 compass points, clockwise from north
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CompassPoint {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

impl CompassPoint {
    /// All points in clockwise order starting at north
    pub const ALL: [CompassPoint; 16] = [
        CompassPoint::N,
        CompassPoint::NNE,
        CompassPoint::NE,
        CompassPoint::ENE,
        CompassPoint::E,
        CompassPoint::ESE,
        CompassPoint::SE,
        CompassPoint::SSE,
        CompassPoint::S,
        CompassPoint::SSW,
        CompassPoint::SW,
        CompassPoint::WSW,
        CompassPoint::W,
        CompassPoint::WNW,
        CompassPoint::NW,
        CompassPoint::NNW,
    ];

    /// Angular width of one compass sector
    pub const SECTOR_DEGREES: f64 = 22.5;

    /// Centre bearing of this point in degrees
    #[must_use]
    pub fn degrees(self) -> f64 {
        f64::from(self as u8) * Self::SECTOR_DEGREES
    }
}

/// Wind observation in the units the provider delivered it in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindObservation {
    pub speed: f64,
    pub gust: Option<f64>,
    /// Direction the wind blows from, degrees
    pub deg: f64,
    pub units: UnitsSystem,
}

/// Presentable wind summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindDescription {
    pub category: WindCategory,
    pub direction: CompassPoint,
    /// Speed rounded to a whole number, in `unit`
    pub speed: u32,
    /// Gust rounded to a whole number, in `unit`
    pub gust: Option<u32>,
    pub unit: String,
}

fn check_speed(quantity: &str, speed: f64) -> crate::Result<()> {
    if !speed.is_finite() || speed < 0.0 {
        return Err(WeatherError::invalid_measurement(quantity, speed));
    }
    Ok(())
}

/// Classify a wind speed given in `units`.
///
/// Imperial speeds are converted from mph to m/s before classification.
///
/// # Errors
///
/// Returns [`WeatherError::InvalidMeasurement`] for negative or non-finite
/// speeds.
pub fn wind_category(speed: f64, units: UnitsSystem) -> crate::Result<WindCategory> {
    check_speed("wind speed", speed)?;
    Ok(WindCategory::from_ms(units.speed_to_ms(speed)))
}

/// Same as [`wind_category`] but with the units given as a provider tag.
///
/// # Errors
///
/// Returns [`WeatherError::InvalidUnits`] for tags other than `standard`,
/// `metric` or `imperial`.
pub fn wind_category_for_tag(speed: f64, units: &str) -> crate::Result<WindCategory> {
    wind_category(speed, units.parse()?)
}

/// Name the compass point closest to a bearing.
///
/// The bearing is wrapped into [0, 360) first. Exact midpoints between two
/// points round half away from zero, so 11.25° is NNE and 348.75° is N.
///
/// # Errors
///
/// Returns [`WeatherError::InvalidMeasurement`] for non-finite bearings.
pub fn compass_direction(degrees: f64) -> crate::Result<CompassPoint> {
    if !degrees.is_finite() {
        return Err(WeatherError::invalid_measurement("wind direction", degrees));
    }
    let wrapped = degrees.rem_euclid(360.0);
    let sector = (wrapped / CompassPoint::SECTOR_DEGREES).round() as usize % CompassPoint::ALL.len();
    Ok(CompassPoint::ALL[sector])
}

/// Describe a full wind observation.
///
/// # Errors
///
/// Returns [`WeatherError::InvalidMeasurement`] when speed, gust or
/// direction is invalid.
pub fn describe_wind(observation: &WindObservation) -> crate::Result<WindDescription> {
    let category = wind_category(observation.speed, observation.units)?;
    if let Some(gust) = observation.gust {
        check_speed("wind gust", gust)?;
    }
    let direction = compass_direction(observation.deg)?;

    Ok(WindDescription {
        category,
        direction,
        speed: observation.speed.round() as u32,
        gust: observation.gust.map(|g| g.round() as u32),
        unit: observation.units.wind_unit().to_string(),
    })
}

// Display implementations
impl fmt::Display for WindCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WindCategory::Calm => "calm",
            WindCategory::LightAir => "light air",
            WindCategory::LightBreeze => "light breeze",
            WindCategory::GentleBreeze => "gentle breeze",
            WindCategory::ModerateBreeze => "moderate breeze",
            WindCategory::FreshBreeze => "fresh breeze",
            WindCategory::StrongBreeze => "strong breeze",
            WindCategory::ModerateGale => "moderate gale",
            WindCategory::Gale => "gale",
            WindCategory::StrongGale => "strong gale",
            WindCategory::Storm => "storm",
            WindCategory::ViolentStorm => "violent storm",
            WindCategory::Hurricane => "hurricane",
        };
        f.write_str(label)
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl fmt::Display for WindDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.gust {
            Some(gust) => write!(
                f,
                "{} {}-{} {} {}",
                self.category, self.speed, gust, self.unit, self.direction
            ),
            None => write!(f, "{} {} {} {}", self.category, self.speed, self.unit, self.direction),
        }
    }
}
