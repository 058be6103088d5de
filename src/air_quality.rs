//! Air Quality Index Engine
//!
//! Converts pollutant concentrations (µg/m³) into the European Common Air
//! Quality Index (CAQI). Each pollutant is mapped onto a 0-100 sub-index by
//! linear interpolation inside a breakpoint band; the aggregate index is the
//! worst of the four sub-indices.

use crate::error::WeatherError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Sub-index reported for any concentration above the highest band
pub const OVERFLOW_SUB_INDEX: u8 = 101;

/// Pollutant concentrations keyed by species, in µg/m³
pub type PollutantReadings = BTreeMap<Species, f64>;

/// Tracked pollutant species, in aggregation tie-break order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Species {
    #[serde(rename = "no2")]
    No2,
    #[serde(rename = "pm10")]
    Pm10,
    #[serde(rename = "o3")]
    O3,
    #[serde(rename = "pm2_5")]
    Pm25,
}

impl Species {
    /// All species in enumeration order
    pub const ALL: [Species; 4] = [Species::No2, Species::Pm10, Species::O3, Species::Pm25];

    /// Breakpoint bands for this species, ascending and contiguous
    #[must_use]
    pub fn bands(self) -> &'static [Band; 4] {
        match self {
            Species::No2 => &NO2_BANDS,
            Species::Pm10 => &PM10_BANDS,
            Species::O3 => &O3_BANDS,
            Species::Pm25 => &PM25_BANDS,
        }
    }

    /// Chemical symbol as shown to users
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Species::No2 => "NO2",
            Species::Pm10 => "PM10",
            Species::O3 => "O3",
            Species::Pm25 => "PM2.5",
        }
    }
}

/// One concentration band mapped onto an index range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub c_low: f64,
    pub c_high: f64,
    pub i_low: u8,
    pub i_high: u8,
}

const fn band(c_low: f64, c_high: f64, i_low: u8, i_high: u8) -> Band {
    Band {
        c_low,
        c_high,
        i_low,
        i_high,
    }
}

const NO2_BANDS: [Band; 4] = [
    band(0.0, 50.0, 0, 25),
    band(50.0, 100.0, 25, 50),
    band(100.0, 200.0, 50, 75),
    band(200.0, 400.0, 75, 100),
];

const PM10_BANDS: [Band; 4] = [
    band(0.0, 25.0, 0, 25),
    band(25.0, 50.0, 25, 50),
    band(50.0, 90.0, 50, 75),
    band(90.0, 180.0, 75, 100),
];

const O3_BANDS: [Band; 4] = [
    band(0.0, 60.0, 0, 25),
    band(60.0, 120.0, 25, 50),
    band(120.0, 180.0, 50, 75),
    band(180.0, 240.0, 75, 100),
];

const PM25_BANDS: [Band; 4] = [
    band(0.0, 15.0, 0, 25),
    band(15.0, 30.0, 25, 50),
    band(30.0, 55.0, 50, 75),
    band(55.0, 110.0, 75, 100),
];

impl Band {
    /// Interpolate the index for a concentration inside this band
    fn interpolate(&self, concentration: f64) -> u8 {
        let i_low = f64::from(self.i_low);
        let i_high = f64::from(self.i_high);
        let index = (i_high - i_low) / (self.c_high - self.c_low) * (concentration - self.c_low) + i_low;
        index.round() as u8
    }
}

/// One measured pollutant concentration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PollutantReading {
    pub species: Species,
    /// Concentration in µg/m³
    pub concentration: f64,
}

impl PollutantReading {
    #[must_use]
    pub fn new(species: Species, concentration: f64) -> Self {
        Self {
            species,
            concentration,
        }
    }

    /// Sub-index for this reading
    pub fn sub_index(&self) -> crate::Result<u8> {
        sub_index(self.species, self.concentration)
    }
}

/// Aggregate air quality category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AirQualityCategory {
    /// Index below 25
    VeryGood,
    /// 25-49
    Good,
    /// 50-74
    Medium,
    /// 75-100
    Bad,
    /// Above 100, only reachable through an overflowing sub-index
    VeryBad,
}

impl AirQualityCategory {
    /// Classify an aggregate index value
    #[must_use]
    pub fn from_index(index: u8) -> Self {
        match index {
            0..=24 => AirQualityCategory::VeryGood,
            25..=49 => AirQualityCategory::Good,
            50..=74 => AirQualityCategory::Medium,
            75..=100 => AirQualityCategory::Bad,
            _ => AirQualityCategory::VeryBad,
        }
    }
}

/// Aggregate of the four pollutant sub-indices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualitySummary {
    /// Species with the highest sub-index
    pub dominant: Species,
    /// Highest sub-index
    pub index: u8,
    pub category: AirQualityCategory,
    /// Every computed sub-index
    pub sub_indices: BTreeMap<Species, u8>,
}

impl AirQualitySummary {
    /// Whether the index comes from a concentration beyond every band
    #[must_use]
    pub fn is_overflow(&self) -> bool {
        self.index > 100
    }

    /// Short headline such as `37/100 GOOD (NO2)`
    #[must_use]
    pub fn headline(&self) -> String {
        let label = self.category.to_string().to_uppercase();
        if self.is_overflow() {
            format!(">100 {label} ({})", self.dominant)
        } else {
            format!("{}/100 {label} ({})", self.index, self.dominant)
        }
    }
}

/// Compute the sub-index of one pollutant concentration.
///
/// Band boundaries belong to the upper band (`c < c_high`), except the top
/// boundary of the last band, which is inclusive. Concentrations above every
/// band yield [`OVERFLOW_SUB_INDEX`].
///
/// # Errors
///
/// Returns [`WeatherError::InvalidMeasurement`] for negative or non-finite
/// concentrations.
pub fn sub_index(species: Species, concentration: f64) -> crate::Result<u8> {
    if !concentration.is_finite() || concentration < 0.0 {
        return Err(WeatherError::invalid_measurement(
            format!("{species} concentration"),
            concentration,
        ));
    }

    let bands = species.bands();
    let last = bands.len() - 1;
    let selected = bands.iter().enumerate().find(|(i, b)| {
        if *i == last {
            concentration <= b.c_high
        } else {
            concentration < b.c_high
        }
    });

    Ok(match selected {
        Some((_, band)) => band.interpolate(concentration),
        None => OVERFLOW_SUB_INDEX,
    })
}

/// Combine all four pollutant readings into an aggregate air quality.
///
/// The dominant species is the first one, in [`Species::ALL`] order, that
/// reaches the maximum sub-index.
///
/// # Errors
///
/// Returns [`WeatherError::IncompleteReading`] when a species is absent and
/// propagates [`WeatherError::InvalidMeasurement`] from [`sub_index`].
pub fn compute_air_quality(readings: &PollutantReadings) -> crate::Result<AirQualitySummary> {
    let missing: Vec<Species> = Species::ALL
        .into_iter()
        .filter(|s| !readings.contains_key(s))
        .collect();
    if !missing.is_empty() {
        return Err(WeatherError::incomplete_reading(missing));
    }

    let mut sub_indices = BTreeMap::new();
    let mut dominant = Species::No2;
    let mut index = 0;
    for (n, species) in Species::ALL.into_iter().enumerate() {
        let value = sub_index(species, readings[&species])?;
        if n == 0 || value > index {
            dominant = species;
            index = value;
        }
        sub_indices.insert(species, value);
    }

    Ok(AirQualitySummary {
        dominant,
        index,
        category: AirQualityCategory::from_index(index),
        sub_indices,
    })
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for AirQualityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AirQualityCategory::VeryGood => write!(f, "very good"),
            AirQualityCategory::Good => write!(f, "good"),
            AirQualityCategory::Medium => write!(f, "medium"),
            AirQualityCategory::Bad => write!(f, "bad"),
            AirQualityCategory::VeryBad => write!(f, "very bad"),
        }
    }
}
