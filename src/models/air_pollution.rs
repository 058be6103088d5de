//! Air pollution record as delivered by the provider

use crate::air_quality::{PollutantReadings, Species};
use crate::models::provider::ProviderStatus;
use serde::{Deserialize, Serialize};

/// Air pollution answer for one coordinate
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AirPollution {
    #[serde(default)]
    pub list: Vec<AirPollutionEntry>,
}

/// One timestamped set of pollutant components
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AirPollutionEntry {
    pub dt: Option<i64>,
    #[serde(default)]
    pub components: Components,
}

/// Pollutant concentrations in µg/m³
///
/// Only NO2, PM10, O3 and PM2.5 feed the index; the other components are
/// kept so the record round-trips.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Components {
    pub co: Option<f64>,
    pub no: Option<f64>,
    pub no2: Option<f64>,
    pub o3: Option<f64>,
    pub so2: Option<f64>,
    pub pm2_5: Option<f64>,
    pub pm10: Option<f64>,
    pub nh3: Option<f64>,
}

impl Components {
    /// Concentration of a tracked species, if reported
    #[must_use]
    pub fn get(&self, species: Species) -> Option<f64> {
        match species {
            Species::No2 => self.no2,
            Species::Pm10 => self.pm10,
            Species::O3 => self.o3,
            Species::Pm25 => self.pm2_5,
        }
    }
}

impl AirPollution {
    /// Parse a provider response, rejecting provider error payloads first
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        ProviderStatus::from_json(&value).into_result()?;
        Ok(serde_json::from_value(value)?)
    }

    /// Readings from the first entry; absent species are left out
    #[must_use]
    pub fn readings(&self) -> PollutantReadings {
        let Some(entry) = self.list.first() else {
            return PollutantReadings::new();
        };
        Species::ALL
            .into_iter()
            .filter_map(|species| entry.components.get(species).map(|c| (species, c)))
            .collect()
    }
}
