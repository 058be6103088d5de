//! Data models for the local weather engine
//!
//! This module contains the record shapes exchanged with the outside world:
//! - Units: Units systems and their labels
//! - Weather: Current weather response from the provider
//! - Air pollution: Pollutant components response from the provider
//! - Provider: Detection of provider error payloads

pub mod air_pollution;
pub mod provider;
pub mod units;
pub mod weather;

// Re-export all public types for convenient access
pub use air_pollution::{AirPollution, Components};
pub use provider::ProviderStatus;
pub use units::UnitsSystem;
pub use weather::CurrentWeather;
