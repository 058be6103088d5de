//! Detection of error payloads returned by the weather provider
//!
//! The provider answers failed lookups with a small JSON object such as
//! `{"cod": "404", "message": "city not found"}`. The `cod` field may be a
//! string or a number, and successful current-weather answers carry
//! `"cod": 200` while air pollution answers carry no code at all.

use crate::error::WeatherError;
use serde_json::Value;

/// Outcome reported inside a provider payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderStatus {
    Ok,
    Error { code: String, message: String },
}

impl ProviderStatus {
    /// Classify a raw provider JSON value
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let code = match value.get("cod") {
            Some(Value::Number(n)) => n.as_u64(),
            Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
            _ => None,
        };

        match code {
            Some(code) if code >= 400 => {
                let message = value
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown error")
                    .to_string();
                ProviderStatus::Error {
                    code: code.to_string(),
                    message,
                }
            }
            _ => ProviderStatus::Ok,
        }
    }

    /// Turn an error status into a [`WeatherError::Provider`]
    pub fn into_result(self) -> crate::Result<()> {
        match self {
            ProviderStatus::Ok => Ok(()),
            ProviderStatus::Error { code, message } => Err(WeatherError::provider(code, message)),
        }
    }
}
