//! Measurement unit preference

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::DomainError;

/// Unit system for temperature, wind speed, and precipitation formatting
///
/// Affects formatting only; the same provider endpoints are called for
/// either system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Celsius, km/h, millimetres (default)
    #[default]
    Metric,
    /// Fahrenheit, mph, inches
    Imperial,
}

impl UnitSystem {
    /// The value the upstream provider expects in its `units` parameter
    #[must_use]
    pub const fn as_provider_param(self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_provider_param())
    }
}

impl std::str::FromStr for UnitSystem {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" => Ok(Self::Metric),
            "imperial" => Ok(Self::Imperial),
            other => Err(DomainError::InvalidUnitSystem(other.to_string())),
        }
    }
}
