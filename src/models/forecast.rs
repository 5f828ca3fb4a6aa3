//! Normalized weather observation for a single requested date

use super::{CurrentConditions, DateToken, Location};
use serde::{Deserialize, Serialize};

/// One parsed, unit-converted weather observation
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastRecord {
    #[serde(flatten)]
    pub location: Location,
    /// The date this record was requested for
    #[serde(rename = "datetime")]
    pub date: DateToken,
    #[serde(rename = "currentConditions")]
    pub current_conditions: CurrentConditions,
}

impl ForecastRecord {
    /// Build a record stamped with the requested date and a freshly
    /// derived Celsius temperature
    #[must_use]
    pub fn new(location: Location, date: DateToken, mut current_conditions: CurrentConditions) -> Self {
        current_conditions.normalize();
        Self {
            location,
            date,
            current_conditions,
        }
    }

    #[must_use]
    pub fn temperature_fahrenheit(&self) -> f64 {
        self.current_conditions.temp_f
    }

    #[must_use]
    pub fn temperature_celsius(&self) -> f64 {
        self.current_conditions.temp_c
    }
}
