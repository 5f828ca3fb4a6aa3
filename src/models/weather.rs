//! Current-conditions measurements and unit conversion

use serde::{Deserialize, Serialize};

/// Conditions observed at the requested time of day
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct CurrentConditions {
    /// Temperature in the provider's native unit (Fahrenheit)
    #[serde(rename = "temp")]
    pub temp_f: f64,
    /// Temperature in Celsius, always derived from `temp_f`
    #[serde(rename = "tempC", default)]
    pub temp_c: f64,
    /// Observation time as reported by the provider (`HH:MM:SS`)
    #[serde(default)]
    pub datetime: Option<String>,
    /// Relative humidity in percent
    #[serde(default)]
    pub humidity: f64,
    /// Human-readable description of weather conditions
    #[serde(default)]
    pub conditions: String,
}

impl CurrentConditions {
    /// Convert temperature from Fahrenheit to Celsius
    #[must_use]
    pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
        (fahrenheit - 32.0) * 5.0 / 9.0
    }

    /// Recompute the derived Celsius temperature
    pub fn normalize(&mut self) {
        self.temp_c = Self::fahrenheit_to_celsius(self.temp_f);
    }

    /// Format temperature with both units
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1}°F ({:.1}°C)", self.temp_f, self.temp_c)
    }
}
