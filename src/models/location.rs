//! Observed location as reported by the weather provider

use serde::{Deserialize, Serialize};

/// Resolved address and coordinates of an observation
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Location {
    /// Address the provider resolved the city to
    pub address: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// IANA timezone name, e.g. `Europe/Moscow`
    pub timezone: String,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(address: String, latitude: f64, longitude: f64, timezone: String) -> Self {
        Self {
            address,
            latitude,
            longitude,
            timezone,
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}
