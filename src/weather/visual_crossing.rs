//! Visual Crossing timeline API client
//!
//! Requests the conditions at 15:00 local time for a single date and maps the
//! response onto [`ForecastRecord`].

use std::time::Instant;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument, warn};

use super::ObservationSource;
use crate::WeatherAppError;
use crate::config::WeatherConfig;
use crate::models::{DateToken, FetchFailure, ForecastRecord};

/// Time of day every observation is requested for
const OBSERVATION_TIME: &str = "T15:00:00";

/// Longest slice of an error body kept in a failure cause
const MAX_ERROR_BODY: usize = 200;

/// Client for a single city's timeline endpoint
#[derive(Debug, Clone)]
pub struct VisualCrossingClient {
    client: Client,
    api_key: String,
    base_url: String,
    city: String,
}

impl VisualCrossingClient {
    /// Create a client from the weather configuration
    pub fn new(config: &WeatherConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| WeatherAppError::config("Missing weather API key"))?;

        let mut builder = Client::builder()
            .user_agent(concat!("thursday-weather/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| WeatherAppError::api(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self::with_client(
            client,
            api_key,
            config.base_url.clone(),
            config.city.clone(),
        ))
    }

    #[must_use]
    pub fn with_client(client: Client, api_key: String, base_url: String, city: String) -> Self {
        Self {
            client,
            api_key,
            base_url,
            city,
        }
    }

    /// `<base>/<city>/<date>T15:00:00?key=<key>&include=current`
    #[must_use]
    pub fn request_url(&self, date: &DateToken) -> String {
        self.url_with_key(date, &urlencoding::encode(&self.api_key))
    }

    fn redacted_url(&self, date: &DateToken) -> String {
        self.url_with_key(date, "***")
    }

    fn url_with_key(&self, date: &DateToken, key: &str) -> String {
        format!(
            "{}/{}/{}{}?key={}&include=current",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&self.city),
            date,
            OBSERVATION_TIME,
            key
        )
    }
}

#[async_trait]
impl ObservationSource for VisualCrossingClient {
    #[instrument(skip_all, fields(date = %date))]
    async fn fetch(&self, date: &DateToken) -> Result<ForecastRecord, FetchFailure> {
        let start_time = Instant::now();
        debug!("Requesting {}", self.redacted_url(date));

        let response = self
            .client
            .get(self.request_url(date))
            .send()
            .await
            .map_err(|e| FetchFailure::network(*date, e.without_url().to_string()))?;

        let status = response.status();
        // Always drain the body so the connection goes back to the pool
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchFailure::read(*date, e.without_url().to_string()))?;

        if !status.is_success() {
            let text = String::from_utf8_lossy(&body);
            let text: String = text.trim().chars().take(MAX_ERROR_BODY).collect();
            warn!("Provider answered {} for {}", status, date);
            return Err(FetchFailure::status(*date, format!("HTTP {status}: {text}")));
        }

        let timeline: timeline::TimelineResponse = serde_json::from_slice(&body)
            .map_err(|e| FetchFailure::parse(*date, e.to_string()))?;
        let record = timeline.into_record(*date);

        debug!(
            "Fetched {} at {} ({}) in {:.3}s",
            date,
            record.location.format_coordinates(),
            record.current_conditions.format_temperature(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(record)
    }
}

/// Timeline API response structures
mod timeline {
    use serde::Deserialize;

    use crate::models::{CurrentConditions, DateToken, ForecastRecord, Location};

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TimelineResponse {
        #[serde(default)]
        pub address: String,
        #[serde(default)]
        pub latitude: f64,
        #[serde(default)]
        pub longitude: f64,
        #[serde(default)]
        pub timezone: String,
        pub current_conditions: CurrentConditions,
    }

    impl TimelineResponse {
        /// Stamp the requested date over whatever the provider reported
        pub fn into_record(self, date: DateToken) -> ForecastRecord {
            ForecastRecord::new(
                Location::new(self.address, self.latitude, self.longitude, self.timezone),
                date,
                self.current_conditions,
            )
        }
    }
}
