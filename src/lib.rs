//! `thursday-weather` - historical Thursday weather for a fixed city
//!
//! This library enumerates the Thursdays of a year range, fetches the
//! observation for each from the Visual Crossing timeline API, and serves
//! the aggregated results over HTTP.

pub mod aggregator;
pub mod api;
pub mod calendar;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use aggregator::{aggregate, collect_sequential};
pub use calendar::{thursdays_between, weekdays_between};
pub use config::WeatherAppConfig;
pub use error::WeatherAppError;
pub use models::{AggregationOutcome, AggregationResult, DateToken, FetchFailure, ForecastRecord};
pub use weather::{ObservationSource, VisualCrossingClient};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
