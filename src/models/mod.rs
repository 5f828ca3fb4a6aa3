//! Data models for the Thursday weather service
//!
//! - DateToken: a requested calendar date
//! - Location / CurrentConditions / ForecastRecord: one normalized observation
//! - FetchFailure: a classified per-date failure
//! - AggregationResult: the outcome of one concurrent run

pub mod aggregation;
pub mod date_token;
pub mod failure;
pub mod forecast;
pub mod location;
pub mod weather;

pub use aggregation::{AggregationOutcome, AggregationResult};
pub use date_token::DateToken;
pub use failure::{FailureStage, FetchFailure};
pub use forecast::ForecastRecord;
pub use location::Location;
pub use weather::CurrentConditions;
