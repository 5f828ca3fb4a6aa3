//! Weather observation sources
//!
//! An [`ObservationSource`] turns one requested date into a normalized
//! [`ForecastRecord`] or a classified [`FetchFailure`].

use async_trait::async_trait;

use crate::models::{DateToken, FetchFailure, ForecastRecord};

pub mod visual_crossing;

pub use visual_crossing::VisualCrossingClient;

#[async_trait]
pub trait ObservationSource: Send + Sync {
    /// Fetch the observation for a single date. Exactly one upstream
    /// request, no retries.
    async fn fetch(&self, date: &DateToken) -> Result<ForecastRecord, FetchFailure>;
}
