//! Outcome of one concurrent aggregation run

use serde::Serialize;

use super::{FetchFailure, ForecastRecord};

/// How a run should be reported to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationOutcome {
    /// Every date produced a record
    Complete,
    /// At least one date failed, possibly all of them
    Partial,
}

/// Records and failures collected by one aggregator run, in completion order
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregationResult {
    pub records: Vec<ForecastRecord>,
    pub failures: Vec<FetchFailure>,
}

impl AggregationResult {
    #[must_use]
    pub fn outcome(&self) -> AggregationOutcome {
        if self.failures.is_empty() {
            AggregationOutcome::Complete
        } else {
            AggregationOutcome::Partial
        }
    }

    /// Total number of dates accounted for
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len() + self.failures.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Success: {}, Failed: {}",
            self.records.len(),
            self.failures.len()
        )
    }
}
