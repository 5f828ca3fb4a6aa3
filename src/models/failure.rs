//! Classified failure of a single date fetch

use serde::Serialize;
use thiserror::Error;

use super::DateToken;

/// Stage of the fetch at which a date failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    /// Transport error while sending the request
    Network,
    /// Provider answered with a non-success HTTP status
    Status,
    /// Error while reading the response body
    Read,
    /// Body was not valid JSON or did not have the expected shape
    Parse,
    /// The worker task ended before reporting an outcome
    Task,
}

impl FailureStage {
    fn describe(self) -> &'static str {
        match self {
            FailureStage::Network => "Failed to fetch weather data",
            FailureStage::Status => "Weather provider rejected request",
            FailureStage::Read => "Failed to read response",
            FailureStage::Parse => "Failed to parse weather data",
            FailureStage::Task => "Fetch task aborted",
        }
    }
}

/// One failed fetch attempt
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("{} for date {date}: {cause}", .stage.describe())]
pub struct FetchFailure {
    pub date: DateToken,
    pub stage: FailureStage,
    pub cause: String,
}

impl FetchFailure {
    pub fn new<S: Into<String>>(date: DateToken, stage: FailureStage, cause: S) -> Self {
        Self {
            date,
            stage,
            cause: cause.into(),
        }
    }

    pub fn network<S: Into<String>>(date: DateToken, cause: S) -> Self {
        Self::new(date, FailureStage::Network, cause)
    }

    pub fn status<S: Into<String>>(date: DateToken, cause: S) -> Self {
        Self::new(date, FailureStage::Status, cause)
    }

    pub fn read<S: Into<String>>(date: DateToken, cause: S) -> Self {
        Self::new(date, FailureStage::Read, cause)
    }

    pub fn parse<S: Into<String>>(date: DateToken, cause: S) -> Self {
        Self::new(date, FailureStage::Parse, cause)
    }

    /// Message naming the stage and date but not the underlying cause
    #[must_use]
    pub fn terse_message(&self) -> String {
        format!("{} for date {}", self.stage.describe(), self.date)
    }
}
