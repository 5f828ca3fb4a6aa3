//! Fan-out of single-date fetches over a list of dates
//!
//! [`aggregate`] runs one task per date behind a counting semaphore and
//! isolates per-date failures. [`collect_sequential`] walks the dates in order
//! and stops at the first failure.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use tokio::sync::Semaphore;
use tracing::{debug, error, info, instrument, warn};

use crate::models::{AggregationResult, DateToken, FailureStage, FetchFailure, ForecastRecord};
use crate::weather::ObservationSource;

/// Fetch every date with at most `max_concurrency` requests in flight.
///
/// Returns once every task has finished. Records and failures are in
/// completion order; every input date ends up in exactly one of them.
/// A `max_concurrency` of 0 is treated as 1.
#[instrument(skip_all, fields(dates = dates.len(), max_concurrency = max_concurrency))]
pub async fn aggregate(
    source: Arc<dyn ObservationSource>,
    dates: &[DateToken],
    max_concurrency: usize,
) -> AggregationResult {
    let start_time = Instant::now();
    let gate = Arc::new(Semaphore::new(max_concurrency.max(1)));
    let collected = Arc::new(Mutex::new(AggregationResult::default()));

    let mut tasks = Vec::with_capacity(dates.len());
    for &date in dates {
        let source = Arc::clone(&source);
        let gate = Arc::clone(&gate);
        let collected = Arc::clone(&collected);

        let handle = tokio::spawn(async move {
            let outcome = match gate.acquire().await {
                Ok(_permit) => source.fetch(&date).await,
                Err(e) => Err(FetchFailure::new(date, FailureStage::Task, e.to_string())),
            };

            let mut collected = collected.lock().unwrap_or_else(PoisonError::into_inner);
            match outcome {
                Ok(record) => collected.records.push(record),
                Err(failure) => {
                    warn!("{}", failure);
                    collected.failures.push(failure);
                }
            }
        });
        tasks.push((date, handle));
    }

    let (dates, handles): (Vec<_>, Vec<_>) = tasks.into_iter().unzip();
    let joined = futures::future::join_all(handles).await;

    let mut result =
        std::mem::take(&mut *collected.lock().unwrap_or_else(PoisonError::into_inner));

    // A task that died before reporting still has to be accounted for
    for (date, outcome) in dates.into_iter().zip(joined) {
        if let Err(e) = outcome {
            error!("Fetch task for {} did not complete: {}", date, e);
            result
                .failures
                .push(FetchFailure::new(date, FailureStage::Task, e.to_string()));
        }
    }

    info!(
        "Aggregated {} dates in {:.3}s ({})",
        result.len(),
        start_time.elapsed().as_secs_f64(),
        result.summary()
    );
    result
}

/// Fetch dates one after another, aborting on the first failure
#[instrument(skip_all, fields(dates = dates.len()))]
pub async fn collect_sequential(
    source: &dyn ObservationSource,
    dates: &[DateToken],
) -> Result<Vec<ForecastRecord>, FetchFailure> {
    let mut records = Vec::with_capacity(dates.len());
    for date in dates {
        let record = source.fetch(date).await?;
        debug!("Collected {} ({}/{})", date, records.len() + 1, dates.len());
        records.push(record);
    }
    Ok(records)
}
