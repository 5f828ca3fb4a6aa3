//! Shared test doubles

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Datelike;
use thursday_weather::ObservationSource;
use thursday_weather::models::{
    CurrentConditions, DateToken, FetchFailure, ForecastRecord, Location,
};

/// In-memory weather backend with injectable failures and latency.
/// Tracks how many fetches are in flight at once.
pub struct MockSource {
    failing: HashSet<DateToken>,
    delay: Duration,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    calls: AtomicUsize,
}

impl MockSource {
    pub fn new() -> Self {
        Self {
            failing: HashSet::new(),
            delay: Duration::ZERO,
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing<I: IntoIterator<Item = DateToken>>(mut self, dates: I) -> Self {
        self.failing.extend(dates);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Deterministic temperature per date so reruns can be compared
    pub fn fahrenheit_for(date: &DateToken) -> f64 {
        f64::from(date.date().ordinal()) / 4.0
    }
}

#[async_trait]
impl ObservationSource for MockSource {
    async fn fetch(&self, date: &DateToken) -> Result<ForecastRecord, FetchFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(date) {
            return Err(FetchFailure::network(*date, "connection refused"));
        }

        Ok(ForecastRecord::new(
            Location::new(
                "Sankt-Peterburg".to_string(),
                59.9391,
                30.3159,
                "Europe/Moscow".to_string(),
            ),
            *date,
            CurrentConditions {
                temp_f: Self::fahrenheit_for(date),
                temp_c: 0.0,
                datetime: Some("15:00:00".to_string()),
                humidity: 80.0,
                conditions: "Overcast".to_string(),
            },
        ))
    }
}

pub fn dates(raw: &[&str]) -> Vec<DateToken> {
    raw.iter().map(|d| d.parse().unwrap()).collect()
}
