use std::sync::Arc;

use anyhow::Result;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use chrono::Weekday;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    aggregator::{aggregate, collect_sequential},
    calendar::weekdays_between,
    config::RangeConfig,
    models::{AggregationOutcome, DateToken, ForecastRecord},
    weather::ObservationSource,
};

/// Shared handler state, cloned per request
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn ObservationSource>,
    pub start_year: i32,
    pub end_year: i32,
    pub weekday: Weekday,
    pub max_concurrency: usize,
}

impl AppState {
    pub fn new(
        source: Arc<dyn ObservationSource>,
        range: &RangeConfig,
        max_concurrency: usize,
    ) -> Result<Self> {
        Ok(Self {
            source,
            start_year: range.start_year,
            end_year: range.end_year,
            weekday: range.weekday()?,
            max_concurrency,
        })
    }

    fn dates(&self) -> Vec<DateToken> {
        weekdays_between(self.start_year, self.end_year, self.weekday)
    }
}

#[derive(Serialize)]
pub struct ApiError {
    pub error: String,
}

#[derive(Serialize)]
pub struct PartialForecasts {
    pub forecasts: Vec<ForecastRecord>,
    pub errors: Vec<String>,
    pub message: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/status", get(get_status))
        .route("/weather", get(get_weather))
        .route("/weatherg", get(get_weather_concurrent))
        .with_state(state)
}

async fn get_status(State(state): State<AppState>) -> String {
    let dates = state.dates();
    debug!(
        "{} from {} to {}: {}",
        weekday_plural(state.weekday),
        state.start_year,
        state.end_year,
        dates
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );

    format!(
        "Total {} from {} to {}: {}\n",
        weekday_plural(state.weekday),
        state.start_year,
        state.end_year,
        dates.len()
    )
}

async fn get_weather(
    State(state): State<AppState>,
) -> Result<Json<Vec<ForecastRecord>>, (StatusCode, Json<ApiError>)> {
    let dates = state.dates();
    info!("Fetching {} dates sequentially", dates.len());

    match collect_sequential(state.source.as_ref(), &dates).await {
        Ok(records) => Ok(Json(records)),
        Err(failure) => {
            warn!("Sequential fetch aborted: {}", failure);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError {
                    error: failure.terse_message(),
                }),
            ))
        }
    }
}

async fn get_weather_concurrent(State(state): State<AppState>) -> Response {
    let dates = state.dates();
    info!(
        "Fetching {} dates with up to {} in flight",
        dates.len(),
        state.max_concurrency
    );

    let result = aggregate(Arc::clone(&state.source), &dates, state.max_concurrency).await;

    match result.outcome() {
        AggregationOutcome::Complete => (StatusCode::OK, Json(result.records)).into_response(),
        AggregationOutcome::Partial => {
            let message = result.summary();
            let errors = result.failures.iter().map(ToString::to_string).collect();
            (
                StatusCode::PARTIAL_CONTENT,
                Json(PartialForecasts {
                    forecasts: result.records,
                    errors,
                    message,
                }),
            )
                .into_response()
        }
    }
}

fn weekday_plural(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mondays",
        Weekday::Tue => "Tuesdays",
        Weekday::Wed => "Wednesdays",
        Weekday::Thu => "Thursdays",
        Weekday::Fri => "Fridays",
        Weekday::Sat => "Saturdays",
        Weekday::Sun => "Sundays",
    }
}
