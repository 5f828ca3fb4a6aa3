//! `VisualCrossingClient` against a local mock of the timeline API

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use thursday_weather::models::{DateToken, FailureStage};
use thursday_weather::{ObservationSource, VisualCrossingClient, aggregate};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const API_KEY: &str = "test-key";

async fn timeline(
    Path((city, datetime)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if params.get("key").map(String::as_str) != Some(API_KEY) {
        return (StatusCode::UNAUTHORIZED, "No account found with API key").into_response();
    }
    if params.get("include").map(String::as_str) != Some("current") {
        return (StatusCode::BAD_REQUEST, "include=current missing").into_response();
    }

    match datetime.as_str() {
        "2023-01-19T15:00:00" => (StatusCode::OK, "<html>not json</html>").into_response(),
        "2023-01-26T15:00:00" => Json(json!({ "address": city, "days": [] })).into_response(),
        _ => Json(json!({
            "address": city,
            "resolvedAddress": "Санкт-Петербург, Россия",
            "latitude": 59.9391,
            "longitude": 30.3159,
            "timezone": "Europe/Moscow",
            "datetime": "1970-01-01",
            "currentConditions": {
                "datetime": "15:00:00",
                "temp": 41.0,
                "humidity": 93.1,
                "conditions": "Overcast"
            }
        }))
        .into_response(),
    }
}

async fn spawn_provider() -> String {
    let app = Router::new().route("/timeline/{city}/{datetime}", get(timeline));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/timeline")
}

fn client(base_url: String, api_key: &str) -> VisualCrossingClient {
    VisualCrossingClient::with_client(
        reqwest::Client::new(),
        api_key.to_string(),
        base_url,
        "Sankt-Peterburg".to_string(),
    )
}

fn date(raw: &str) -> DateToken {
    raw.parse().unwrap()
}

#[tokio::test]
async fn test_fetch_success_stamps_requested_date() {
    let client = client(spawn_provider().await, API_KEY);

    let record = client.fetch(&date("2023-01-05")).await.unwrap();

    assert_eq!(record.date.to_string(), "2023-01-05");
    assert_eq!(record.location.address, "Sankt-Peterburg");
    assert_eq!(record.location.timezone, "Europe/Moscow");
    assert_eq!(record.current_conditions.conditions, "Overcast");
    assert!((record.temperature_celsius() - 5.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_fetch_rejected_key_is_status_failure() {
    let client = client(spawn_provider().await, "wrong-key");

    let failure = client.fetch(&date("2023-01-05")).await.unwrap_err();

    assert_eq!(failure.stage, FailureStage::Status);
    assert!(failure.cause.contains("401"));
    assert!(failure.cause.contains("No account found"));
    assert!(!failure.to_string().contains("wrong-key"));
}

#[tokio::test]
async fn test_fetch_invalid_json_is_parse_failure() {
    let client = client(spawn_provider().await, API_KEY);

    let failure = client.fetch(&date("2023-01-19")).await.unwrap_err();

    assert_eq!(failure.stage, FailureStage::Parse);
    assert_eq!(
        failure.terse_message(),
        "Failed to parse weather data for date 2023-01-19"
    );
}

#[tokio::test]
async fn test_fetch_missing_conditions_is_parse_failure() {
    let client = client(spawn_provider().await, API_KEY);

    let failure = client.fetch(&date("2023-01-26")).await.unwrap_err();

    assert_eq!(failure.stage, FailureStage::Parse);
    assert!(failure.cause.contains("currentConditions"));
}

#[tokio::test]
async fn test_fetch_connection_refused_is_network_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = client(format!("http://{addr}/timeline"), API_KEY);

    let failure = client.fetch(&date("2023-01-05")).await.unwrap_err();

    assert_eq!(failure.stage, FailureStage::Network);
    assert!(!failure.cause.contains(API_KEY));
}

/// Answers one request with a body shorter than its `Content-Length`
async fn spawn_truncating_provider() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 1024];
        let _ = socket.read(&mut request).await.unwrap();
        socket
            .write_all(
                b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 500\r\n\r\n{\"address\":",
            )
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });
    format!("http://{addr}/timeline")
}

#[tokio::test]
async fn test_fetch_truncated_body_is_read_failure() {
    let client = client(spawn_truncating_provider().await, API_KEY);

    let failure = client.fetch(&date("2023-01-05")).await.unwrap_err();

    assert_eq!(failure.stage, FailureStage::Read);
    assert_eq!(
        failure.terse_message(),
        "Failed to read response for date 2023-01-05"
    );
    assert!(!failure.cause.contains(API_KEY));
}

#[tokio::test]
async fn test_aggregate_over_real_client() {
    let client = Arc::new(client(spawn_provider().await, API_KEY));
    let input: Vec<DateToken> = ["2023-01-05", "2023-01-12", "2023-01-19", "2023-01-26"]
        .iter()
        .map(|d| date(d))
        .collect();

    let result = aggregate(client, &input, 2).await;

    assert_eq!(result.records.len(), 2);
    assert_eq!(result.failures.len(), 2);
    assert!(result.failures.iter().all(|f| f.stage == FailureStage::Parse));
    assert_eq!(result.summary(), "Success: 2, Failed: 2");
}
