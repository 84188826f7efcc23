//! HTTP routes driven through the axum router

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use common::{service_with, tallinn_history};
use delivery_fee::web;

async fn get(uri: &str) -> (StatusCode, Value) {
    let app = web::app(service_with(tallinn_history()));
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_latest_fee() {
    let (status, body) = get("/api/delivery-fee?station=26038&vehicle=bike").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["station"], 26038);
    assert_eq!(body["vehicle"], "bike");
    assert_eq!(body["fee"], 4.0);
    assert_eq!(body["display"], "4.0 €");
}

#[tokio::test]
async fn test_fee_at_local_date() {
    let (status, body) =
        get("/api/delivery-fee?station=26038&vehicle=Bike&date=2023-06-16T14:09").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fee"], 3.5);
}

#[tokio::test]
async fn test_empty_date_means_latest() {
    let (status, body) = get("/api/delivery-fee?station=26038&vehicle=car&date=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fee"], 4.0);
}

#[tokio::test]
async fn test_forbidden_vehicle() {
    let (status, body) =
        get("/api/delivery-fee?station=26038&vehicle=bike&date=2023-07-15T11:30").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "Usage of selected vehicle type is forbidden");
}

#[tokio::test]
async fn test_unknown_station() {
    let (status, body) = get("/api/delivery-fee?station=26058&vehicle=car").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Cant find Station");
}

#[tokio::test]
async fn test_unknown_vehicle() {
    let (status, _) = get("/api/delivery-fee?station=26038&vehicle=truck").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_parameter_uses_json_error() {
    let (status, body) = get("/api/delivery-fee?station=26038").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("vehicle"));
}

#[tokio::test]
async fn test_future_date_is_rejected() {
    let (status, body) =
        get("/api/delivery-fee?station=26038&vehicle=car&date=2999-01-01T00:00").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Please do not select a future date");
}

#[tokio::test]
async fn test_no_weather_close_to_date() {
    let (status, body) =
        get("/api/delivery-fee?station=26038&vehicle=car&date=2023-06-17T17:01").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["error"],
        "There is no weather data close enough to the chosen date"
    );
}

#[tokio::test]
async fn test_station_without_reports() {
    let (status, body) = get("/api/delivery-fee?station=41803&vehicle=car").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Did not find weather report!");
}

#[tokio::test]
async fn test_station_catalog() {
    let (status, body) = get("/api/stations").await;
    assert_eq!(status, StatusCode::OK);

    let stations = body.as_array().unwrap();
    assert_eq!(stations.len(), 3);
    assert_eq!(stations[0]["code"], 26038);
    assert_eq!(stations[0]["name"], "Tallinn-Harku");
    assert_eq!(stations[0]["base_fees"][0]["vehicle"], "car");
    assert_eq!(stations[0]["base_fees"][0]["fee"], 4.0);
    assert_eq!(stations[2]["base_fees"][2]["fee"], 2.0);
}
