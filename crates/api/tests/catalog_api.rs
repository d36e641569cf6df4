//! Integration tests for the sensor-type catalog endpoints.

mod common;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a JSON POST request for the catalog endpoint.
fn create_request(payload: &serde_json::Value) -> Request<Body> {
    Request::post("/api/v1/sensor-types")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

/// Collect a response body into JSON.
async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn co2_payload() -> serde_json::Value {
    serde_json::json!({
        "name": "co2",
        "unit": "ppm",
        "min_value": 0.0,
        "max_value": 5000.0,
        "error_low_min": 0.0,
        "error_low_max": 199.0,
        "warning_low_min": 200.0,
        "warning_low_max": 399.0,
        "normal_min": 400.0,
        "normal_max": 1200.0,
        "warning_high_min": 1201.0,
        "warning_high_max": 2000.0,
        "error_high_min": 2001.0,
        "error_high_max": 5000.0,
    })
}

#[sqlx::test(migrations = "../db/migrations")]
async fn seeded_catalog_is_listed(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = app
        .oneshot(
            Request::get("/api/v1/sensor-types")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["ec", "humidity", "ph", "pressure", "temperature"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn creating_a_valid_type_succeeds(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = app.oneshot(create_request(&co2_payload())).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["data"]["name"], "co2");
    assert_eq!(body["data"]["unit"], "ppm");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn inverted_band_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let mut payload = co2_payload();
    payload["normal_min"] = serde_json::json!(1200.0);
    payload["normal_max"] = serde_json::json!(400.0);

    let response = app.oneshot(create_request(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_name_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);

    let mut payload = co2_payload();
    payload["name"] = serde_json::json!("temperature"); // already seeded

    let response = app.oneshot(create_request(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}
