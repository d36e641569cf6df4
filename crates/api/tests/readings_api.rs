//! Integration tests for the reading ingestion and history endpoints.
//!
//! Tests cover:
//! - Happy-path ingest (201, stamped zone, post-ingest health refresh)
//! - Typed validation errors (missing value, future timestamp, absolute
//!   range) and that rejections persist nothing
//! - Unknown-sensor handling
//! - History query parameter validation

mod common;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use canopy_db::repositories::ReadingRepo;

/// Build a JSON POST request for the ingestion endpoint.
fn ingest_request(payload: &serde_json::Value) -> Request<Body> {
    Request::post("/api/v1/readings")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

/// Collect a response body into JSON.
async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn ingest_returns_created_with_stamped_zone(pool: PgPool) {
    let sensor_id = common::seed_temperature_sensor(&pool).await;
    let app = common::build_test_app(pool.clone());

    let payload = serde_json::json!({
        "sensor_id": sensor_id,
        "value": 20.0,
        "recorded_at": Utc::now(),
    });
    let response = app.oneshot(ingest_request(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["data"]["zone"], "normal");
    assert_eq!(body["data"]["value"], 20.0);

    // The post-ingest refresh must have landed in the health record.
    let health: (String,) =
        sqlx::query_as("SELECT status FROM sensor_health WHERE sensor_id = $1")
            .bind(sensor_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(health.0, "ok");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_value_returns_typed_error(pool: PgPool) {
    let sensor_id = common::seed_temperature_sensor(&pool).await;
    let app = common::build_test_app(pool.clone());

    let payload = serde_json::json!({
        "sensor_id": sensor_id,
        "value": null,
        "recorded_at": Utc::now(),
    });
    let response = app.oneshot(ingest_request(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "MISSING_VALUE");

    assert_eq!(ReadingRepo::count_for_sensor(&pool, sensor_id).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn future_timestamp_returns_typed_error(pool: PgPool) {
    let sensor_id = common::seed_temperature_sensor(&pool).await;
    let app = common::build_test_app(pool.clone());

    let payload = serde_json::json!({
        "sensor_id": sensor_id,
        "value": 20.0,
        "recorded_at": Utc::now() + Duration::hours(1),
    });
    let response = app.oneshot(ingest_request(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "FUTURE_TIMESTAMP");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn out_of_absolute_range_returns_typed_error(pool: PgPool) {
    let sensor_id = common::seed_temperature_sensor(&pool).await;
    let app = common::build_test_app(pool.clone());

    let payload = serde_json::json!({
        "sensor_id": sensor_id,
        "value": 150.0,
        "recorded_at": Utc::now(),
    });
    let response = app.oneshot(ingest_request(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "OUT_OF_ABSOLUTE_RANGE");

    assert_eq!(ReadingRepo::count_for_sensor(&pool, sensor_id).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_sensor_returns_not_found(pool: PgPool) {
    let app = common::build_test_app(pool);

    let payload = serde_json::json!({
        "sensor_id": 9999,
        "value": 20.0,
        "recorded_at": Utc::now(),
    });
    let response = app.oneshot(ingest_request(&payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn history_returns_newest_first(pool: PgPool) {
    let sensor_id = common::seed_temperature_sensor(&pool).await;
    let app = common::build_test_app(pool.clone());

    let now = Utc::now();
    for (value, mins_ago) in [(18.0, 3), (20.0, 2), (25.0, 1)] {
        let payload = serde_json::json!({
            "sensor_id": sensor_id,
            "value": value,
            "recorded_at": now - Duration::minutes(mins_ago),
        });
        let response = app
            .clone()
            .oneshot(ingest_request(&payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(
            Request::get(format!("/api/v1/sensors/{sensor_id}/readings?hours=2"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 3);
    assert_eq!(data[0]["value"], 25.0);
    assert_eq!(data[0]["zone"], "warning_high");
    assert_eq!(data[2]["value"], 18.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn history_rejects_out_of_range_hours(pool: PgPool) {
    let sensor_id = common::seed_temperature_sensor(&pool).await;
    let app = common::build_test_app(pool);

    let response = app
        .oneshot(
            Request::get(format!("/api/v1/sensors/{sensor_id}/readings?hours=0"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
