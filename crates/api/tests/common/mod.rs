use std::sync::Arc;
use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, StatusCode};
use axum::Router;
use sqlx::PgPool;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use canopy_api::config::ServerConfig;
use canopy_api::routes;
use canopy_api::state::AppState;
use canopy_db::models::device::CreateDevice;
use canopy_db::models::sensor::CreateSensor;
use canopy_db::repositories::{DeviceRepo, SensorHealthRepo, SensorRepo, SensorTypeRepo};
use canopy_events::{CascadeNotifier, EventBus, NoopAggregator};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        alert_aggregator_url: None,
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout,
/// tracing, panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let event_bus = Arc::new(EventBus::default());
    let cascade = Arc::new(CascadeNotifier::new(
        Arc::clone(&event_bus),
        Arc::new(NoopAggregator),
    ));

    let state = AppState {
        pool,
        config: Arc::new(config),
        cascade,
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// Provision a device with one sensor of the seeded `temperature` type
/// and its initial health row. Returns the sensor id.
#[allow(dead_code)]
pub async fn seed_temperature_sensor(pool: &PgPool) -> i64 {
    let device = DeviceRepo::insert(
        pool,
        &CreateDevice {
            name: "greenhouse-a".to_string(),
            location: None,
        },
    )
    .await
    .expect("device insert should succeed");

    let sensor_type = SensorTypeRepo::get_by_name(pool, "temperature")
        .await
        .expect("catalog query should succeed")
        .expect("temperature type should be seeded");

    let sensor = SensorRepo::insert(
        pool,
        &CreateSensor {
            device_id: device.id,
            sensor_type_id: sensor_type.id,
            label: Some("air temp".to_string()),
        },
    )
    .await
    .expect("sensor insert should succeed");

    SensorHealthRepo::create_for_sensor(pool, sensor.id)
        .await
        .expect("health row insert should succeed");

    sensor.id
}
