//! Route definitions for sensor provisioning and health (PRD-03).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::sensors;
use crate::state::AppState;

/// Sensor routes.
///
/// ```text
/// GET  /sensors                        -> list_sensors
/// POST /sensors                        -> provision_sensor
/// GET  /sensors/{id}/health            -> get_sensor_health
/// POST /sensors/{id}/health/refresh    -> refresh_sensor_health
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/sensors",
            get(sensors::list_sensors).post(sensors::provision_sensor),
        )
        .route("/sensors/{id}/health", get(sensors::get_sensor_health))
        .route(
            "/sensors/{id}/health/refresh",
            post(sensors::refresh_sensor_health),
        )
}
