//! Route definitions.

pub mod catalog;
pub mod devices;
pub mod health;
pub mod readings;
pub mod sensors;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /readings                        POST ingest one reading
///
/// /sensors                         GET list, POST provision
/// /sensors/{id}/readings           GET reading history
/// /sensors/{id}/health             GET current health record
/// /sensors/{id}/health/refresh     POST force recompute
///
/// /devices                         GET list, POST register
///
/// /sensor-types                    GET list, POST create
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(readings::router())
        .merge(sensors::router())
        .merge(devices::router())
        .merge(catalog::router())
}
