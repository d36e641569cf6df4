//! Route definitions for the sensor-type catalog (PRD-01).

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Catalog routes.
///
/// ```text
/// GET  /sensor-types    -> list_sensor_types
/// POST /sensor-types    -> create_sensor_type
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/sensor-types",
        get(catalog::list_sensor_types).post(catalog::create_sensor_type),
    )
}
