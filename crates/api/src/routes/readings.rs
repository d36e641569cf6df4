//! Route definitions for reading ingestion and history (PRD-02).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::readings;
use crate::state::AppState;

/// Reading routes.
///
/// ```text
/// POST /readings                   -> ingest_reading
/// GET  /sensors/{id}/readings      -> get_sensor_readings
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/readings", post(readings::ingest_reading))
        .route(
            "/sensors/{id}/readings",
            get(readings::get_sensor_readings),
        )
}
