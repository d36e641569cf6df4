//! Route definitions for device registration.

use axum::routing::get;
use axum::Router;

use crate::handlers::devices;
use crate::state::AppState;

/// Device routes.
///
/// ```text
/// GET  /devices    -> list_devices
/// POST /devices    -> register_device
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/devices",
        get(devices::list_devices).post(devices::register_device),
    )
}
