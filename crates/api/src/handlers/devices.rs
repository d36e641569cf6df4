//! Handlers for device registration.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use canopy_core::error::CoreError;
use canopy_db::models::device::{CreateDevice, Device};
use canopy_db::repositories::DeviceRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /devices
///
/// List all registered devices.
pub async fn list_devices(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Device>>>> {
    let devices = DeviceRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: devices }))
}

/// POST /devices
///
/// Register a device.
pub async fn register_device(
    State(state): State<AppState>,
    Json(input): Json<CreateDevice>,
) -> AppResult<(StatusCode, Json<DataResponse<Device>>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name is required".to_string(),
        )));
    }

    let device = DeviceRepo::insert(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: device })))
}
