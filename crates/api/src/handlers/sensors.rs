//! Handlers for sensor provisioning and health (PRD-03).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use canopy_core::error::CoreError;
use canopy_core::health::HealthStatus;
use canopy_core::types::DbId;
use canopy_db::models::sensor::{CreateSensor, Sensor, SensorWithHealth};
use canopy_db::models::sensor_health::SensorHealth;
use canopy_db::repositories::{DeviceRepo, SensorHealthRepo, SensorRepo, SensorTypeRepo};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Response body for the forced health refresh endpoint.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub sensor_id: DbId,
    pub status: HealthStatus,
}

/// GET /sensors
///
/// List all sensors with their type and current health record.
pub async fn list_sensors(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SensorWithHealth>>>> {
    let sensors = SensorRepo::list_with_health(&state.pool).await?;
    Ok(Json(DataResponse { data: sensors }))
}

/// POST /sensors
///
/// Provision a sensor instance on a device. The initial `no_data` health
/// row is created in the same call, so every sensor has exactly one
/// health record from the moment it exists.
pub async fn provision_sensor(
    State(state): State<AppState>,
    Json(input): Json<CreateSensor>,
) -> AppResult<(StatusCode, Json<DataResponse<Sensor>>)> {
    DeviceRepo::get_by_id(&state.pool, input.device_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "device",
            id: input.device_id,
        }))?;

    SensorTypeRepo::get_by_id(&state.pool, input.sensor_type_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "sensor_type",
            id: input.sensor_type_id,
        }))?;

    let sensor = SensorRepo::insert(&state.pool, &input).await?;
    SensorHealthRepo::create_for_sensor(&state.pool, sensor.id).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: sensor })))
}

/// GET /sensors/{id}/health
///
/// Get the current health record for a sensor.
pub async fn get_sensor_health(
    State(state): State<AppState>,
    Path(sensor_id): Path<DbId>,
) -> AppResult<Json<DataResponse<SensorHealth>>> {
    let record = SensorHealthRepo::get_for_sensor(&state.pool, sensor_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "sensor",
            id: sensor_id,
        }))?;
    Ok(Json(DataResponse { data: record }))
}

/// POST /sensors/{id}/health/refresh
///
/// Force a health recomputation from persisted history. Safe to call
/// redundantly; an unchanged status emits no event.
pub async fn refresh_sensor_health(
    State(state): State<AppState>,
    Path(sensor_id): Path<DbId>,
) -> AppResult<Json<DataResponse<RefreshResponse>>> {
    let status = canopy_pipeline::refresh(
        &state.pool,
        &state.cascade,
        sensor_id,
        &CancellationToken::new(),
    )
    .await?;

    Ok(Json(DataResponse {
        data: RefreshResponse { sensor_id, status },
    }))
}
