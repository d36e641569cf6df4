//! Handlers for the sensor-type catalog (PRD-01).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use canopy_core::error::CoreError;
use canopy_db::models::sensor_type::{CreateSensorType, SensorType};
use canopy_db::repositories::SensorTypeRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /sensor-types
///
/// List the whole sensor-type catalog.
pub async fn list_sensor_types(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<SensorType>>>> {
    let types = SensorTypeRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: types }))
}

/// POST /sensor-types
///
/// Create a catalog entry. Definitions are validated here, at seed time,
/// because they are treated as immutable afterwards.
pub async fn create_sensor_type(
    State(state): State<AppState>,
    Json(input): Json<CreateSensorType>,
) -> AppResult<(StatusCode, Json<DataResponse<SensorType>>)> {
    validate_sensor_type(&input)?;
    let sensor_type = SensorTypeRepo::insert(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: sensor_type })))
}

/// Validate a catalog entry: non-empty identity, a sane absolute range,
/// and each band a well-formed closed interval.
///
/// Bands are not required to tile the absolute range — gaps are legal
/// and classify as `out_of_range` — so no adjacency check is made.
fn validate_sensor_type(input: &CreateSensorType) -> AppResult<()> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name is required".to_string(),
        )));
    }
    if input.unit.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "unit is required".to_string(),
        )));
    }
    if input.min_value >= input.max_value {
        return Err(AppError::Core(CoreError::Validation(
            "min_value must be less than max_value".to_string(),
        )));
    }

    let bands = [
        ("error_low", input.error_low_min, input.error_low_max),
        ("warning_low", input.warning_low_min, input.warning_low_max),
        ("normal", input.normal_min, input.normal_max),
        ("warning_high", input.warning_high_min, input.warning_high_max),
        ("error_high", input.error_high_min, input.error_high_max),
    ];
    for (name, low, high) in bands {
        if low > high {
            return Err(AppError::Core(CoreError::Validation(format!(
                "{name} band is inverted: {low} > {high}"
            ))));
        }
        if !low.is_finite() || !high.is_finite() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "{name} band bounds must be finite"
            ))));
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
