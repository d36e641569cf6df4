//! Handlers for reading ingestion and history (PRD-02).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use canopy_core::types::{DbId, Timestamp};
use canopy_db::models::reading::Reading;
use canopy_db::repositories::ReadingRepo;
use canopy_pipeline::NewReading;
use chrono::{Duration, Utc};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for reading ingestion.
#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    pub sensor_id: DbId,
    /// Absent or null when the transport lost the measurement; the
    /// pipeline rejects it with `MISSING_VALUE`.
    #[serde(default)]
    pub value: Option<f64>,
    pub recorded_at: Timestamp,
}

/// Query parameters for the reading history endpoint.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// How many hours of history to return (default: 1).
    pub hours: Option<i64>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /readings
///
/// Ingest one reading: validate, classify, persist, broadcast. The
/// sensor's health is refreshed afterwards — the ordering (ingest →
/// broadcast → refresh → alert trigger) lives here, visible in one
/// place, rather than in entity lifecycle hooks.
pub async fn ingest_reading(
    State(state): State<AppState>,
    Json(input): Json<IngestRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Reading>>)> {
    let sensor_id = input.sensor_id;
    let cancel = CancellationToken::new();

    let reading = canopy_pipeline::ingest(
        &state.pool,
        &state.cascade,
        NewReading {
            sensor_id,
            value: input.value,
            recorded_at: input.recorded_at,
        },
        &cancel,
    )
    .await?;

    // The reading is durable at this point; a refresh failure must not
    // turn a committed ingest into a client-visible error.
    if let Err(e) = canopy_pipeline::refresh(&state.pool, &state.cascade, sensor_id, &cancel).await
    {
        tracing::warn!(sensor_id, error = %e, "Post-ingest health refresh failed");
    }

    Ok((StatusCode::CREATED, Json(DataResponse { data: reading })))
}

/// GET /sensors/{id}/readings
///
/// Get historical readings for a sensor, newest first.
pub async fn get_sensor_readings(
    State(state): State<AppState>,
    Path(sensor_id): Path<DbId>,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<DataResponse<Vec<Reading>>>> {
    let hours = query.hours.unwrap_or(1);
    if !(1..=168).contains(&hours) {
        return Err(AppError::BadRequest(
            "hours must be between 1 and 168".to_string(),
        ));
    }
    let since = Utc::now() - Duration::hours(hours);
    let readings = ReadingRepo::list_for_sensor(&state.pool, sensor_id, since).await?;
    Ok(Json(DataResponse { data: readings }))
}
