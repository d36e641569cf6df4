//! Debounced health refresh: fetch history, reduce, persist, cascade
//! (PRD-03).

use canopy_core::health::{
    compute_status, HealthStatus, ZoneSample, CONSECUTIVE_READINGS_THRESHOLD,
};
use canopy_core::types::DbId;
use canopy_core::zone::Zone;
use canopy_db::repositories::{ReadingRepo, SensorHealthRepo, SensorRepo};
use canopy_db::DbPool;
use canopy_events::CascadeNotifier;
use chrono::Utc;
use tokio_util::sync::CancellationToken;

use crate::error::PipelineError;

/// Recompute and persist a sensor's debounced health status.
///
/// The status is a pure function of persisted history, so concurrent
/// refreshes for the same sensor are safe to run redundantly; the health
/// row is last-write-wins. The cascade (status event + device alert
/// trigger) fires only on an actual transition.
///
/// Store failures propagate and leave the previous health record in
/// place — stale-but-present is an accepted degraded state.
pub async fn refresh(
    pool: &DbPool,
    cascade: &CascadeNotifier,
    sensor_id: DbId,
    cancel: &CancellationToken,
) -> Result<HealthStatus, PipelineError> {
    let sensor = SensorRepo::get_by_id(pool, sensor_id)
        .await?
        .ok_or(PipelineError::SensorNotFound(sensor_id))?;

    // Readings that predate the sensor's provisioning never count.
    let rows = ReadingRepo::recent_zones(
        pool,
        sensor_id,
        sensor.created_at,
        CONSECUTIVE_READINGS_THRESHOLD as i64,
    )
    .await?;

    let samples: Vec<ZoneSample> = rows
        .iter()
        .map(|r| ZoneSample {
            zone: Zone::parse(&r.zone).unwrap_or(Zone::OutOfRange),
            recorded_at: r.recorded_at,
        })
        .collect();

    let status = compute_status(&samples, Utc::now());

    let previous = SensorHealthRepo::get_for_sensor(pool, sensor_id)
        .await?
        .and_then(|h| HealthStatus::parse(&h.status));

    tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(PipelineError::Cancelled),
        result = SensorHealthRepo::set_status(pool, sensor_id, status.as_str()) => {
            result?;
        }
    }

    if previous != Some(status) {
        let old = previous.unwrap_or(HealthStatus::NoData);
        tracing::info!(
            sensor_id,
            old = %old,
            new = %status,
            "Sensor health status changed"
        );
        cascade.status_changed(sensor_id, sensor.device_id, old, status);
    }

    Ok(status)
}
