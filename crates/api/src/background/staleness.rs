//! Periodic staleness sweep over sensor health (PRD-03).
//!
//! A sensor that silently stops reporting would otherwise keep its last
//! computed status until something happened to call refresh. This task
//! re-runs the health refresh for sensors whose newest reading has aged
//! past the reading timeout, so they surface as `no_data` on their own.

use std::sync::Arc;
use std::time::Duration;

use canopy_core::health::READING_TIMEOUT;
use canopy_db::repositories::SensorRepo;
use canopy_db::DbPool;
use canopy_events::CascadeNotifier;
use chrono::Utc;
use tokio_util::sync::CancellationToken;

/// Default sweep interval: one minute.
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

/// Run the staleness sweep loop.
///
/// Sweeps every `STALENESS_SWEEP_INTERVAL_SECS` seconds (defaults to 60).
/// Runs until `cancel` is triggered.
pub async fn run(pool: DbPool, cascade: Arc<CascadeNotifier>, cancel: CancellationToken) {
    let interval_secs: u64 = std::env::var("STALENESS_SWEEP_INTERVAL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_SWEEP_INTERVAL_SECS);

    tracing::info!(interval_secs, "Staleness sweep started");

    let mut interval = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Staleness sweep stopping");
                break;
            }
            _ = interval.tick() => {
                sweep_once(&pool, &cascade, &cancel).await;
            }
        }
    }
}

/// Run one sweep: find candidates and refresh each.
async fn sweep_once(pool: &DbPool, cascade: &CascadeNotifier, cancel: &CancellationToken) {
    let cutoff =
        Utc::now() - chrono::Duration::from_std(READING_TIMEOUT).expect("valid duration");

    let candidates = match SensorRepo::list_stale_candidates(pool, cutoff).await {
        Ok(ids) => ids,
        Err(e) => {
            tracing::error!(error = %e, "Staleness sweep query failed");
            return;
        }
    };

    if candidates.is_empty() {
        tracing::debug!("Staleness sweep: nothing to refresh");
        return;
    }

    for sensor_id in candidates {
        match canopy_pipeline::refresh(pool, cascade, sensor_id, cancel).await {
            Ok(status) => {
                tracing::debug!(sensor_id, status = %status, "Staleness sweep refreshed sensor");
            }
            Err(e) => {
                tracing::error!(sensor_id, error = %e, "Staleness sweep refresh failed");
            }
        }
    }
}
