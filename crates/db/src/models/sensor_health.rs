//! Sensor health record entity (PRD-03).

use canopy_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// The current debounced health status for one sensor instance.
///
/// Derived state over the sensor's reading history — a materialized
/// view, not a source of truth. Exactly one row per sensor; writes are
/// last-write-wins.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SensorHealth {
    pub id: DbId,
    pub sensor_id: DbId,
    pub status: String,
    pub last_computed_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
