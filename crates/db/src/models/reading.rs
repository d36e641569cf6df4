//! Reading entity and DTOs (PRD-02).

use canopy_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// One immutable observed fact: a sensor produced `value` at
/// `recorded_at`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Reading {
    pub id: DbId,
    pub sensor_id: DbId,
    pub value: f64,
    pub recorded_at: Timestamp,
    /// Zone stamped at ingest from the owning sensor's type definition;
    /// never recomputed afterwards.
    pub zone: String,
    pub created_at: Timestamp,
}

/// DTO for inserting a reading with its stamped zone.
///
/// Built by the ingest pipeline after validation and classification —
/// it never crosses the API boundary directly.
#[derive(Debug, Clone)]
pub struct CreateReading {
    pub sensor_id: DbId,
    pub value: f64,
    pub recorded_at: Timestamp,
    pub zone: String,
}

/// Projection consumed by the health reducer: stamped zone and timestamp
/// only.
#[derive(Debug, Clone, FromRow)]
pub struct ReadingZone {
    pub zone: String,
    pub recorded_at: Timestamp,
}
