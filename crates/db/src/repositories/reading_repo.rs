//! Repository for the `readings` table (append-only time-series).

use canopy_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::reading::{CreateReading, Reading, ReadingZone};

/// Column list for `readings` SELECT queries (includes `id` and
/// `created_at`).
const COLUMNS: &str = "id, sensor_id, value, recorded_at, zone, created_at";

/// Column list for `readings` INSERT statements (excludes auto-generated
/// `id` and `created_at`).
const INSERT_COLUMNS: &str = "sensor_id, value, recorded_at, zone";

/// Provides query operations for readings.
pub struct ReadingRepo;

impl ReadingRepo {
    /// Insert a single reading with its stamped zone.
    pub async fn insert(pool: &PgPool, reading: &CreateReading) -> Result<Reading, sqlx::Error> {
        let query = format!(
            "INSERT INTO readings ({INSERT_COLUMNS}) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Reading>(&query)
            .bind(reading.sensor_id)
            .bind(reading.value)
            .bind(reading.recorded_at)
            .bind(&reading.zone)
            .fetch_one(pool)
            .await
    }

    /// Get readings for a sensor within a time range, newest first.
    pub async fn list_for_sensor(
        pool: &PgPool,
        sensor_id: DbId,
        since: Timestamp,
    ) -> Result<Vec<Reading>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM readings \
             WHERE sensor_id = $1 AND recorded_at >= $2 \
             ORDER BY recorded_at DESC"
        );
        sqlx::query_as::<_, Reading>(&query)
            .bind(sensor_id)
            .bind(since)
            .fetch_all(pool)
            .await
    }

    /// Get the newest `limit` zone samples for a sensor, newest first.
    ///
    /// `not_before` bounds the scan so that readings predating the
    /// sensor's provisioning never contribute to its health.
    pub async fn recent_zones(
        pool: &PgPool,
        sensor_id: DbId,
        not_before: Timestamp,
        limit: i64,
    ) -> Result<Vec<ReadingZone>, sqlx::Error> {
        sqlx::query_as::<_, ReadingZone>(
            "SELECT zone, recorded_at FROM readings \
             WHERE sensor_id = $1 AND recorded_at >= $2 \
             ORDER BY recorded_at DESC \
             LIMIT $3",
        )
        .bind(sensor_id)
        .bind(not_before)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Number of stored readings for a sensor.
    pub async fn count_for_sensor(pool: &PgPool, sensor_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM readings WHERE sensor_id = $1")
            .bind(sensor_id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
