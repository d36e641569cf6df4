//! Repository for the `sensor_health` table (one row per sensor).

use canopy_core::types::DbId;
use sqlx::PgPool;

use crate::models::sensor_health::SensorHealth;

/// Column list for `sensor_health` SELECT queries.
const COLUMNS: &str = "id, sensor_id, status, last_computed_at, created_at, updated_at";

/// Provides query operations for sensor health records.
pub struct SensorHealthRepo;

impl SensorHealthRepo {
    /// Create the initial `no_data` health row for a freshly provisioned
    /// sensor.
    ///
    /// The `uq_sensor_health_sensor` constraint rejects a second row for
    /// the same sensor.
    pub async fn create_for_sensor(
        pool: &PgPool,
        sensor_id: DbId,
    ) -> Result<SensorHealth, sqlx::Error> {
        let query = format!(
            "INSERT INTO sensor_health (sensor_id) VALUES ($1) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SensorHealth>(&query)
            .bind(sensor_id)
            .fetch_one(pool)
            .await
    }

    /// Get the health record for a sensor.
    pub async fn get_for_sensor(
        pool: &PgPool,
        sensor_id: DbId,
    ) -> Result<Option<SensorHealth>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sensor_health WHERE sensor_id = $1");
        sqlx::query_as::<_, SensorHealth>(&query)
            .bind(sensor_id)
            .fetch_optional(pool)
            .await
    }

    /// Persist a freshly computed status (last-write-wins).
    ///
    /// Upserts so that a refresh still succeeds if the provisioning-time
    /// row is missing.
    pub async fn set_status(
        pool: &PgPool,
        sensor_id: DbId,
        status: &str,
    ) -> Result<SensorHealth, sqlx::Error> {
        let query = format!(
            "INSERT INTO sensor_health (sensor_id, status, last_computed_at) \
             VALUES ($1, $2, now()) \
             ON CONFLICT (sensor_id) DO UPDATE \
                 SET status = EXCLUDED.status, \
                     last_computed_at = now(), \
                     updated_at = now() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SensorHealth>(&query)
            .bind(sensor_id)
            .bind(status)
            .fetch_one(pool)
            .await
    }
}
