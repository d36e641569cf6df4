//! Repository for the `sensors` table and its joined views.

use canopy_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::sensor::{CreateSensor, Sensor, SensorWithHealth, SensorWithType};

/// Column list for `sensors` SELECT queries.
const COLUMNS: &str = "id, device_id, sensor_type_id, label, created_at";

/// Joined column list for the sensor + type view used by the ingest path.
const WITH_TYPE_COLUMNS: &str = "\
    s.id, s.device_id, s.sensor_type_id, s.created_at, \
    t.name AS type_name, t.unit, t.min_value, t.max_value, \
    t.error_low_min, t.error_low_max, t.warning_low_min, t.warning_low_max, \
    t.normal_min, t.normal_max, t.warning_high_min, t.warning_high_max, \
    t.error_high_min, t.error_high_max";

/// Provides query operations for sensor instances.
pub struct SensorRepo;

impl SensorRepo {
    /// Provision a sensor instance on a device.
    pub async fn insert(pool: &PgPool, input: &CreateSensor) -> Result<Sensor, sqlx::Error> {
        let query = format!(
            "INSERT INTO sensors (device_id, sensor_type_id, label) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Sensor>(&query)
            .bind(input.device_id)
            .bind(input.sensor_type_id)
            .bind(&input.label)
            .fetch_one(pool)
            .await
    }

    /// Get a sensor by id.
    pub async fn get_by_id(pool: &PgPool, id: DbId) -> Result<Option<Sensor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sensors WHERE id = $1");
        sqlx::query_as::<_, Sensor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Get a sensor joined with its type's threshold columns.
    pub async fn get_with_type(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SensorWithType>, sqlx::Error> {
        let query = format!(
            "SELECT {WITH_TYPE_COLUMNS} \
             FROM sensors s \
             JOIN sensor_types t ON t.id = s.sensor_type_id \
             WHERE s.id = $1"
        );
        sqlx::query_as::<_, SensorWithType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all sensors with their type name and current health record.
    pub async fn list_with_health(pool: &PgPool) -> Result<Vec<SensorWithHealth>, sqlx::Error> {
        let query = "\
            SELECT s.id, s.device_id, s.sensor_type_id, s.label, \
                   t.name AS type_name, t.unit, \
                   h.status, h.last_computed_at \
            FROM sensors s \
            JOIN sensor_types t ON t.id = s.sensor_type_id \
            JOIN sensor_health h ON h.sensor_id = s.id \
            ORDER BY s.id";
        sqlx::query_as::<_, SensorWithHealth>(query)
            .fetch_all(pool)
            .await
    }

    /// Ids of sensors whose recorded status may have gone stale: the
    /// health row says something other than `no_data`, but no reading
    /// newer than `cutoff` exists.
    ///
    /// Used by the staleness sweep to decide which sensors to re-refresh.
    pub async fn list_stale_candidates(
        pool: &PgPool,
        cutoff: Timestamp,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT s.id \
             FROM sensors s \
             JOIN sensor_health h ON h.sensor_id = s.id \
             WHERE h.status <> 'no_data' \
               AND NOT EXISTS ( \
                   SELECT 1 FROM readings r \
                   WHERE r.sensor_id = s.id AND r.recorded_at > $1 \
               ) \
             ORDER BY s.id",
        )
        .bind(cutoff)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
