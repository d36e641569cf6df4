//! Repository for the `sensor_types` catalog table.

use canopy_core::types::DbId;
use sqlx::PgPool;

use crate::models::sensor_type::{CreateSensorType, SensorType};

/// Column list for `sensor_types` SELECT queries.
const COLUMNS: &str = "\
    id, name, unit, min_value, max_value, \
    error_low_min, error_low_max, warning_low_min, warning_low_max, \
    normal_min, normal_max, warning_high_min, warning_high_max, \
    error_high_min, error_high_max, created_at";

/// Column list for `sensor_types` INSERT statements (excludes
/// auto-generated `id` and `created_at`).
const INSERT_COLUMNS: &str = "\
    name, unit, min_value, max_value, \
    error_low_min, error_low_max, warning_low_min, warning_low_max, \
    normal_min, normal_max, warning_high_min, warning_high_max, \
    error_high_min, error_high_max";

/// Provides query operations for the sensor-type catalog.
pub struct SensorTypeRepo;

impl SensorTypeRepo {
    /// Insert a new catalog entry.
    ///
    /// The `uq_sensor_types_name` constraint rejects duplicate names.
    pub async fn insert(pool: &PgPool, input: &CreateSensorType) -> Result<SensorType, sqlx::Error> {
        let query = format!(
            "INSERT INTO sensor_types ({INSERT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SensorType>(&query)
            .bind(&input.name)
            .bind(&input.unit)
            .bind(input.min_value)
            .bind(input.max_value)
            .bind(input.error_low_min)
            .bind(input.error_low_max)
            .bind(input.warning_low_min)
            .bind(input.warning_low_max)
            .bind(input.normal_min)
            .bind(input.normal_max)
            .bind(input.warning_high_min)
            .bind(input.warning_high_max)
            .bind(input.error_high_min)
            .bind(input.error_high_max)
            .fetch_one(pool)
            .await
    }

    /// List the whole catalog, ordered by name.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<SensorType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sensor_types ORDER BY name");
        sqlx::query_as::<_, SensorType>(&query).fetch_all(pool).await
    }

    /// Get a catalog entry by id.
    pub async fn get_by_id(pool: &PgPool, id: DbId) -> Result<Option<SensorType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sensor_types WHERE id = $1");
        sqlx::query_as::<_, SensorType>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Get a catalog entry by its unique name.
    pub async fn get_by_name(pool: &PgPool, name: &str) -> Result<Option<SensorType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sensor_types WHERE name = $1");
        sqlx::query_as::<_, SensorType>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }
}
