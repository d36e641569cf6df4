//! Repository for the `devices` table.

use canopy_core::types::DbId;
use sqlx::PgPool;

use crate::models::device::{CreateDevice, Device};

/// Column list for `devices` SELECT queries.
const COLUMNS: &str = "id, name, location, created_at";

/// Provides query operations for devices.
pub struct DeviceRepo;

impl DeviceRepo {
    /// Register a new device.
    pub async fn insert(pool: &PgPool, input: &CreateDevice) -> Result<Device, sqlx::Error> {
        let query = format!(
            "INSERT INTO devices (name, location) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Device>(&query)
            .bind(&input.name)
            .bind(&input.location)
            .fetch_one(pool)
            .await
    }

    /// List all devices, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Device>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM devices ORDER BY created_at DESC");
        sqlx::query_as::<_, Device>(&query).fetch_all(pool).await
    }

    /// Get a device by id.
    pub async fn get_by_id(pool: &PgPool, id: DbId) -> Result<Option<Device>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM devices WHERE id = $1");
        sqlx::query_as::<_, Device>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
