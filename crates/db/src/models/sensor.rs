//! Sensor-instance entity and DTOs.

use canopy_core::types::{DbId, Timestamp};
use canopy_core::zone::{Band, ThresholdProfile};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A provisioned sensor instance: one sensor type mounted on one device.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Sensor {
    pub id: DbId,
    pub device_id: DbId,
    pub sensor_type_id: DbId,
    pub label: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for provisioning a sensor on a device.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSensor {
    pub device_id: DbId,
    pub sensor_type_id: DbId,
    pub label: Option<String>,
}

/// Sensor joined with its type's threshold columns.
///
/// Used by the ingest path, which needs both the sensor row and its
/// classification profile in a single fetch.
#[derive(Debug, Clone, FromRow)]
pub struct SensorWithType {
    pub id: DbId,
    pub device_id: DbId,
    pub sensor_type_id: DbId,
    pub created_at: Timestamp,
    pub type_name: String,
    pub unit: String,
    pub min_value: f64,
    pub max_value: f64,
    pub error_low_min: f64,
    pub error_low_max: f64,
    pub warning_low_min: f64,
    pub warning_low_max: f64,
    pub normal_min: f64,
    pub normal_max: f64,
    pub warning_high_min: f64,
    pub warning_high_max: f64,
    pub error_high_min: f64,
    pub error_high_max: f64,
}

impl SensorWithType {
    /// Project the joined type columns into the core classifier's
    /// threshold profile.
    pub fn profile(&self) -> ThresholdProfile {
        ThresholdProfile {
            min_value: self.min_value,
            max_value: self.max_value,
            error_low: Band {
                low: self.error_low_min,
                high: self.error_low_max,
            },
            warning_low: Band {
                low: self.warning_low_min,
                high: self.warning_low_max,
            },
            normal: Band {
                low: self.normal_min,
                high: self.normal_max,
            },
            warning_high: Band {
                low: self.warning_high_min,
                high: self.warning_high_max,
            },
            error_high: Band {
                low: self.error_high_min,
                high: self.error_high_max,
            },
        }
    }
}

/// List view: sensor joined with its type name and current health.
///
/// Returned by the sensor listing endpoint.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SensorWithHealth {
    pub id: DbId,
    pub device_id: DbId,
    pub sensor_type_id: DbId,
    pub label: Option<String>,
    pub type_name: String,
    pub unit: String,
    pub status: String,
    pub last_computed_at: Timestamp,
}
