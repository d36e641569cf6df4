//! Sensor-type catalog entity and DTOs (PRD-01).

use canopy_core::types::{DbId, Timestamp};
use canopy_core::zone::{Band, ThresholdProfile};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One kind of physical sensor and its classification bands.
///
/// Catalog rows are created at seed time and treated as immutable:
/// editing a definition does not reclassify already-stored readings,
/// whose zones were stamped at ingest.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SensorType {
    pub id: DbId,
    pub name: String,
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
    pub created_at: Timestamp,
}

impl SensorType {
    /// Project the row into the core classifier's threshold profile.
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

/// DTO for creating a catalog entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSensorType {
    pub name: String,
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
