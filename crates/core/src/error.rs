use crate::types::{DbId, Timestamp};

/// Why an incoming reading was rejected before persistence.
///
/// These are caller errors: the reading is not stored and the engine never
/// retries. The ingestion transport decides whether to resubmit.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// No usable numeric value was supplied (absent, null, or non-finite).
    #[error("value is required and must be a finite number")]
    MissingValue,

    /// The reading claims a timestamp later than the ingestion clock.
    /// No clock-skew grace is applied.
    #[error("recorded_at {recorded_at} is later than the ingestion time {now}")]
    FutureTimestamp {
        recorded_at: Timestamp,
        now: Timestamp,
    },

    /// The value falls outside the sensor type's absolute valid range.
    #[error("value {value} is outside the absolute range [{min}, {max}]")]
    OutOfAbsoluteRange { value: f64, min: f64, max: f64 },
}

impl ValidationError {
    /// Stable machine-readable code for API error payloads.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MissingValue => "MISSING_VALUE",
            ValidationError::FutureTimestamp { .. } => "FUTURE_TIMESTAMP",
            ValidationError::OutOfAbsoluteRange { .. } => "OUT_OF_ABSOLUTE_RANGE",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
