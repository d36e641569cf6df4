//! Reading ingestion: validate, classify, persist, broadcast (PRD-02).

use canopy_core::error::ValidationError;
use canopy_core::types::{DbId, Timestamp};
use canopy_core::zone::{classify, is_valid};
use canopy_db::models::reading::{CreateReading, Reading};
use canopy_db::repositories::{ReadingRepo, SensorRepo};
use canopy_db::DbPool;
use canopy_events::CascadeNotifier;
use chrono::Utc;
use tokio_util::sync::CancellationToken;

use crate::error::PipelineError;

/// One incoming reading, as submitted by the ingestion transport.
#[derive(Debug, Clone)]
pub struct NewReading {
    pub sensor_id: DbId,
    /// `None` when the transport received no usable numeric value.
    pub value: Option<f64>,
    pub recorded_at: Timestamp,
}

/// Validate the transport-level fields of an incoming reading.
///
/// First failure wins: a missing or non-finite value is reported before
/// a future timestamp. Returns the validated value.
pub fn validate_input(input: &NewReading, now: Timestamp) -> Result<f64, ValidationError> {
    let value = match input.value {
        Some(v) if v.is_finite() => v,
        _ => return Err(ValidationError::MissingValue),
    };

    if input.recorded_at > now {
        return Err(ValidationError::FutureTimestamp {
            recorded_at: input.recorded_at,
            now,
        });
    }

    Ok(value)
}

/// Ingest a single reading.
///
/// Validation order (fail fast, nothing is written on failure):
/// 1. value present and finite;
/// 2. `recorded_at` not later than now — no clock-skew grace;
/// 3. value within the sensor type's absolute range. An in-range value
///    can still classify as `out_of_range` when no band matches; only
///    the absolute check rejects.
///
/// On success the value is classified once, persisted with its stamped
/// zone (exactly one durable write), and announced via the cascade
/// notifier (best-effort). Nothing is retried here — the caller decides
/// whether to resubmit after an error.
pub async fn ingest(
    pool: &DbPool,
    cascade: &CascadeNotifier,
    input: NewReading,
    cancel: &CancellationToken,
) -> Result<Reading, PipelineError> {
    let now = Utc::now();
    let value = validate_input(&input, now)?;

    let sensor = SensorRepo::get_with_type(pool, input.sensor_id)
        .await?
        .ok_or(PipelineError::SensorNotFound(input.sensor_id))?;

    let profile = sensor.profile();
    if !is_valid(&profile, value) {
        return Err(ValidationError::OutOfAbsoluteRange {
            value,
            min: profile.min_value,
            max: profile.max_value,
        }
        .into());
    }

    let zone = classify(&profile, value);

    let dto = CreateReading {
        sensor_id: sensor.id,
        value,
        recorded_at: input.recorded_at,
        zone: zone.as_str().to_string(),
    };

    // The persist is one atomic row insert: a cancellation that wins the
    // race leaves no partial state to clean up.
    let reading = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(PipelineError::Cancelled),
        result = ReadingRepo::insert(pool, &dto) => result?,
    };

    cascade.reading_committed(sensor.id, sensor.device_id, value, zone, input.recorded_at);

    Ok(reading)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Duration;

    use super::*;

    fn input(value: Option<f64>, recorded_at: Timestamp) -> NewReading {
        NewReading {
            sensor_id: 1,
            value,
            recorded_at,
        }
    }

    #[test]
    fn accepts_present_finite_value() {
        let now = Utc::now();
        let result = validate_input(&input(Some(21.5), now - Duration::seconds(5)), now);
        assert_eq!(result, Ok(21.5));
    }

    #[test]
    fn rejects_absent_value() {
        let now = Utc::now();
        let result = validate_input(&input(None, now), now);
        assert_matches!(result, Err(ValidationError::MissingValue));
    }

    #[test]
    fn rejects_non_finite_values() {
        let now = Utc::now();
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = validate_input(&input(Some(bad), now), now);
            assert_matches!(result, Err(ValidationError::MissingValue));
        }
    }

    #[test]
    fn rejects_future_timestamp() {
        let now = Utc::now();
        let result = validate_input(&input(Some(20.0), now + Duration::hours(1)), now);
        assert_matches!(result, Err(ValidationError::FutureTimestamp { .. }));
    }

    #[test]
    fn timestamp_equal_to_now_is_accepted() {
        let now = Utc::now();
        let result = validate_input(&input(Some(20.0), now), now);
        assert_eq!(result, Ok(20.0));
    }

    #[test]
    fn missing_value_wins_over_future_timestamp() {
        let now = Utc::now();
        let result = validate_input(&input(None, now + Duration::hours(1)), now);
        assert_matches!(result, Err(ValidationError::MissingValue));
    }
}
