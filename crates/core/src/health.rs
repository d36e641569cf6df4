//! Debounced sensor health status (PRD-03).
//!
//! The status is recomputed from scratch on every call: a severity-priority
//! reduction over a fixed window of recent zones, not a stateful machine.
//! Smoothing comes from the window size alone — there is no dwell time and
//! no stuck state to escape from.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;
use crate::zone::Zone;

/// How many of the most recent readings the reducer inspects.
pub const CONSECUTIVE_READINGS_THRESHOLD: usize = 3;

/// Maximum age of the newest reading before a sensor is forced to
/// [`HealthStatus::NoData`], regardless of its zones.
pub const READING_TIMEOUT: Duration = Duration::from_secs(600); // 10 minutes

/// Debounced, time-windowed health verdict for a sensor instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Ok,
    Warning,
    Error,
    NoData,
}

impl HealthStatus {
    /// Stable string form used in the `sensor_health.status` column and
    /// event payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            HealthStatus::Ok => "ok",
            HealthStatus::Warning => "warning",
            HealthStatus::Error => "error",
            HealthStatus::NoData => "no_data",
        }
    }

    /// Parse the stored string form back into a status.
    pub fn parse(s: &str) -> Option<HealthStatus> {
        match s {
            "ok" => Some(HealthStatus::Ok),
            "warning" => Some(HealthStatus::Warning),
            "error" => Some(HealthStatus::Error),
            "no_data" => Some(HealthStatus::NoData),
            _ => None,
        }
    }

    /// Severity rank for comparisons: higher is worse. `NoData` ranks
    /// above everything because staleness masks any previously known
    /// zone.
    pub fn severity(self) -> u8 {
        match self {
            HealthStatus::Ok => 0,
            HealthStatus::Warning => 1,
            HealthStatus::Error => 2,
            HealthStatus::NoData => 3,
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One persisted reading's stamped zone and timestamp, as consumed by the
/// reducer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneSample {
    pub zone: Zone,
    pub recorded_at: Timestamp,
}

/// Reduce a sensor's recent readings to its current health status.
///
/// `samples` must be ordered newest first; only the
/// [`CONSECUTIVE_READINGS_THRESHOLD`] newest entries are inspected (fewer
/// when history is shorter).
///
/// Evaluation order:
/// 1. no samples at all → `NoData`;
/// 2. newest sample older than [`READING_TIMEOUT`] relative to `now` →
///    `NoData`, overriding any zone severity;
/// 3. otherwise: any error-band zone in the window → `Error`; else any
///    warning-band zone → `Warning`; else `Ok`.
///
/// [`Zone::OutOfRange`] carries no severity here: a reading that matched
/// no band debounces like a quiet one. Only the named error/warning bands
/// flip the status.
pub fn compute_status(samples: &[ZoneSample], now: Timestamp) -> HealthStatus {
    let Some(newest) = samples.first() else {
        return HealthStatus::NoData;
    };

    let timeout = chrono::Duration::from_std(READING_TIMEOUT).expect("valid duration");
    if now.signed_duration_since(newest.recorded_at) > timeout {
        return HealthStatus::NoData;
    }

    let window = &samples[..samples.len().min(CONSECUTIVE_READINGS_THRESHOLD)];

    if window.iter().any(|s| s.zone.is_error()) {
        HealthStatus::Error
    } else if window.iter().any(|s| s.zone.is_warning()) {
        HealthStatus::Warning
    } else {
        HealthStatus::Ok
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
