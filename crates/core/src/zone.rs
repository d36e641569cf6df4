//! Zone classification of raw sensor values (PRD-02).
//!
//! Pure logic — no database access. The caller fetches the sensor type's
//! threshold profile and passes it in. Classification assumes the value
//! already passed the absolute-range check; it is total and has no
//! failure mode of its own.

use serde::{Deserialize, Serialize};

/// Outcome of classifying a single reading against a threshold profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    ErrorLow,
    WarningLow,
    Normal,
    WarningHigh,
    ErrorHigh,
    /// Inside the absolute range but matched by no band.
    OutOfRange,
}

impl Zone {
    /// Stable string form used in the `readings.zone` column and event
    /// payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Zone::ErrorLow => "error_low",
            Zone::WarningLow => "warning_low",
            Zone::Normal => "normal",
            Zone::WarningHigh => "warning_high",
            Zone::ErrorHigh => "error_high",
            Zone::OutOfRange => "out_of_range",
        }
    }

    /// Parse the stored string form back into a zone.
    pub fn parse(s: &str) -> Option<Zone> {
        match s {
            "error_low" => Some(Zone::ErrorLow),
            "warning_low" => Some(Zone::WarningLow),
            "normal" => Some(Zone::Normal),
            "warning_high" => Some(Zone::WarningHigh),
            "error_high" => Some(Zone::ErrorHigh),
            "out_of_range" => Some(Zone::OutOfRange),
            _ => None,
        }
    }

    /// Whether this zone is one of the named error bands.
    pub fn is_error(self) -> bool {
        matches!(self, Zone::ErrorLow | Zone::ErrorHigh)
    }

    /// Whether this zone is one of the named warning bands.
    pub fn is_warning(self) -> bool {
        matches!(self, Zone::WarningLow | Zone::WarningHigh)
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A closed numeric interval `[low, high]` associated with one zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub low: f64,
    pub high: f64,
}

impl Band {
    /// Closed-interval membership test.
    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }
}

/// The five threshold bands and absolute range for one sensor type.
///
/// Core-local mirror of a `sensor_types` catalog row; the db crate
/// projects its entity into this. Bands are not required to tile the
/// absolute range — gaps classify as [`Zone::OutOfRange`].
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdProfile {
    pub min_value: f64,
    pub max_value: f64,
    pub error_low: Band,
    pub warning_low: Band,
    pub normal: Band,
    pub warning_high: Band,
    pub error_high: Band,
}

impl ThresholdProfile {
    /// Bands paired with their zones, in the fixed evaluation priority
    /// order.
    fn bands(&self) -> [(Band, Zone); 5] {
        [
            (self.error_low, Zone::ErrorLow),
            (self.warning_low, Zone::WarningLow),
            (self.normal, Zone::Normal),
            (self.warning_high, Zone::WarningHigh),
            (self.error_high, Zone::ErrorHigh),
        ]
    }
}

/// Classify a value against the profile's bands.
///
/// Bands are tested in priority order (error_low, warning_low, normal,
/// warning_high, error_high); the first closed-interval match wins, even
/// when a value would satisfy more than one band. A value matching no
/// band maps to [`Zone::OutOfRange`].
pub fn classify(profile: &ThresholdProfile, value: f64) -> Zone {
    for (band, zone) in profile.bands() {
        if band.contains(value) {
            return zone;
        }
    }
    Zone::OutOfRange
}

/// Whether the value lies within the absolute `[min_value, max_value]`
/// range. Values outside it are rejected at ingest and never classified.
pub fn is_valid(profile: &ThresholdProfile, value: f64) -> bool {
    profile.min_value <= value && value <= profile.max_value
}

/// Whether the value classifies into the normal band.
pub fn is_normal(profile: &ThresholdProfile, value: f64) -> bool {
    classify(profile, value) == Zone::Normal
}

/// Whether the value classifies into any warning or error band.
pub fn is_warning_or_error(profile: &ThresholdProfile, value: f64) -> bool {
    let zone = classify(profile, value);
    zone.is_warning() || zone.is_error()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Greenhouse air temperature in °C.
    fn temperature_profile() -> ThresholdProfile {
        ThresholdProfile {
            min_value: 0.0,
            max_value: 100.0,
            error_low: Band {
                low: 0.0,
                high: 11.0,
            },
            warning_low: Band {
                low: 12.0,
                high: 15.0,
            },
            normal: Band {
                low: 16.0,
                high: 22.0,
            },
            warning_high: Band {
                low: 23.0,
                high: 30.0,
            },
            error_high: Band {
                low: 31.0,
                high: 40.0,
            },
        }
    }

    #[test]
    fn classifies_each_band() {
        let p = temperature_profile();
        assert_eq!(classify(&p, 5.0), Zone::ErrorLow);
        assert_eq!(classify(&p, 13.0), Zone::WarningLow);
        assert_eq!(classify(&p, 20.0), Zone::Normal);
        assert_eq!(classify(&p, 25.0), Zone::WarningHigh);
        assert_eq!(classify(&p, 35.0), Zone::ErrorHigh);
    }

    #[test]
    fn band_boundaries_are_inclusive() {
        let p = temperature_profile();
        assert_eq!(classify(&p, 22.0), Zone::Normal);
        assert_eq!(classify(&p, 23.0), Zone::WarningHigh);
        assert_eq!(classify(&p, 16.0), Zone::Normal);
        assert_eq!(classify(&p, 15.0), Zone::WarningLow);
    }

    #[test]
    fn gap_between_bands_is_out_of_range() {
        let p = temperature_profile();
        // Inside [0, 100] but above every band.
        assert_eq!(classify(&p, 55.0), Zone::OutOfRange);
        // Fractional gap between error_low and warning_low.
        assert_eq!(classify(&p, 11.5), Zone::OutOfRange);
    }

    #[test]
    fn classification_is_deterministic() {
        let p = temperature_profile();
        for value in [0.0, 11.0, 11.5, 20.0, 40.0, 55.0, 100.0] {
            assert_eq!(classify(&p, value), classify(&p, value));
        }
    }

    #[test]
    fn overlapping_bands_resolve_by_priority_order() {
        let mut p = temperature_profile();
        // Extend warning_low to overlap the whole error_low band.
        p.warning_low = Band {
            low: 0.0,
            high: 15.0,
        };
        // error_low is evaluated first, so it still wins on the overlap.
        assert_eq!(classify(&p, 5.0), Zone::ErrorLow);
        assert_eq!(classify(&p, 11.5), Zone::WarningLow);
    }

    #[test]
    fn absolute_range_check_is_inclusive() {
        let p = temperature_profile();
        assert!(is_valid(&p, 0.0));
        assert!(is_valid(&p, 100.0));
        assert!(!is_valid(&p, -0.1));
        assert!(!is_valid(&p, 100.1));
    }

    #[test]
    fn predicates_follow_classification() {
        let p = temperature_profile();
        assert!(is_normal(&p, 20.0));
        assert!(!is_normal(&p, 25.0));
        assert!(is_warning_or_error(&p, 25.0));
        assert!(is_warning_or_error(&p, 5.0));
        assert!(!is_warning_or_error(&p, 20.0));
        // out_of_range is neither normal nor warning/error.
        assert!(!is_normal(&p, 55.0));
        assert!(!is_warning_or_error(&p, 55.0));
    }

    #[test]
    fn string_form_round_trips() {
        for zone in [
            Zone::ErrorLow,
            Zone::WarningLow,
            Zone::Normal,
            Zone::WarningHigh,
            Zone::ErrorHigh,
            Zone::OutOfRange,
        ] {
            assert_eq!(Zone::parse(zone.as_str()), Some(zone));
        }
        assert_eq!(Zone::parse("not_a_zone"), None);
    }
}
