//! Downstream propagation of committed readings and status transitions
//! (PRD-04).
//!
//! Both notification paths are best-effort relative to the triggering
//! write: failures are logged and swallowed, never propagated to — and
//! never able to roll back — the ingest or refresh call that fired them.

use std::sync::Arc;

use canopy_core::health::HealthStatus;
use canopy_core::types::{DbId, Timestamp};
use canopy_core::zone::Zone;

use crate::aggregator::AlertAggregator;
use crate::bus::{EventBus, TelemetryEvent, EVENT_READING_COMMITTED, EVENT_SENSOR_STATUS_CHANGED};

/// Fans a committed reading or a status transition out to the event bus,
/// and triggers the device-level alert aggregator on transitions.
pub struct CascadeNotifier {
    bus: Arc<EventBus>,
    aggregator: Arc<dyn AlertAggregator>,
}

impl CascadeNotifier {
    pub fn new(bus: Arc<EventBus>, aggregator: Arc<dyn AlertAggregator>) -> Self {
        Self { bus, aggregator }
    }

    /// Announce a durably committed reading to live consumers.
    pub fn reading_committed(
        &self,
        sensor_id: DbId,
        device_id: DbId,
        value: f64,
        zone: Zone,
        recorded_at: Timestamp,
    ) {
        let event = TelemetryEvent::new(EVENT_READING_COMMITTED)
            .with_sensor(sensor_id)
            .with_device(device_id)
            .with_payload(serde_json::json!({
                "sensor_id": sensor_id,
                "value": value,
                "zone": zone.as_str(),
                "recorded_at": recorded_at,
            }));
        self.bus.publish(event);
    }

    /// Announce a health status transition and trigger the device-level
    /// alert aggregator.
    ///
    /// Callers invoke this only when `old != new`; an unchanged status is
    /// suppressed upstream so consumers never see no-op transitions. The
    /// aggregator trigger runs on a spawned task — its retries must not
    /// delay the refresh that caused the transition.
    pub fn status_changed(
        &self,
        sensor_id: DbId,
        device_id: DbId,
        old: HealthStatus,
        new: HealthStatus,
    ) {
        let event = TelemetryEvent::new(EVENT_SENSOR_STATUS_CHANGED)
            .with_sensor(sensor_id)
            .with_device(device_id)
            .with_payload(serde_json::json!({
                "sensor_id": sensor_id,
                "old_status": old.as_str(),
                "new_status": new.as_str(),
            }));
        self.bus.publish(event);

        let aggregator = Arc::clone(&self.aggregator);
        tokio::spawn(async move {
            if let Err(e) = aggregator.recompute_device(device_id).await {
                tracing::warn!(device_id, error = %e, "Device alert trigger failed");
            }
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::NoopAggregator;

    fn notifier_with_bus() -> (Arc<EventBus>, CascadeNotifier) {
        let bus = Arc::new(EventBus::default());
        let notifier = CascadeNotifier::new(Arc::clone(&bus), Arc::new(NoopAggregator));
        (bus, notifier)
    }

    #[tokio::test]
    async fn reading_committed_publishes_payload() {
        let (bus, notifier) = notifier_with_bus();
        let mut rx = bus.subscribe();

        let recorded_at = chrono::Utc::now();
        notifier.reading_committed(5, 2, 21.5, Zone::Normal, recorded_at);

        let event = rx.recv().await.expect("should receive the event");
        assert_eq!(event.event_type, EVENT_READING_COMMITTED);
        assert_eq!(event.sensor_id, Some(5));
        assert_eq!(event.device_id, Some(2));
        assert_eq!(event.payload["value"], 21.5);
        assert_eq!(event.payload["zone"], "normal");
    }

    #[tokio::test]
    async fn status_changed_publishes_transition() {
        let (bus, notifier) = notifier_with_bus();
        let mut rx = bus.subscribe();

        notifier.status_changed(5, 2, HealthStatus::Ok, HealthStatus::Warning);

        let event = rx.recv().await.expect("should receive the event");
        assert_eq!(event.event_type, EVENT_SENSOR_STATUS_CHANGED);
        assert_eq!(event.payload["old_status"], "ok");
        assert_eq!(event.payload["new_status"], "warning");
    }

    #[tokio::test]
    async fn notifications_survive_zero_subscribers() {
        let (_bus, notifier) = notifier_with_bus();
        // Neither call may panic or error with nobody listening.
        notifier.reading_committed(1, 1, 0.0, Zone::OutOfRange, chrono::Utc::now());
        notifier.status_changed(1, 1, HealthStatus::NoData, HealthStatus::Ok);
    }
}
