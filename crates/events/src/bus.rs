//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the fan-out hub for [`TelemetryEvent`]s. Live
//! dashboards and other in-process consumers subscribe; publishing is
//! fire-and-forget, and delivery is at-most-once per subscriber —
//! consumers that need ground truth recompute from the store instead.

use canopy_core::types::{DbId, Timestamp};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Event fired after a reading has been durably committed.
pub const EVENT_READING_COMMITTED: &str = "reading.committed";

/// Event fired when a sensor's debounced health status transitions.
pub const EVENT_SENSOR_STATUS_CHANGED: &str = "sensor.status.changed";

// ---------------------------------------------------------------------------
// TelemetryEvent
// ---------------------------------------------------------------------------

/// A telemetry event as seen by downstream consumers.
///
/// Constructed via [`TelemetryEvent::new`] and enriched with the builder
/// methods [`with_sensor`](TelemetryEvent::with_sensor),
/// [`with_device`](TelemetryEvent::with_device), and
/// [`with_payload`](TelemetryEvent::with_payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryEvent {
    /// Dot-separated event name, e.g. `"reading.committed"`.
    pub event_type: String,

    /// Sensor instance the event concerns, when applicable.
    pub sensor_id: Option<DbId>,

    /// Device owning that sensor, when applicable.
    pub device_id: Option<DbId>,

    /// Free-form JSON payload carrying event-specific data.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: Timestamp,
}

impl TelemetryEvent {
    /// Create a new event with only the required `event_type`.
    ///
    /// All optional fields default to `None` / empty object.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            sensor_id: None,
            device_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Attach the source sensor to the event.
    pub fn with_sensor(mut self, sensor_id: DbId) -> Self {
        self.sensor_id = Some(sensor_id);
        self
    }

    /// Attach the owning device to the event.
    pub fn with_device(mut self, device_id: DbId) -> Self {
        self.device_id = Some(device_id);
        self
    }

    /// Set the JSON payload for the event.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`TelemetryEvent`]. Shared via
/// `Arc<EventBus>` across the application.
pub struct EventBus {
    sender: broadcast::Sender<TelemetryEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// A full buffer drops the oldest un-consumed events; a receiver
    /// that falls behind observes `RecvError::Lagged` and can resync by
    /// recomputing from the store.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// With zero subscribers the event is silently dropped — losing a
    /// dashboard update is acceptable; status can always be recomputed.
    pub fn publish(&self, event: TelemetryEvent) {
        // SendError only means there are zero receivers right now.
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<TelemetryEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
