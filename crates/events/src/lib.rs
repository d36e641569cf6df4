//! Canopy event bus and downstream notification infrastructure.
//!
//! Building blocks for the telemetry cascade (PRD-04):
//!
//! - [`EventBus`] — in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`TelemetryEvent`] — the canonical event envelope.
//! - [`CascadeNotifier`] — best-effort propagation of committed readings
//!   and status transitions.
//! - [`AlertAggregator`] — the device-level alert recomputation boundary,
//!   with webhook and no-op implementations.

pub mod aggregator;
pub mod bus;
pub mod cascade;

pub use aggregator::{AggregatorError, AlertAggregator, NoopAggregator, WebhookAggregator};
pub use bus::{EventBus, TelemetryEvent, EVENT_READING_COMMITTED, EVENT_SENSOR_STATUS_CHANGED};
pub use cascade::CascadeNotifier;
