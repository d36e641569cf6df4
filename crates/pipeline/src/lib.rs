//! Explicit telemetry pipeline stages (PRD-02, PRD-03).
//!
//! The stages replace implicit lifecycle hooks with an ordered, visible
//! call sequence: [`ingest`] validates, classifies, and persists one
//! reading, then fires the broadcast; [`refresh`] recomputes and persists
//! a sensor's debounced health status, cascading only on an actual
//! transition. Both stages take the pool and the cascade notifier as
//! explicit dependencies, so they are testable without the HTTP layer.

pub mod error;
pub mod ingest;
pub mod refresh;

pub use error::PipelineError;
pub use ingest::{ingest, NewReading};
pub use refresh::refresh;
