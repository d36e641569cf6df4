use canopy_core::error::ValidationError;
use canopy_core::types::DbId;

/// Error type for the ingest and refresh pipeline stages.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The reading was rejected before persistence; nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The referenced sensor instance does not exist.
    #[error("Sensor not found: {0}")]
    SensorNotFound(DbId),

    /// Infrastructure failure during a read or write. Propagated to the
    /// caller; the pipeline never retries.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The caller cancelled the operation before the durable write.
    #[error("Operation cancelled")]
    Cancelled,
}
