//! Background tasks.
//!
//! Each submodule provides a long-running async function meant to be
//! spawned via `tokio::spawn` and stopped through a [`CancellationToken`]
//! during graceful shutdown.
//!
//! [`CancellationToken`]: tokio_util::sync::CancellationToken

pub mod staleness;
