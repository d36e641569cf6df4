use std::sync::Arc;

use canopy_events::CascadeNotifier;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: canopy_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Downstream cascade: broadcast + device alert trigger.
    pub cascade: Arc<CascadeNotifier>,
}
