use std::sync::Arc;

use matzip_core::storage::ImageStorage;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: everything is behind `Arc` or already reference-counted.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: matzip_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Backend holding uploaded image bytes.
    pub storage: Arc<dyn ImageStorage>,
}
