use axum::{routing::get, Router};
use std::sync::Arc;

use crate::core::config::StorageConfig;
use crate::features::diagnostics::handlers::{get_debug_info, health_check};

/// Create routes for the diagnostics feature
pub fn routes(storage_config: Arc<StorageConfig>) -> Router {
    Router::new()
        .route("/api/debug", get(get_debug_info))
        .route("/health", get(health_check))
        .with_state(storage_config)
}
