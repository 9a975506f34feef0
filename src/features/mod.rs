pub mod analysis;
pub mod diagnostics;
pub mod uploads;

use axum::Router;
use std::sync::Arc;

use crate::core::config::StorageConfig;
use crate::modules::storage::ObjectStore;

/// All API routes, sharing one object store and configuration snapshot
pub fn api_routes(store: Arc<dyn ObjectStore>, storage_config: StorageConfig) -> Router {
    let diagnostics = storage_config.diagnostics();

    let upload_service = Arc::new(uploads::UploadService::new(
        Arc::clone(&store),
        diagnostics,
    ));
    let analysis_service = Arc::new(analysis::AnalysisService::new(store, diagnostics));

    Router::new()
        .merge(uploads::routes(upload_service))
        .merge(analysis::routes(analysis_service))
        .merge(diagnostics::routes(Arc::new(storage_config)))
}
