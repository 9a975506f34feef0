use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::analysis::handlers::get_analysis;
use crate::features::analysis::services::AnalysisService;

/// Create routes for the analysis feature
pub fn routes(analysis_service: Arc<AnalysisService>) -> Router {
    Router::new()
        .route("/api/getAnalysis", get(get_analysis))
        .with_state(analysis_service)
}
