use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

use crate::core::error::AppError;
use crate::features::analysis::dtos::AnalysisQuery;
use crate::features::analysis::services::AnalysisService;
use crate::shared::constants::MSG_NO_FILENAME;
use crate::shared::types::ErrorResponse;

/// Fetch the HTML analysis report of an upload
///
/// Returns 404 while the analysis pipeline has not written the report yet; callers
/// are expected to poll.
#[utoipa::path(
    get,
    path = "/api/getAnalysis",
    tag = "analysis",
    params(AnalysisQuery),
    responses(
        (status = 200, description = "Analysis report", content_type = "text/html", body = String),
        (status = 400, description = "No filename provided", body = ErrorResponse),
        (status = 404, description = "Analysis not ready yet", body = ErrorResponse),
        (status = 500, description = "Failed to fetch analysis", body = ErrorResponse)
    )
)]
pub async fn get_analysis(
    State(service): State<Arc<AnalysisService>>,
    Query(query): Query<AnalysisQuery>,
) -> Result<Response, AppError> {
    query
        .validate()
        .map_err(|_| AppError::BadRequest(MSG_NO_FILENAME.to_string()))?;
    let filename = query
        .filename
        .ok_or_else(|| AppError::BadRequest(MSG_NO_FILENAME.to_string()))?;

    debug!("GetAnalysis called with filename: {}", filename);

    let html = service.fetch_report(&filename).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/html"),
            (header::CACHE_CONTROL, "no-cache"),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        ],
        html,
    )
        .into_response())
}
