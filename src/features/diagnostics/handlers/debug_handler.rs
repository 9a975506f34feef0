use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::core::config::StorageConfig;
use crate::features::diagnostics::dtos::DebugInfoDto;

/// Report which storage settings are configured
///
/// Only presence flags and the region are returned, never credentials.
#[utoipa::path(
    get,
    path = "/api/debug",
    tag = "diagnostics",
    responses(
        (status = 200, description = "Storage configuration snapshot", body = DebugInfoDto)
    )
)]
pub async fn get_debug_info(State(config): State<Arc<StorageConfig>>) -> Json<DebugInfoDto> {
    Json(DebugInfoDto::from(config.as_ref()))
}

/// Liveness probe
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}
