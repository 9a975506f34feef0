use axum::{
    extract::{multipart::MultipartError, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::AppError;
use crate::core::extractor::AppMultipart;
use crate::features::uploads::dtos::{UploadFileDto, UploadResponseDto};
use crate::features::uploads::services::{IncomingFile, UploadService};
use crate::shared::constants::{DEFAULT_CONTENT_TYPE, MSG_FILE_TOO_LARGE, MSG_NO_FILE_UPLOADED};
use crate::shared::keys::sanitize_filename;
use crate::shared::types::ErrorResponse;

/// Upload a file for analysis
///
/// Accepts multipart/form-data with a single `file` part. The file is stored under
/// `<unix-timestamp-ms>-<original filename>`; the analysis report later appears under
/// the same key with a `.html` extension.
#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "uploads",
    request_body(
        content = UploadFileDto,
        content_type = "multipart/form-data",
        description = "Image, CSV or GeoTIFF file",
    ),
    responses(
        (status = 200, description = "File uploaded successfully", body = UploadResponseDto),
        (status = 400, description = "No file uploaded", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Upload failed", body = ErrorResponse)
    )
)]
pub async fn upload_file(
    State(service): State<Arc<UploadService>>,
    AppMultipart(mut multipart): AppMultipart,
) -> Result<Json<UploadResponseDto>, AppError> {
    let mut file: Option<IncomingFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "Failed to read multipart data"))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        if field_name != "file" || file.is_some() {
            debug!("Ignoring field: {}", field_name);
            continue;
        }

        // A plain text field, or an empty file input, carries no usable filename
        let Some(original_filename) = field.file_name().and_then(sanitize_filename) else {
            debug!("Ignoring `file` field without a filename");
            continue;
        };

        let content_type = field
            .content_type()
            .filter(|ct| !ct.is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        let data = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, "Failed to read file data"))?;

        file = Some(IncomingFile {
            original_filename,
            content_type,
            data: data.to_vec(),
        });
    }

    let file = file.ok_or_else(|| AppError::BadRequest(MSG_NO_FILE_UPLOADED.to_string()))?;

    let response = service.upload(file).await?;

    Ok(Json(response))
}

/// Body limit hits surface while streaming fields; everything else is malformed input
fn multipart_error(e: MultipartError, context: &str) -> AppError {
    debug!("{}: {}", context, e);

    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(MSG_FILE_TOO_LARGE.to_string())
    } else {
        AppError::BadRequest(format!("{}: {}", context, e))
    }
}
