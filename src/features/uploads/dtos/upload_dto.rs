use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Upload file request DTO for OpenAPI documentation
/// Note: This struct is for Swagger UI documentation only.
/// The actual handler reads the multipart body directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadFileDto {
    /// Image, CSV or GeoTIFF file to analyse
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: String,
}

/// Response DTO for a stored upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UploadResponseDto {
    #[schema(example = "File uploaded successfully")]
    pub message: String,
    /// Storage key of the uploaded object
    #[schema(example = "1712345678901-canopy.png")]
    pub filename: String,
}
