use utoipa::{Modify, OpenApi};

use crate::features::analysis::handlers as analysis_handlers;
use crate::features::diagnostics::{dtos as diagnostics_dtos, handlers as diagnostics_handlers};
use crate::features::uploads::{dtos as uploads_dtos, handlers as uploads_handlers};
use crate::shared::types::{ConfigDiagnostics, ErrorResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Uploads
        uploads_handlers::upload_file,
        // Analysis
        analysis_handlers::get_analysis,
        // Diagnostics
        diagnostics_handlers::get_debug_info,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            ConfigDiagnostics,
            // Uploads
            uploads_dtos::UploadFileDto,
            uploads_dtos::UploadResponseDto,
            // Diagnostics
            diagnostics_dtos::DebugInfoDto,
        )
    ),
    tags(
        (name = "uploads", description = "Upload images, CSV and GeoTIFF files for analysis"),
        (name = "analysis", description = "Fetch generated analysis reports"),
        (name = "diagnostics", description = "Configuration diagnostics"),
    ),
    info(
        title = "Forest AI API",
        version = "0.1.0",
        description = "Upload forest data and fetch its analysis reports",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
