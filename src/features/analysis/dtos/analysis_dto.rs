use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

/// Query parameters for fetching an analysis report
#[derive(Debug, Deserialize, Validate, IntoParams)]
pub struct AnalysisQuery {
    /// Storage key returned by the upload, or the report key derived from it
    #[validate(length(min = 1, message = "No filename provided"))]
    #[param(example = "1712345678901-canopy.html")]
    pub filename: Option<String>,
}
