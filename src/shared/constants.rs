/// Bucket holding both uploaded files and the generated analysis reports
pub const ANALYSIS_BUCKET: &str = "forest-fire-data-bucket";

/// Maximum accepted upload size in bytes (100 MiB)
pub const MAX_UPLOAD_SIZE: usize = 100 * 1024 * 1024;

/// Extra room on the request body limit for multipart framing
pub const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Content type used when a multipart part does not declare one
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

// =============================================================================
// RESPONSE MESSAGES
// =============================================================================

pub const MSG_UPLOAD_SUCCESS: &str = "File uploaded successfully";
pub const MSG_NO_FILE_UPLOADED: &str = "No file uploaded";
pub const MSG_FILE_TOO_LARGE: &str = "File too large. Maximum size is 100 MB.";
pub const MSG_NO_FILENAME: &str = "No filename provided";
pub const MSG_ANALYSIS_NOT_READY: &str = "Analysis not ready yet";
