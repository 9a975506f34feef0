use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info};

use crate::core::error::{AppError, Result};
use crate::features::uploads::dtos::UploadResponseDto;
use crate::modules::storage::ObjectStore;
use crate::shared::constants::MSG_UPLOAD_SUCCESS;
use crate::shared::keys::storage_key;
use crate::shared::types::ConfigDiagnostics;

/// A file received from a multipart upload
#[derive(Debug)]
pub struct IncomingFile {
    pub original_filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Service storing uploads under timestamped keys
pub struct UploadService {
    store: Arc<dyn ObjectStore>,
    diagnostics: ConfigDiagnostics,
}

impl UploadService {
    pub fn new(store: Arc<dyn ObjectStore>, diagnostics: ConfigDiagnostics) -> Self {
        Self { store, diagnostics }
    }

    /// Write the file to the bucket under `<now-ms>-<original filename>`
    ///
    /// Exactly one object is written on success. Nothing is cleaned up on failure.
    pub async fn upload(&self, file: IncomingFile) -> Result<UploadResponseDto> {
        let key = storage_key(Utc::now().timestamp_millis(), &file.original_filename);
        let size = file.data.len();

        if let Err(e) = self
            .store
            .put_object(&key, file.data, &file.content_type)
            .await
        {
            error!(
                key = %key,
                has_region = self.diagnostics.has_region,
                has_access_key_id = self.diagnostics.has_access_key_id,
                has_secret_key = self.diagnostics.has_secret_key,
                "Upload error: {}",
                e
            );
            return Err(AppError::Backend {
                message: format!("Upload failed: {}", e),
                details: self.diagnostics,
            });
        }

        info!(
            "File stored: key={}, bucket={}, content_type={}, size={}",
            key,
            self.store.bucket_name(),
            file.content_type,
            size
        );

        Ok(UploadResponseDto {
            message: MSG_UPLOAD_SUCCESS.to_string(),
            filename: key,
        })
    }
}
