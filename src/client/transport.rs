use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, multipart, Client};
use tracing::debug;

use super::response::{RawResponse, UploadError};
use super::validation::SelectedFile;

/// Sends a selected file to the upload endpoint
#[async_trait]
pub trait UploadTransport: Send + Sync {
    async fn send(&self, file: &SelectedFile) -> Result<RawResponse, UploadError>;
}

/// HTTP transport posting a single-part multipart body to `/api/upload`
pub struct HttpUploadTransport {
    http: Client,
    endpoint: String,
}

impl HttpUploadTransport {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            http,
            endpoint: format!("{}/api/upload", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl UploadTransport for HttpUploadTransport {
    async fn send(&self, file: &SelectedFile) -> Result<RawResponse, UploadError> {
        let part = multipart::Part::bytes(file.content.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| UploadError::Transport(format!("Invalid MIME type: {}", e)))?;
        let form = multipart::Form::new().part("file", part);

        debug!(
            "Uploading '{}' ({} bytes) to {}",
            file.name, file.size, self.endpoint
        );

        let response = self
            .http
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .text()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}
