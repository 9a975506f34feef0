//! S3 storage client
//!
//! Uses the rust-s3 crate for lightweight S3 operations against AWS or any
//! S3-compatible endpoint.

use async_trait::async_trait;
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::{Bucket, Region};
use tracing::{debug, info, warn};

use super::object_store::{ObjectStore, StorageError, StorageResult};
use crate::core::config::StorageConfig;

/// S3-backed [`ObjectStore`]
///
/// The bucket handle is built per request from the injected configuration, so a
/// missing credential surfaces as a [`StorageError::Config`] on the request that
/// needed it instead of preventing startup.
pub struct S3ObjectStore {
    config: StorageConfig,
    bucket_name: String,
}

impl S3ObjectStore {
    pub fn new(config: StorageConfig, bucket_name: impl Into<String>) -> Self {
        let bucket_name = bucket_name.into();
        let diagnostics = config.diagnostics();

        if diagnostics.is_complete() {
            info!(
                "S3 object store initialized for bucket: {}, region: {}, endpoint: {}",
                bucket_name,
                config.region.as_deref().unwrap_or("-"),
                config.endpoint.as_deref().unwrap_or("aws")
            );
        } else {
            warn!(
                has_region = diagnostics.has_region,
                has_access_key_id = diagnostics.has_access_key_id,
                has_secret_key = diagnostics.has_secret_key,
                "S3 configuration is incomplete; storage requests will fail until it is provided"
            );
        }

        Self {
            config,
            bucket_name,
        }
    }

    /// Build a bucket handle, validating configuration first
    fn bucket(&self) -> StorageResult<Box<Bucket>> {
        let access_key = self
            .config
            .access_key_id
            .as_deref()
            .ok_or_else(|| StorageError::Config("AWS Access Key ID is missing".to_string()))?;
        let secret_key = self
            .config
            .secret_access_key
            .as_deref()
            .ok_or_else(|| StorageError::Config("AWS Secret Access Key is missing".to_string()))?;
        let region_name = self
            .config
            .region
            .as_deref()
            .ok_or_else(|| StorageError::Config("AWS Region is missing".to_string()))?;

        let credentials = Credentials::new(Some(access_key), Some(secret_key), None, None, None)
            .map_err(|e| StorageError::Config(format!("Invalid AWS credentials: {}", e)))?;

        let region = match &self.config.endpoint {
            Some(endpoint) => Region::Custom {
                region: region_name.to_string(),
                endpoint: endpoint.clone(),
            },
            None => region_name.parse::<Region>().map_err(|e| {
                StorageError::Config(format!("Invalid AWS region '{}': {}", region_name, e))
            })?,
        };

        let mut bucket = Bucket::new(&self.bucket_name, region, credentials)
            .map_err(|e| StorageError::Config(format!("Failed to create S3 bucket handle: {}", e)))?;

        // S3-compatible servers are addressed as http://endpoint/bucket
        if self.config.endpoint.is_some() {
            bucket.set_path_style();
        }

        Ok(bucket)
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put_object(&self, key: &str, data: Vec<u8>, content_type: &str) -> StorageResult<()> {
        let bucket = self.bucket()?;
        let size = data.len();

        let response = bucket
            .put_object_with_content_type(key, &data, content_type)
            .await
            .map_err(|e| map_s3_error(key, e))?;

        check_status(key, response.status_code(), response.as_slice())?;

        debug!(
            "Uploaded object '{}' ({} bytes, {}) to bucket '{}'",
            key, size, content_type, self.bucket_name
        );
        Ok(())
    }

    async fn get_object(&self, key: &str) -> StorageResult<Vec<u8>> {
        let bucket = self.bucket()?;

        let response = bucket
            .get_object(key)
            .await
            .map_err(|e| map_s3_error(key, e))?;

        check_status(key, response.status_code(), response.as_slice())?;

        debug!(
            "Downloaded object '{}' from bucket '{}'",
            key, self.bucket_name
        );
        Ok(response.to_vec())
    }

    fn bucket_name(&self) -> &str {
        &self.bucket_name
    }
}

/// Translate an rust-s3 error, keeping "missing object" distinguishable
fn map_s3_error(key: &str, error: S3Error) -> StorageError {
    match error {
        S3Error::HttpFailWithBody(status, body) => match check_status(key, status, body.as_bytes()) {
            Err(e) => e,
            Ok(()) => StorageError::Backend(format!("Unexpected S3 response for '{}'", key)),
        },
        other => StorageError::Backend(other.to_string()),
    }
}

/// Map a raw S3 status code and body onto the storage error taxonomy
fn check_status(key: &str, status: u16, body: &[u8]) -> StorageResult<()> {
    if (200..300).contains(&status) {
        return Ok(());
    }

    let body = String::from_utf8_lossy(body);
    let code = xml_element(&body, "Code");

    if status == 404 || code == Some("NoSuchKey") {
        return Err(StorageError::NotFound(key.to_string()));
    }

    let message = xml_element(&body, "Message")
        .map(str::to_string)
        .unwrap_or_else(|| format!("S3 request for '{}' returned HTTP {}", key, status));

    match code {
        Some("InvalidAccessKeyId" | "SignatureDoesNotMatch" | "AccessDenied") => {
            Err(StorageError::Config(message))
        }
        _ => Err(StorageError::Backend(message)),
    }
}

/// Extract the text of the first `<name>...</name>` element of an S3 error document
fn xml_element<'a>(body: &'a str, name: &str) -> Option<&'a str> {
    let open = format!("<{}>", name);
    let close = format!("</{}>", name);

    let start = body.find(&open)? + open.len();
    let end = start + body[start..].find(&close)?;
    Some(body[start..end].trim())
}
