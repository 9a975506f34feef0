//! Storage abstraction used by the upload and analysis services

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// The object does not exist (yet)
    #[error("Object not found: {0}")]
    NotFound(String),

    /// Credentials or region are missing or unusable
    #[error("{0}")]
    Config(String),

    /// The storage service rejected or failed the request
    #[error("{0}")]
    Backend(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Minimal object store contract: one write and one read per request
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write `data` under `key`, replacing any existing object
    async fn put_object(&self, key: &str, data: Vec<u8>, content_type: &str) -> StorageResult<()>;

    /// Read the object stored under `key`
    ///
    /// A missing object is reported as [`StorageError::NotFound`], never as a backend error.
    async fn get_object(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Name of the bucket this store writes to
    fn bucket_name(&self) -> &str;
}
