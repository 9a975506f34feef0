//! Storage module for uploaded files and analysis reports
//!
//! Provides the [`ObjectStore`] abstraction and its S3 implementation.

mod object_store;
mod s3_client;

pub use object_store::{ObjectStore, StorageError, StorageResult};
pub use s3_client::S3ObjectStore;
