#[cfg(test)]
use crate::modules::storage::{ObjectStore, StorageError, StorageResult};

#[cfg(test)]
use async_trait::async_trait;

#[cfg(test)]
use std::collections::HashMap;

#[cfg(test)]
use tokio::sync::RwLock;

#[cfg(test)]
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub data: Vec<u8>,
    pub content_type: String,
}

/// In-memory object store standing in for the S3 bucket
#[cfg(test)]
#[derive(Default)]
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<String, StoredObject>>,
}

#[cfg(test)]
impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object, as the external analysis pipeline would
    pub async fn insert(&self, key: &str, data: &[u8], content_type: &str) {
        self.objects.write().await.insert(
            key.to_string(),
            StoredObject {
                data: data.to_vec(),
                content_type: content_type.to_string(),
            },
        );
    }

    pub async fn object(&self, key: &str) -> Option<StoredObject> {
        self.objects.read().await.get(key).cloned()
    }

    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[cfg(test)]
#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put_object(&self, key: &str, data: Vec<u8>, content_type: &str) -> StorageResult<()> {
        self.insert(key, &data, content_type).await;
        Ok(())
    }

    async fn get_object(&self, key: &str) -> StorageResult<Vec<u8>> {
        self.object(key)
            .await
            .map(|object| object.data)
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    fn bucket_name(&self) -> &str {
        "test-bucket"
    }
}

/// Object store whose every call fails with the configured error
#[cfg(test)]
pub struct FailingObjectStore {
    make_error: Box<dyn Fn() -> StorageError + Send + Sync>,
}

#[cfg(test)]
impl FailingObjectStore {
    pub fn new(make_error: impl Fn() -> StorageError + Send + Sync + 'static) -> Self {
        Self {
            make_error: Box::new(make_error),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl ObjectStore for FailingObjectStore {
    async fn put_object(&self, _key: &str, _data: Vec<u8>, _content_type: &str) -> StorageResult<()> {
        Err((self.make_error)())
    }

    async fn get_object(&self, _key: &str) -> StorageResult<Vec<u8>> {
        Err((self.make_error)())
    }

    fn bucket_name(&self) -> &str {
        "test-bucket"
    }
}
