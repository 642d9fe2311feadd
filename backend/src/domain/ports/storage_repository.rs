//! Port for file storage buckets.
use async_trait::async_trait;
use data_errors::DataError;

/// Object storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageRepository: Send + Sync {
    /// Store `bytes` at `path` in `bucket`, returning the object key.
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, DataError>;

    /// Delete the objects at `paths`.
    async fn remove(&self, bucket: &str, paths: Vec<String>) -> Result<(), DataError>;

    /// Public URL of an object. Performs no I/O.
    fn public_url(&self, bucket: &str, path: &str) -> String;
}
