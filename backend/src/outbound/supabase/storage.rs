//! Supabase Storage-backed [`StorageRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use data_errors::{DataError, with_error_handling};

use crate::domain::ports::StorageRepository;

use super::SupabaseClient;

/// Object storage in Supabase buckets.
#[derive(Debug, Clone)]
pub struct SupabaseStorageRepository {
    client: Arc<SupabaseClient>,
}

impl SupabaseStorageRepository {
    /// Wrap a shared client.
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StorageRepository for SupabaseStorageRepository {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, DataError> {
        with_error_handling(
            self.client.upload(bucket, path, bytes, content_type),
            Some("File"),
        )
        .await
    }

    async fn remove(&self, bucket: &str, paths: Vec<String>) -> Result<(), DataError> {
        with_error_handling(self.client.remove(bucket, &paths), Some("File")).await
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        self.client.public_url(bucket, path)
    }
}
