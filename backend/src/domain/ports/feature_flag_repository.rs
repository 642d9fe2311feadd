//! Port for feature toggles.
use async_trait::async_trait;
use data_errors::DataError;

use super::Record;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeatureFlagRepository: Send + Sync {
    /// Whether flag `key` is on. Unknown flags are off.
    async fn is_enabled(&self, key: &str) -> Result<bool, DataError>;

    /// Every flag row.
    async fn list(&self) -> Result<Vec<Record>, DataError>;
}
