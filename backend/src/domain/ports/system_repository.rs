//! Port for system-wide settings.
use async_trait::async_trait;
use data_errors::DataError;
use serde_json::Value;

use super::Record;

/// System-wide settings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SystemRepository: Send + Sync {
    /// Value of setting `key`, if set.
    async fn get_setting(&self, key: &str) -> Result<Option<Value>, DataError>;

    /// All settings rows.
    async fn list_settings(&self) -> Result<Vec<Record>, DataError>;
}
