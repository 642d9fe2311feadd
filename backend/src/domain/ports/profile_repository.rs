//! Port for user profile records.
use async_trait::async_trait;
use data_errors::DataError;

use super::Record;

/// Profile storage keyed by the owning user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch the profile of `user_id`; `None` when none was created yet.
    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<Record>, DataError>;

    /// Apply `changes` and return the stored profile.
    async fn update(&self, user_id: &str, changes: Record) -> Result<Record, DataError>;
}
