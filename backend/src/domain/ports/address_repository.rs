//! Port for postal addresses and the location hierarchy.
use async_trait::async_trait;
use data_errors::DataError;
use serde_json::Value;

use super::Record;

/// Address storage.
///
/// `resolve_hierarchy` delegates to a backend-side procedure that walks the
/// country → region → city chain for a location id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// Fetch one address.
    async fn find_by_id(&self, id: &str) -> Result<Option<Record>, DataError>;

    /// Addresses owned by `owner_id`.
    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<Record>, DataError>;

    /// Location hierarchy for `location_id`.
    async fn resolve_hierarchy(&self, location_id: &str) -> Result<Value, DataError>;
}
