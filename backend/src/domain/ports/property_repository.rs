//! Port for real-estate listings.
//!
//! This is the only domain with a full CRUD surface; listing filters are
//! plain column equality matches.
use async_trait::async_trait;
use data_errors::DataError;

use super::{Filter, Record};

/// Listing storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    /// Fetch one listing.
    async fn find_by_id(&self, id: &str) -> Result<Option<Record>, DataError>;

    /// Listings matching every filter.
    async fn list(&self, filters: Vec<Filter>) -> Result<Vec<Record>, DataError>;

    /// Insert a listing and return it as stored.
    async fn create(&self, property: Record) -> Result<Record, DataError>;

    /// Apply `changes` to listing `id` and return the stored listing.
    async fn update(&self, id: &str, changes: Record) -> Result<Record, DataError>;

    /// Remove listing `id`.
    async fn delete(&self, id: &str) -> Result<(), DataError>;
}
