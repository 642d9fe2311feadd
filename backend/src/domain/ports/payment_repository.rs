//! Port for payments.
use async_trait::async_trait;
use data_errors::DataError;

use super::Record;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Payments made by `user_id`, newest first.
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Record>, DataError>;

    /// Record a payment and return it as stored.
    async fn create(&self, payment: Record) -> Result<Record, DataError>;
}
