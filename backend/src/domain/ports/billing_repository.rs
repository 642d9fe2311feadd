//! Port for invoices.
use async_trait::async_trait;
use data_errors::DataError;

use super::Record;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BillingRepository: Send + Sync {
    /// Invoices issued to `user_id`.
    async fn list_invoices(&self, user_id: &str) -> Result<Vec<Record>, DataError>;

    /// Fetch one invoice.
    async fn find_invoice(&self, id: &str) -> Result<Option<Record>, DataError>;
}
