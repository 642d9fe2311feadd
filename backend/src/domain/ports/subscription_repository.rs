//! Port for subscription plans and active subscriptions.
use async_trait::async_trait;
use data_errors::DataError;

use super::Record;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// The active subscription of `user_id`, if any.
    async fn active_for_user(&self, user_id: &str) -> Result<Option<Record>, DataError>;

    /// Plans on offer.
    async fn list_plans(&self) -> Result<Vec<Record>, DataError>;
}
