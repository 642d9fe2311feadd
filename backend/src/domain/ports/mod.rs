//! Domain ports: one repository contract per [`Domain`](super::Domain).
//!
//! Ports describe what the application needs from a backend without naming
//! one. Every method reports failures as a [`data_errors::DataError`];
//! adapters must never surface backend-native errors. Records are passed as
//! JSON objects because the persisted schema belongs to the backend.

use serde_json::{Map, Value};

mod address_repository;
mod billing_repository;
mod feature_flag_repository;
mod payment_repository;
mod profile_repository;
mod property_repository;
mod storage_repository;
mod subscription_repository;
mod system_repository;
mod translation_repository;
mod user_repository;

pub use address_repository::AddressRepository;
pub use billing_repository::BillingRepository;
pub use feature_flag_repository::FeatureFlagRepository;
pub use payment_repository::PaymentRepository;
pub use profile_repository::ProfileRepository;
pub use property_repository::PropertyRepository;
pub use storage_repository::StorageRepository;
pub use subscription_repository::SubscriptionRepository;
pub use system_repository::SystemRepository;
pub use translation_repository::TranslationRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use address_repository::MockAddressRepository;
#[cfg(test)]
pub use billing_repository::MockBillingRepository;
#[cfg(test)]
pub use feature_flag_repository::MockFeatureFlagRepository;
#[cfg(test)]
pub use payment_repository::MockPaymentRepository;
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
#[cfg(test)]
pub use property_repository::MockPropertyRepository;
#[cfg(test)]
pub use storage_repository::MockStorageRepository;
#[cfg(test)]
pub use subscription_repository::MockSubscriptionRepository;
#[cfg(test)]
pub use system_repository::MockSystemRepository;
#[cfg(test)]
pub use translation_repository::MockTranslationRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;

/// A stored row as a JSON object.
pub type Record = Map<String, Value>;

/// Column equality filter used by list queries.
///
/// # Examples
/// ```
/// use data_provider::domain::ports::Filter;
///
/// let filter = Filter::equals("city", "Valencia");
/// assert_eq!(filter.column(), "city");
/// assert_eq!(filter.value(), "Valencia");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    column: String,
    value: String,
}

impl Filter {
    /// Match rows whose `column` equals `value`.
    pub fn equals(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Column being matched.
    pub fn column(&self) -> &str {
        self.column.as_str()
    }

    /// Expected value.
    pub fn value(&self) -> &str {
        self.value.as_str()
    }
}
