//! The resolved bundle of one repository per domain.

use std::fmt;
use std::sync::Arc;

use crate::domain::ports::{
    AddressRepository, BillingRepository, FeatureFlagRepository, PaymentRepository,
    ProfileRepository, PropertyRepository, StorageRepository, SubscriptionRepository,
    SystemRepository, TranslationRepository, UserRepository,
};

use super::ProviderConfig;

/// One concrete repository per domain.
///
/// Built by [`ProviderFactory`](super::ProviderFactory) and never mutated
/// afterwards: rebuilding produces a new value, so clones held by in-flight
/// work keep the repositories they started with. Cheap to clone and safe to
/// share across tasks.
#[derive(Clone)]
pub struct DataProvider {
    /// Authentication.
    pub user: Arc<dyn UserRepository>,
    /// User profiles.
    pub profile: Arc<dyn ProfileRepository>,
    /// Payments.
    pub payment: Arc<dyn PaymentRepository>,
    /// Listings.
    pub property: Arc<dyn PropertyRepository>,
    /// System settings.
    pub system: Arc<dyn SystemRepository>,
    /// Localized strings.
    pub translation: Arc<dyn TranslationRepository>,
    /// Addresses.
    pub address: Arc<dyn AddressRepository>,
    /// File storage.
    pub storage: Arc<dyn StorageRepository>,
    /// Subscriptions.
    pub subscription: Arc<dyn SubscriptionRepository>,
    /// Invoices.
    pub billing: Arc<dyn BillingRepository>,
    /// Feature toggles.
    pub feature_flag: Arc<dyn FeatureFlagRepository>,
    pub(super) config: ProviderConfig,
}

impl DataProvider {
    /// Configuration the repositories were resolved from.
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

impl fmt::Debug for DataProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataProvider")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
