//! Registry wiring for the Supabase binding.

use std::sync::Arc;

use crate::domain::Domain;
use crate::provider::{ImplementationId, ProviderRegistry, Repository};

use super::{
    SupabaseAddressRepository, SupabaseBillingRepository, SupabaseClient,
    SupabaseFeatureFlagRepository, SupabasePaymentRepository, SupabaseProfileRepository,
    SupabasePropertyRepository, SupabaseStorageRepository, SupabaseSubscriptionRepository,
    SupabaseSystemRepository, SupabaseTranslationRepository, SupabaseUserRepository,
};

/// Bindings that are recognized but have no repositories yet.
const PLANNED: [ImplementationId; 2] = [ImplementationId::FIREBASE, ImplementationId::PRISMA];

/// Registry with Supabase repositories for every domain.
///
/// `firebase` and `prisma` are recorded as not implemented so selecting them
/// reports what is available instead of an unknown name.
pub fn supabase_registry(client: Arc<SupabaseClient>) -> ProviderRegistry {
    let repositories = [
        Repository::User(Arc::new(SupabaseUserRepository::new(client.clone()))),
        Repository::Profile(Arc::new(SupabaseProfileRepository::new(client.clone()))),
        Repository::Payment(Arc::new(SupabasePaymentRepository::new(client.clone()))),
        Repository::Property(Arc::new(SupabasePropertyRepository::new(client.clone()))),
        Repository::System(Arc::new(SupabaseSystemRepository::new(client.clone()))),
        Repository::Translation(Arc::new(SupabaseTranslationRepository::new(client.clone()))),
        Repository::Address(Arc::new(SupabaseAddressRepository::new(client.clone()))),
        Repository::Storage(Arc::new(SupabaseStorageRepository::new(client.clone()))),
        Repository::Subscription(Arc::new(SupabaseSubscriptionRepository::new(
            client.clone(),
        ))),
        Repository::Billing(Arc::new(SupabaseBillingRepository::new(client.clone()))),
        Repository::FeatureFlag(Arc::new(SupabaseFeatureFlagRepository::new(client))),
    ];

    let registry = repositories
        .into_iter()
        .fold(ProviderRegistry::new(), |registry, repository| {
            registry.with_implementation(ImplementationId::SUPABASE, repository)
        });

    Domain::ALL.into_iter().fold(registry, |registry, domain| {
        PLANNED.into_iter().fold(registry, |registry, id| {
            registry.with_unimplemented(domain, id)
        })
    })
}
