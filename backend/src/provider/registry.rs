//! Per-domain tables of repository implementations.
//!
//! A [`ProviderRegistry`] maps each domain to an ordered table of
//! implementation identifier → [`Slot`]. A slot is either a usable repository
//! or an explicit [`Slot::NotImplemented`] marker, so capability gaps show up
//! in diagnostics instead of being indistinguishable from typos.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::domain::Domain;
use crate::domain::ports::{
    AddressRepository, BillingRepository, FeatureFlagRepository, PaymentRepository,
    ProfileRepository, PropertyRepository, StorageRepository, SubscriptionRepository,
    SystemRepository, TranslationRepository, UserRepository,
};

use super::{ImplementationId, ResolutionError};

macro_rules! define_repository {
    ($($variant:ident => $port:ident, $accessor:ident;)*) => {
        /// A concrete repository for exactly one domain.
        ///
        /// The variant fixes the domain, so a registry cannot file a
        /// repository under the wrong one.
        #[derive(Clone)]
        pub enum Repository {
            $(
                #[doc = concat!("Implementation of [`", stringify!($port), "`].")]
                $variant(Arc<dyn $port>),
            )*
        }

        impl Repository {
            /// Domain served by this repository.
            pub fn domain(&self) -> Domain {
                match self {
                    $(Self::$variant(_) => Domain::$variant,)*
                }
            }

            $(
                pub(crate) fn $accessor(self) -> Option<Arc<dyn $port>> {
                    match self {
                        Self::$variant(repository) => Some(repository),
                        _ => None,
                    }
                }
            )*
        }
    };
}

define_repository! {
    User => UserRepository, into_user;
    Profile => ProfileRepository, into_profile;
    Payment => PaymentRepository, into_payment;
    Property => PropertyRepository, into_property;
    System => SystemRepository, into_system;
    Translation => TranslationRepository, into_translation;
    Address => AddressRepository, into_address;
    Storage => StorageRepository, into_storage;
    Subscription => SubscriptionRepository, into_subscription;
    Billing => BillingRepository, into_billing;
    FeatureFlag => FeatureFlagRepository, into_feature_flag;
}

impl fmt::Debug for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Repository").field(&self.domain()).finish()
    }
}

/// Registry entry for one implementation identifier.
#[derive(Debug, Clone)]
pub enum Slot {
    /// A usable repository.
    Implemented(Repository),
    /// Recognized identifier with no implementation yet.
    NotImplemented,
}

/// Domain → implementation table, read-only once built.
///
/// # Examples
/// ```
/// use data_provider::domain::Domain;
/// use data_provider::provider::{ImplementationId, ProviderRegistry};
///
/// let registry = ProviderRegistry::new()
///     .with_unimplemented(Domain::User, ImplementationId::FIREBASE);
/// assert!(registry.list_available_implementations(Domain::User).is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    domains: BTreeMap<Domain, Vec<(ImplementationId, Slot)>>,
}

impl ProviderRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// File `repository` under its domain as `id`, replacing any previous slot.
    #[must_use]
    pub fn with_implementation(mut self, id: ImplementationId, repository: Repository) -> Self {
        self.insert(repository.domain(), id, Slot::Implemented(repository));
        self
    }

    /// Record that `id` is a known but unimplemented binding for `domain`.
    #[must_use]
    pub fn with_unimplemented(mut self, domain: Domain, id: ImplementationId) -> Self {
        self.insert(domain, id, Slot::NotImplemented);
        self
    }

    fn insert(&mut self, domain: Domain, id: ImplementationId, slot: Slot) {
        let table = self.domains.entry(domain).or_default();
        match table.iter_mut().find(|(existing, _)| *existing == id) {
            Some(entry) => entry.1 = slot,
            None => table.push((id, slot)),
        }
    }

    /// Domains that have a table, in [`Domain`] order.
    pub fn domains(&self) -> impl Iterator<Item = Domain> + '_ {
        self.domains.keys().copied()
    }

    /// Look up the repository registered for `domain` under `id`.
    ///
    /// # Errors
    ///
    /// [`ResolutionError::DomainNotFound`] when the registry has no table for
    /// `domain`; [`ResolutionError::ImplementationUnavailable`] when the table
    /// lacks `id` or marks it as not implemented.
    pub fn resolve(
        &self,
        domain: Domain,
        id: &ImplementationId,
    ) -> Result<Repository, ResolutionError> {
        let table = self
            .domains
            .get(&domain)
            .ok_or_else(|| ResolutionError::DomainNotFound {
                domain: domain.as_str().to_owned(),
            })?;

        let implemented = table.iter().find_map(|(existing, slot)| match slot {
            Slot::Implemented(repository) if existing == id => Some(repository.clone()),
            _ => None,
        });

        implemented.ok_or_else(|| ResolutionError::ImplementationUnavailable {
            implementation: id.as_str().to_owned(),
            domain: domain.as_str().to_owned(),
            available: self.list_available_implementations(domain),
        })
    }

    /// [`ProviderRegistry::resolve`] for names coming from configuration or
    /// tooling.
    ///
    /// # Errors
    ///
    /// As [`ProviderRegistry::resolve`]; a name that is not a domain reports
    /// [`ResolutionError::DomainNotFound`] and a malformed identifier reports
    /// [`ResolutionError::ImplementationUnavailable`].
    pub fn resolve_named(
        &self,
        domain: &str,
        implementation: &str,
    ) -> Result<Repository, ResolutionError> {
        let parsed_domain =
            domain
                .parse::<Domain>()
                .map_err(|_| ResolutionError::DomainNotFound {
                    domain: domain.to_owned(),
                })?;
        match ImplementationId::new(implementation) {
            Ok(id) => self.resolve(parsed_domain, &id),
            Err(_) => Err(ResolutionError::ImplementationUnavailable {
                implementation: implementation.to_owned(),
                domain: parsed_domain.as_str().to_owned(),
                available: self.list_available_implementations(parsed_domain),
            }),
        }
    }

    /// Implemented identifiers for `domain`, in registration order.
    pub fn list_available_implementations(&self, domain: Domain) -> Vec<ImplementationId> {
        self.domains
            .get(&domain)
            .map(|table| {
                table
                    .iter()
                    .filter(|(_, slot)| matches!(slot, Slot::Implemented(_)))
                    .map(|(id, _)| id.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockPaymentRepository, MockUserRepository};
    use rstest::{fixture, rstest};

    fn user_repository() -> Repository {
        Repository::User(Arc::new(MockUserRepository::new()))
    }

    #[fixture]
    fn registry() -> ProviderRegistry {
        ProviderRegistry::new()
            .with_implementation(ImplementationId::SUPABASE, user_repository())
            .with_unimplemented(Domain::User, ImplementationId::FIREBASE)
            .with_unimplemented(Domain::User, ImplementationId::PRISMA)
            .with_implementation(
                ImplementationId::SUPABASE,
                Repository::Payment(Arc::new(MockPaymentRepository::new())),
            )
    }

    #[rstest]
    fn resolves_registered_implementation(registry: ProviderRegistry) {
        let repository = registry.resolve(Domain::User, &ImplementationId::SUPABASE);
        assert_eq!(repository.map(|r| r.domain()), Ok(Domain::User));
    }

    #[rstest]
    fn not_implemented_slot_is_unavailable(registry: ProviderRegistry) {
        let err = registry
            .resolve(Domain::User, &ImplementationId::FIREBASE)
            .map(|r| r.domain());
        assert_eq!(
            err,
            Err(ResolutionError::ImplementationUnavailable {
                implementation: "firebase".to_owned(),
                domain: "user".to_owned(),
                available: vec![ImplementationId::SUPABASE],
            })
        );
    }

    #[rstest]
    fn unregistered_domain_is_not_found(registry: ProviderRegistry) {
        let err = registry
            .resolve(Domain::Billing, &ImplementationId::SUPABASE)
            .map(|r| r.domain());
        assert_eq!(
            err,
            Err(ResolutionError::DomainNotFound {
                domain: "billing".to_owned()
            })
        );
    }

    #[rstest]
    fn unknown_domain_and_unknown_implementation_are_distinguishable(
        registry: ProviderRegistry,
    ) {
        let unknown_domain = registry
            .resolve_named("nonexistent_domain", "supabase")
            .map(|r| r.domain())
            .map_err(|e| e.to_string());
        let unknown_implementation = registry
            .resolve_named("user", "unregistered_impl")
            .map(|r| r.domain())
            .map_err(|e| e.to_string());

        assert_eq!(
            unknown_domain,
            Err("data provider domain 'nonexistent_domain' not found".to_owned())
        );
        assert_eq!(
            unknown_implementation,
            Err(
                "implementation 'unregistered_impl' is not available for domain 'user' (available: supabase)"
                    .to_owned()
            )
        );
    }

    #[rstest]
    fn malformed_identifier_is_reported_as_unavailable(registry: ProviderRegistry) {
        let err = registry
            .resolve_named("user", "Not An Id")
            .map(|r| r.domain());
        assert!(matches!(
            err,
            Err(ResolutionError::ImplementationUnavailable { .. })
        ));
    }

    #[rstest]
    fn lists_only_implemented_slots_in_registration_order() {
        let registry = ProviderRegistry::new()
            .with_unimplemented(Domain::User, ImplementationId::FIREBASE)
            .with_implementation(ImplementationId::PRISMA, user_repository())
            .with_implementation(ImplementationId::SUPABASE, user_repository());

        assert_eq!(
            registry.list_available_implementations(Domain::User),
            vec![ImplementationId::PRISMA, ImplementationId::SUPABASE]
        );
        assert!(
            registry
                .list_available_implementations(Domain::Storage)
                .is_empty()
        );
    }

    #[rstest]
    fn later_registration_replaces_slot_in_place() {
        let registry = ProviderRegistry::new()
            .with_implementation(ImplementationId::FIREBASE, user_repository())
            .with_implementation(ImplementationId::SUPABASE, user_repository())
            .with_unimplemented(Domain::User, ImplementationId::FIREBASE);

        assert_eq!(
            registry.list_available_implementations(Domain::User),
            vec![ImplementationId::SUPABASE]
        );
        assert_eq!(registry.domains().collect::<Vec<_>>(), vec![Domain::User]);
    }
}
