//! Builds a [`DataProvider`] from a registry and the layered configuration.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::Domain;

use super::registry::Repository;
use super::{
    DataProvider, ImplementationId, ProviderConfig, ProviderOverrides, ProviderRegistry,
    ResolutionError, environment_override,
};

/// Resolves one repository per domain.
///
/// The factory holds no state besides its registry and compiled-in defaults;
/// every build starts from scratch and keeps no reference to the overrides it
/// was given.
#[derive(Debug, Clone)]
pub struct ProviderFactory {
    registry: ProviderRegistry,
    defaults: ProviderConfig,
}

impl ProviderFactory {
    /// Factory over `registry` with [`ProviderConfig::defaults`].
    pub fn new(registry: ProviderRegistry) -> Self {
        Self {
            registry,
            defaults: ProviderConfig::defaults(),
        }
    }

    /// Replace the compiled-in defaults.
    #[must_use]
    pub fn with_defaults(mut self, defaults: ProviderConfig) -> Self {
        self.defaults = defaults;
        self
    }

    /// Registry backing this factory.
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Merge defaults, `environment` and `overrides` into a full configuration.
    pub fn resolve_config(
        &self,
        environment: Option<&ImplementationId>,
        overrides: Option<&ProviderOverrides>,
    ) -> ProviderConfig {
        let empty = ProviderOverrides::new();
        self.defaults.layer(environment, overrides.unwrap_or(&empty))
    }

    /// Build the provider, reading the environment layer from the process.
    ///
    /// # Errors
    ///
    /// [`ResolutionError::Environment`] when the environment cannot be read.
    /// Otherwise fails with the first domain that cannot be resolved; no
    /// partial provider is ever returned.
    pub fn build_provider(
        &self,
        overrides: Option<&ProviderOverrides>,
    ) -> Result<DataProvider, ResolutionError> {
        let environment = environment_override()?;
        self.build_provider_with_environment(environment.as_ref(), overrides)
    }

    /// [`ProviderFactory::build_provider`] with an explicit environment layer.
    ///
    /// # Errors
    ///
    /// As [`ProviderFactory::build_provider`].
    pub fn build_provider_with_environment(
        &self,
        environment: Option<&ImplementationId>,
        overrides: Option<&ProviderOverrides>,
    ) -> Result<DataProvider, ResolutionError> {
        let config = self.resolve_config(environment, overrides);
        self.build_from_config(config)
    }

    /// Resolve every domain of an already merged configuration.
    ///
    /// Domains are resolved in [`Domain::ALL`] order.
    ///
    /// # Errors
    ///
    /// As [`ProviderFactory::build_provider`].
    pub fn build_from_config(
        &self,
        config: ProviderConfig,
    ) -> Result<DataProvider, ResolutionError> {
        Ok(DataProvider {
            user: self.resolve_as(&config, Domain::User, Repository::into_user)?,
            profile: self.resolve_as(&config, Domain::Profile, Repository::into_profile)?,
            payment: self.resolve_as(&config, Domain::Payment, Repository::into_payment)?,
            property: self.resolve_as(&config, Domain::Property, Repository::into_property)?,
            system: self.resolve_as(&config, Domain::System, Repository::into_system)?,
            translation: self.resolve_as(
                &config,
                Domain::Translation,
                Repository::into_translation,
            )?,
            address: self.resolve_as(&config, Domain::Address, Repository::into_address)?,
            storage: self.resolve_as(&config, Domain::Storage, Repository::into_storage)?,
            subscription: self.resolve_as(
                &config,
                Domain::Subscription,
                Repository::into_subscription,
            )?,
            billing: self.resolve_as(&config, Domain::Billing, Repository::into_billing)?,
            feature_flag: self.resolve_as(
                &config,
                Domain::FeatureFlag,
                Repository::into_feature_flag,
            )?,
            config,
        })
    }

    fn resolve_as<R: ?Sized>(
        &self,
        config: &ProviderConfig,
        domain: Domain,
        pick: fn(Repository) -> Option<Arc<R>>,
    ) -> Result<Arc<R>, ResolutionError> {
        let id = config.get(domain);
        let resolved = self
            .registry
            .resolve(domain, id)
            .and_then(|repository| {
                pick(repository).ok_or_else(|| ResolutionError::ImplementationUnavailable {
                    implementation: id.as_str().to_owned(),
                    domain: domain.as_str().to_owned(),
                    available: self.registry.list_available_implementations(domain),
                })
            });

        match &resolved {
            Ok(_) => info!(
                domain = domain.as_str(),
                implementation = id.as_str(),
                "resolved repository"
            ),
            Err(err) => error!(
                domain = domain.as_str(),
                implementation = id.as_str(),
                error = %err,
                "repository resolution failed"
            ),
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::*;
    use crate::provider::BUNDLER_PROVIDER_VAR;
    use env_lock::lock_env;
    use rstest::{fixture, rstest};

    fn repositories() -> Vec<Repository> {
        vec![
            Repository::User(Arc::new(MockUserRepository::new())),
            Repository::Profile(Arc::new(MockProfileRepository::new())),
            Repository::Payment(Arc::new(MockPaymentRepository::new())),
            Repository::Property(Arc::new(MockPropertyRepository::new())),
            Repository::System(Arc::new(MockSystemRepository::new())),
            Repository::Translation(Arc::new(MockTranslationRepository::new())),
            Repository::Address(Arc::new(MockAddressRepository::new())),
            Repository::Storage(Arc::new(MockStorageRepository::new())),
            Repository::Subscription(Arc::new(MockSubscriptionRepository::new())),
            Repository::Billing(Arc::new(MockBillingRepository::new())),
            Repository::FeatureFlag(Arc::new(MockFeatureFlagRepository::new())),
        ]
    }

    /// Every domain implemented under `supabase`; `firebase` declared but
    /// unimplemented everywhere.
    #[fixture]
    fn factory() -> ProviderFactory {
        let registry = repositories()
            .into_iter()
            .fold(ProviderRegistry::new(), |registry, repository| {
                let domain = repository.domain();
                registry
                    .with_implementation(ImplementationId::SUPABASE, repository)
                    .with_unimplemented(domain, ImplementationId::FIREBASE)
            });
        ProviderFactory::new(registry)
    }

    #[rstest]
    fn builds_with_defaults(factory: ProviderFactory) {
        let provider = factory.build_provider_with_environment(None, None);
        assert_eq!(
            provider.map(|p| p.config().clone()),
            Ok(ProviderConfig::defaults())
        );
    }

    #[rstest]
    fn unregistered_environment_fails_on_first_domain(factory: ProviderFactory) {
        let result = factory
            .build_provider_with_environment(Some(&ImplementationId::FIREBASE), None)
            .map(|p| p.config().clone());

        assert_eq!(
            result,
            Err(ResolutionError::ImplementationUnavailable {
                implementation: "firebase".to_owned(),
                domain: "user".to_owned(),
                available: vec![ImplementationId::SUPABASE],
            })
        );
    }

    #[rstest]
    fn explicit_override_beats_environment_for_its_domain_only(factory: ProviderFactory) {
        let overrides = ProviderOverrides::new().with(Domain::User, ImplementationId::SUPABASE);
        let config = factory.resolve_config(Some(&ImplementationId::FIREBASE), Some(&overrides));

        assert_eq!(config.get(Domain::User), &ImplementationId::SUPABASE);
        assert!(
            factory
                .registry()
                .resolve(Domain::User, config.get(Domain::User))
                .is_ok()
        );

        let result = factory
            .build_provider_with_environment(Some(&ImplementationId::FIREBASE), Some(&overrides))
            .map(|p| p.config().clone());
        assert_eq!(
            result,
            Err(ResolutionError::ImplementationUnavailable {
                implementation: "firebase".to_owned(),
                domain: "profile".to_owned(),
                available: vec![ImplementationId::SUPABASE],
            })
        );
    }

    #[rstest]
    fn missing_domain_table_aborts_the_build() {
        let registry = repositories()
            .into_iter()
            .filter(|repository| repository.domain() != Domain::Billing)
            .fold(ProviderRegistry::new(), |registry, repository| {
                registry.with_implementation(ImplementationId::SUPABASE, repository)
            });

        let result = ProviderFactory::new(registry)
            .build_provider_with_environment(None, None)
            .map(|p| p.config().clone());

        assert_eq!(
            result,
            Err(ResolutionError::DomainNotFound {
                domain: "billing".to_owned()
            })
        );
    }

    #[rstest]
    fn repeated_builds_are_independent(factory: ProviderFactory) {
        let overrides = ProviderOverrides::new().with(Domain::Storage, ImplementationId::FIREBASE);
        let failing = factory.build_provider_with_environment(None, Some(&overrides));
        let succeeding = factory.build_provider_with_environment(None, None);

        assert!(failing.is_err());
        assert!(succeeding.is_ok());
    }

    #[rstest]
    fn custom_defaults_are_the_lowest_layer(factory: ProviderFactory) {
        let factory = factory.with_defaults(ProviderConfig::uniform(&ImplementationId::FIREBASE));
        let overrides = Domain::ALL
            .into_iter()
            .fold(ProviderOverrides::new(), |overrides, domain| {
                overrides.with(domain, ImplementationId::SUPABASE)
            });

        assert!(factory.build_provider_with_environment(None, None).is_err());
        assert!(
            factory
                .build_provider_with_environment(None, Some(&overrides))
                .is_ok()
        );
    }

    #[rstest]
    fn process_environment_selects_the_implementation(factory: ProviderFactory) {
        let _guard = lock_env([
            ("DATA_PROVIDER", Some("firebase".to_owned())),
            (BUNDLER_PROVIDER_VAR, None::<String>),
        ]);

        let result = factory.build_provider(None).map(|p| p.config().clone());

        assert!(matches!(
            result,
            Err(ResolutionError::ImplementationUnavailable { ref domain, .. }) if domain == "user"
        ));
    }

    #[rstest]
    fn explicit_override_beats_process_environment(factory: ProviderFactory) {
        let _guard = lock_env([
            ("DATA_PROVIDER", None::<String>),
            (BUNDLER_PROVIDER_VAR, Some("firebase".to_owned())),
        ]);
        let overrides = ProviderOverrides::new().with(Domain::User, ImplementationId::SUPABASE);

        let result = factory
            .build_provider(Some(&overrides))
            .map(|p| p.config().clone());

        assert!(matches!(
            result,
            Err(ResolutionError::ImplementationUnavailable { ref domain, .. }) if domain == "profile"
        ));
    }

    #[rstest]
    #[case::unknown_value(Some("mongodb"))]
    #[case::unset(None)]
    fn unrecognized_or_missing_environment_keeps_defaults(
        factory: ProviderFactory,
        #[case] value: Option<&str>,
    ) {
        let _guard = lock_env([
            ("DATA_PROVIDER", value.map(str::to_owned)),
            (BUNDLER_PROVIDER_VAR, None::<String>),
        ]);

        let result = factory.build_provider(None).map(|p| p.config().clone());

        assert_eq!(result, Ok(ProviderConfig::defaults()));
    }
}
