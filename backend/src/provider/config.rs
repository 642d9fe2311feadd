//! Layered choice of implementation per domain.
//!
//! Layers, lowest to highest precedence:
//!
//! 1. compiled-in defaults ([`ProviderConfig::defaults`]),
//! 2. one environment-sourced identifier applied to every domain,
//! 3. caller-supplied [`ProviderOverrides`] targeting single domains.
//!
//! Merging happens per domain, never wholesale.

use std::collections::BTreeMap;
use std::str::FromStr;

use thiserror::Error;

use crate::domain::{Domain, DomainParseError};

use super::{ImplementationId, ImplementationIdError};

/// Fully resolved domain → implementation mapping.
///
/// Every domain has a value; the configuration is immutable once built.
///
/// # Examples
/// ```
/// use data_provider::domain::Domain;
/// use data_provider::provider::{ImplementationId, ProviderConfig, ProviderOverrides};
///
/// let overrides = ProviderOverrides::new().with(Domain::User, ImplementationId::PRISMA);
/// let config = ProviderConfig::defaults().layer(Some(&ImplementationId::FIREBASE), &overrides);
///
/// assert_eq!(config.get(Domain::User), &ImplementationId::PRISMA);
/// assert_eq!(config.get(Domain::Billing), &ImplementationId::FIREBASE);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    choices: [ImplementationId; Domain::ALL.len()],
}

impl ProviderConfig {
    /// Use `id` for every domain.
    pub fn uniform(id: &ImplementationId) -> Self {
        Self {
            choices: Domain::ALL.map(|_| id.clone()),
        }
    }

    /// Compiled-in baseline: `supabase` everywhere.
    pub fn defaults() -> Self {
        Self::uniform(&ImplementationId::SUPABASE)
    }

    /// Identifier chosen for `domain`.
    pub fn get(&self, domain: Domain) -> &ImplementationId {
        &self.choices[domain.index()]
    }

    /// Domains with their identifiers, in [`Domain::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Domain, &ImplementationId)> + '_ {
        Domain::ALL.into_iter().zip(self.choices.iter())
    }

    /// Apply the environment and explicit layers on top of `self`.
    #[must_use]
    pub fn layer(
        &self,
        environment: Option<&ImplementationId>,
        overrides: &ProviderOverrides,
    ) -> Self {
        let mut layered = match environment {
            Some(id) => Self::uniform(id),
            None => self.clone(),
        };
        for (domain, id) in overrides.iter() {
            layered.choices[domain.index()] = id.clone();
        }
        layered
    }
}

/// Partial, caller-supplied choices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderOverrides {
    choices: BTreeMap<Domain, ImplementationId>,
}

impl ProviderOverrides {
    /// No overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `id` for `domain`.
    #[must_use]
    pub fn with(mut self, domain: Domain, id: ImplementationId) -> Self {
        self.set(domain, id);
        self
    }

    /// Use `id` for `domain`, replacing an earlier choice.
    pub fn set(&mut self, domain: Domain, id: ImplementationId) {
        self.choices.insert(domain, id);
    }

    /// Override for `domain`, if any.
    pub fn get(&self, domain: Domain) -> Option<&ImplementationId> {
        self.choices.get(&domain)
    }

    /// Whether no domain is overridden.
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Overridden domains in [`Domain`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Domain, &ImplementationId)> + '_ {
        self.choices.iter().map(|(domain, id)| (*domain, id))
    }
}

impl FromIterator<DomainOverride> for ProviderOverrides {
    fn from_iter<I: IntoIterator<Item = DomainOverride>>(iter: I) -> Self {
        let mut overrides = Self::new();
        for DomainOverride { domain, id } in iter {
            overrides.set(domain, id);
        }
        overrides
    }
}

/// One `domain=implementation` pair, as written on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainOverride {
    /// Domain to override.
    pub domain: Domain,
    /// Identifier to use for it.
    pub id: ImplementationId,
}

/// Parse failures for [`DomainOverride`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverrideParseError {
    /// No `=` separator.
    #[error("expected domain=implementation, got '{input}'")]
    MissingSeparator {
        /// Raw input.
        input: String,
    },
    /// Left-hand side is not a domain.
    #[error(transparent)]
    Domain(#[from] DomainParseError),
    /// Right-hand side is not a valid identifier.
    #[error(transparent)]
    Implementation(#[from] ImplementationIdError),
}

impl FromStr for DomainOverride {
    type Err = OverrideParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (domain, id) = s
            .split_once('=')
            .ok_or_else(|| OverrideParseError::MissingSeparator {
                input: s.to_owned(),
            })?;
        Ok(Self {
            domain: domain.trim().parse()?,
            id: id.trim().parse()?,
        })
    }
}
