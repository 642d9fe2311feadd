//! Provider registry and factory.
//!
//! Start-up code builds a [`ProviderRegistry`] of every available binding,
//! hands it to a [`ProviderFactory`], and calls
//! [`ProviderFactory::build_provider`] once. The resulting [`DataProvider`]
//! is the only thing the rest of the application sees.
//!
//! Resolution never performs I/O. A configuration that names an unavailable
//! binding for any domain fails the whole build.

mod aggregate;
mod config;
mod error;
mod factory;
mod implementation;
mod registry;
mod settings;

pub use aggregate::DataProvider;
pub use config::{DomainOverride, OverrideParseError, ProviderConfig, ProviderOverrides};
pub use error::ResolutionError;
pub use factory::ProviderFactory;
pub use implementation::{ImplementationId, ImplementationIdError};
pub use registry::{ProviderRegistry, Repository, Slot};
pub use settings::{BUNDLER_PROVIDER_VAR, ProviderSettings, environment_override};
