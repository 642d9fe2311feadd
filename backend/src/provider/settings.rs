//! Environment layer of the provider configuration, loaded via OrthoConfig.

use std::env;
use std::ffi::OsString;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;

use super::{ImplementationId, ResolutionError};

/// Alternate variable checked when `DATA_PROVIDER` is unset, as exported by
/// browser bundlers.
pub const BUNDLER_PROVIDER_VAR: &str = "VITE_DATA_PROVIDER";

/// Settings read from `DATA_*` environment variables.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DATA")]
pub struct ProviderSettings {
    /// Identifier applied to every domain (`DATA_PROVIDER`).
    pub provider: Option<String>,
}

impl ProviderSettings {
    /// Load settings from the environment only.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::Environment`] when the settings cannot be
    /// loaded.
    pub fn from_environment() -> Result<Self, ResolutionError> {
        Self::load_from_iter([OsString::from(crate::PROGRAM_NAME)]).map_err(|err| {
            ResolutionError::Environment {
                message: err.to_string(),
            }
        })
    }
}

/// The environment-sourced identifier, if set to a known value.
///
/// `DATA_PROVIDER` wins over [`BUNDLER_PROVIDER_VAR`]. A value outside
/// [`ImplementationId::KNOWN`] is ignored so the compiled-in defaults apply.
///
/// # Errors
///
/// As [`ProviderSettings::from_environment`].
pub fn environment_override() -> Result<Option<ImplementationId>, ResolutionError> {
    let settings = ProviderSettings::from_environment()?;
    let fallback = env::var(BUNDLER_PROVIDER_VAR).ok();
    Ok(select_override(
        settings.provider.as_deref(),
        fallback.as_deref(),
    ))
}

fn select_override(primary: Option<&str>, fallback: Option<&str>) -> Option<ImplementationId> {
    let raw = primary
        .filter(|value| !value.is_empty())
        .or_else(|| fallback.filter(|value| !value.is_empty()))?;
    let id = ImplementationId::known(raw);
    if id.is_none() {
        warn!(value = raw, "ignoring unrecognized data provider override");
    }
    id
}

#[cfg(test)]
mod tests {
    //! Unit tests for the environment layer.

    use super::*;
    use env_lock::lock_env;
    use rstest::rstest;

    #[rstest]
    #[case::primary_only(Some("firebase"), None, Some(ImplementationId::FIREBASE))]
    #[case::fallback_only(None, Some("prisma"), Some(ImplementationId::PRISMA))]
    #[case::primary_wins(Some("supabase"), Some("prisma"), Some(ImplementationId::SUPABASE))]
    #[case::empty_primary_falls_back(Some(""), Some("prisma"), Some(ImplementationId::PRISMA))]
    #[case::unknown_value_is_ignored(Some("mongodb"), Some("prisma"), None)]
    #[case::nothing_set(None, None, None)]
    fn selects_override(
        #[case] primary: Option<&str>,
        #[case] fallback: Option<&str>,
        #[case] expected: Option<ImplementationId>,
    ) {
        assert_eq!(select_override(primary, fallback), expected);
    }

    #[rstest]
    fn reads_data_provider_variable() {
        let _guard = lock_env([
            ("DATA_PROVIDER", Some("firebase".to_owned())),
            (BUNDLER_PROVIDER_VAR, None::<String>),
        ]);

        assert_eq!(environment_override(), Ok(Some(ImplementationId::FIREBASE)));
    }

    #[rstest]
    fn falls_back_to_bundler_variable() {
        let _guard = lock_env([
            ("DATA_PROVIDER", None::<String>),
            (BUNDLER_PROVIDER_VAR, Some("prisma".to_owned())),
        ]);

        assert_eq!(environment_override(), Ok(Some(ImplementationId::PRISMA)));
    }

    #[rstest]
    fn unset_environment_yields_no_override() {
        let _guard = lock_env([
            ("DATA_PROVIDER", None::<String>),
            (BUNDLER_PROVIDER_VAR, None::<String>),
        ]);

        assert_eq!(environment_override(), Ok(None));
    }
}
