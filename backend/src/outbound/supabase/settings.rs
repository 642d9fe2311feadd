//! Supabase connection settings loaded via OrthoConfig.

use std::ffi::OsString;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings read from `SUPABASE_*` environment variables.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SUPABASE")]
pub struct SupabaseSettings {
    /// Project URL, e.g. `https://abc.supabase.co`.
    pub url: Option<String>,
    /// Anonymous (publishable) API key.
    pub anon_key: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Why a Supabase binding could not be set up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SupabaseSetupError {
    /// Settings could not be loaded.
    #[error("failed to load Supabase settings: {message}")]
    Settings {
        /// Loader message.
        message: String,
    },
    /// `SUPABASE_URL` is not set.
    #[error("SUPABASE_URL must be set")]
    MissingUrl,
    /// `SUPABASE_ANON_KEY` is not set.
    #[error("SUPABASE_ANON_KEY must be set")]
    MissingAnonKey,
    /// `SUPABASE_URL` is not a URL.
    #[error("SUPABASE_URL '{value}' is invalid: {message}")]
    InvalidUrl {
        /// Configured value.
        value: String,
        /// Parser message.
        message: String,
    },
    /// The HTTP client could not be built.
    #[error("failed to build Supabase HTTP client: {message}")]
    Client {
        /// Builder message.
        message: String,
    },
}

impl SupabaseSettings {
    /// Load settings from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseSetupError::Settings`] when loading fails.
    pub fn from_environment() -> Result<Self, SupabaseSetupError> {
        Self::load_from_iter([OsString::from(crate::PROGRAM_NAME)]).map_err(|err| {
            SupabaseSetupError::Settings {
                message: err.to_string(),
            }
        })
    }

    /// Parsed project URL.
    ///
    /// # Errors
    ///
    /// [`SupabaseSetupError::MissingUrl`] or [`SupabaseSetupError::InvalidUrl`].
    pub fn project_url(&self) -> Result<Url, SupabaseSetupError> {
        let raw = self.url.as_deref().ok_or(SupabaseSetupError::MissingUrl)?;
        Url::parse(raw).map_err(|err| SupabaseSetupError::InvalidUrl {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Configured API key.
    ///
    /// # Errors
    ///
    /// [`SupabaseSetupError::MissingAnonKey`] when unset or blank.
    pub fn anon_key(&self) -> Result<&str, SupabaseSetupError> {
        self.anon_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(SupabaseSetupError::MissingAnonKey)
    }

    /// Request timeout, defaulting to 30 seconds.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS).max(1))
    }
}
