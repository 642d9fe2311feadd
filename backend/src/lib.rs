//! Data-provider layer.
//!
//! Domain repositories are declared as ports in [`domain::ports`], bound to
//! concrete backends in [`outbound`], and selected per domain at start-up by
//! [`provider::ProviderFactory`]. Every failure crossing a port is a
//! [`data_errors::DataError`].

/// Program name passed as `argv[0]` when settings are loaded from the
/// environment alone.
pub const PROGRAM_NAME: &str = "provider-check";

pub mod domain;
pub mod outbound;
pub mod provider;
