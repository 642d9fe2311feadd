//! Port for authentication against the configured identity backend.
use async_trait::async_trait;
use data_errors::DataError;

use super::Record;

/// Authentication and session operations.
///
/// Sessions are passed around as access tokens; the port keeps no session
/// state of its own.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Exchange credentials for a session record (access token, user).
    async fn sign_in_with_password(&self, email: &str, password: &str)
    -> Result<Record, DataError>;

    /// Fetch the user owning `access_token`.
    async fn current_user(&self, access_token: &str) -> Result<Record, DataError>;

    /// Revoke the session behind `access_token`.
    async fn sign_out(&self, access_token: &str) -> Result<(), DataError>;
}
