//! GoTrue-backed [`UserRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use data_errors::{DataError, with_error_handling};

use crate::domain::ports::{Record, UserRepository};

use super::SupabaseClient;

/// Authentication through Supabase Auth.
#[derive(Debug, Clone)]
pub struct SupabaseUserRepository {
    client: Arc<SupabaseClient>,
}

impl SupabaseUserRepository {
    /// Wrap a shared client.
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserRepository for SupabaseUserRepository {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Record, DataError> {
        with_error_handling(
            self.client.sign_in_with_password(email, password),
            Some("User"),
        )
        .await
    }

    async fn current_user(&self, access_token: &str) -> Result<Record, DataError> {
        with_error_handling(self.client.user(access_token), Some("User")).await
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), DataError> {
        with_error_handling(self.client.sign_out(access_token), Some("User")).await
    }
}
