//! Port for localized strings.
use async_trait::async_trait;
use data_errors::DataError;

use super::Record;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranslationRepository: Send + Sync {
    /// Translation rows for `locale`, e.g. `en` or `es`.
    async fn list_for_locale(&self, locale: &str) -> Result<Vec<Record>, DataError>;
}
