//! PostgREST-backed repositories for table-shaped domains.
//!
//! Each adapter is a thin translation from port method to table query. All
//! failures pass through [`with_error_handling`] so callers only ever see
//! [`DataError`].

use std::sync::Arc;

use async_trait::async_trait;
use data_errors::{DataError, Failure, with_error_handling};
use serde_json::{Value, json};

use crate::domain::ports::{
    AddressRepository, BillingRepository, FeatureFlagRepository, Filter, PaymentRepository,
    ProfileRepository, PropertyRepository, Record, SubscriptionRepository, SystemRepository,
    TranslationRepository,
};

use super::SupabaseClient;

const PROFILES: &str = "profiles";
const PAYMENTS: &str = "payments";
const PROPERTIES: &str = "properties";
const SYSTEM_SETTINGS: &str = "system_settings";
const TRANSLATIONS: &str = "translations";
const ADDRESSES: &str = "addresses";
const SUBSCRIPTIONS: &str = "subscriptions";
const SUBSCRIPTION_PLANS: &str = "subscription_plans";
const INVOICES: &str = "invoices";
const FEATURE_FLAGS: &str = "feature_flags";
const LOCATION_HIERARCHY_FN: &str = "get_location_hierarchy";
const NEWEST_FIRST: &str = "created_at.desc";

macro_rules! table_repository {
    ($($(#[$meta:meta])* $name:ident;)*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone)]
            pub struct $name {
                client: Arc<SupabaseClient>,
            }

            impl $name {
                /// Wrap a shared client.
                pub fn new(client: Arc<SupabaseClient>) -> Self {
                    Self { client }
                }
            }
        )*
    };
}

table_repository! {
    /// Profiles in the `profiles` table.
    SupabaseProfileRepository;
    /// Payments in the `payments` table.
    SupabasePaymentRepository;
    /// Listings in the `properties` table.
    SupabasePropertyRepository;
    /// Settings in the `system_settings` table.
    SupabaseSystemRepository;
    /// Strings in the `translations` table.
    SupabaseTranslationRepository;
    /// Addresses in the `addresses` table plus the hierarchy function.
    SupabaseAddressRepository;
    /// Subscriptions and plans.
    SupabaseSubscriptionRepository;
    /// Invoices in the `invoices` table.
    SupabaseBillingRepository;
    /// Toggles in the `feature_flags` table.
    SupabaseFeatureFlagRepository;
}

#[async_trait]
impl ProfileRepository for SupabaseProfileRepository {
    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<Record>, DataError> {
        with_error_handling(
            self.client
                .select_one(PROFILES, &[Filter::equals("user_id", user_id)]),
            Some("Profile"),
        )
        .await
    }

    async fn update(&self, user_id: &str, changes: Record) -> Result<Record, DataError> {
        with_error_handling(
            self.client.update(
                PROFILES,
                &[Filter::equals("user_id", user_id)],
                &changes,
                "Profile",
            ),
            Some("Profile"),
        )
        .await
    }
}

#[async_trait]
impl PaymentRepository for SupabasePaymentRepository {
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<Record>, DataError> {
        with_error_handling(
            self.client.select(
                PAYMENTS,
                &[Filter::equals("user_id", user_id)],
                Some(NEWEST_FIRST),
            ),
            Some("Payment"),
        )
        .await
    }

    async fn create(&self, payment: Record) -> Result<Record, DataError> {
        with_error_handling(self.client.insert(PAYMENTS, &payment), Some("Payment")).await
    }
}

#[async_trait]
impl PropertyRepository for SupabasePropertyRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Record>, DataError> {
        with_error_handling(
            self.client
                .select_one(PROPERTIES, &[Filter::equals("id", id)]),
            Some("Property"),
        )
        .await
    }

    async fn list(&self, filters: Vec<Filter>) -> Result<Vec<Record>, DataError> {
        with_error_handling(
            self.client.select(PROPERTIES, &filters, Some(NEWEST_FIRST)),
            Some("Property"),
        )
        .await
    }

    async fn create(&self, property: Record) -> Result<Record, DataError> {
        with_error_handling(self.client.insert(PROPERTIES, &property), Some("Property")).await
    }

    async fn update(&self, id: &str, changes: Record) -> Result<Record, DataError> {
        with_error_handling(
            self.client.update(
                PROPERTIES,
                &[Filter::equals("id", id)],
                &changes,
                "Property",
            ),
            Some("Property"),
        )
        .await
    }

    async fn delete(&self, id: &str) -> Result<(), DataError> {
        with_error_handling(
            self.client.delete(PROPERTIES, &[Filter::equals("id", id)]),
            Some("Property"),
        )
        .await
    }
}

#[async_trait]
impl SystemRepository for SupabaseSystemRepository {
    async fn get_setting(&self, key: &str) -> Result<Option<Value>, DataError> {
        with_error_handling(
            async {
                let row = self
                    .client
                    .select_one(SYSTEM_SETTINGS, &[Filter::equals("key", key)])
                    .await?;
                Ok::<_, Failure>(row.and_then(|mut row| row.remove("value")))
            },
            Some("Setting"),
        )
        .await
    }

    async fn list_settings(&self) -> Result<Vec<Record>, DataError> {
        with_error_handling(
            self.client.select(SYSTEM_SETTINGS, &[], Some("key.asc")),
            Some("Setting"),
        )
        .await
    }
}

#[async_trait]
impl TranslationRepository for SupabaseTranslationRepository {
    async fn list_for_locale(&self, locale: &str) -> Result<Vec<Record>, DataError> {
        with_error_handling(
            self.client
                .select(TRANSLATIONS, &[Filter::equals("locale", locale)], None),
            Some("Translation"),
        )
        .await
    }
}

#[async_trait]
impl AddressRepository for SupabaseAddressRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Record>, DataError> {
        with_error_handling(
            self.client
                .select_one(ADDRESSES, &[Filter::equals("id", id)]),
            Some("Address"),
        )
        .await
    }

    async fn list_for_owner(&self, owner_id: &str) -> Result<Vec<Record>, DataError> {
        with_error_handling(
            self.client
                .select(ADDRESSES, &[Filter::equals("owner_id", owner_id)], None),
            Some("Address"),
        )
        .await
    }

    async fn resolve_hierarchy(&self, location_id: &str) -> Result<Value, DataError> {
        let args = json!({ "location_id": location_id });
        with_error_handling(
            self.client.rpc(LOCATION_HIERARCHY_FN, &args),
            Some("Location"),
        )
        .await
    }
}

#[async_trait]
impl SubscriptionRepository for SupabaseSubscriptionRepository {
    async fn active_for_user(&self, user_id: &str) -> Result<Option<Record>, DataError> {
        with_error_handling(
            self.client.select_one(
                SUBSCRIPTIONS,
                &[
                    Filter::equals("user_id", user_id),
                    Filter::equals("status", "active"),
                ],
            ),
            Some("Subscription"),
        )
        .await
    }

    async fn list_plans(&self) -> Result<Vec<Record>, DataError> {
        with_error_handling(
            self.client.select(SUBSCRIPTION_PLANS, &[], Some("price.asc")),
            Some("SubscriptionPlan"),
        )
        .await
    }
}

#[async_trait]
impl BillingRepository for SupabaseBillingRepository {
    async fn list_invoices(&self, user_id: &str) -> Result<Vec<Record>, DataError> {
        with_error_handling(
            self.client.select(
                INVOICES,
                &[Filter::equals("user_id", user_id)],
                Some(NEWEST_FIRST),
            ),
            Some("Invoice"),
        )
        .await
    }

    async fn find_invoice(&self, id: &str) -> Result<Option<Record>, DataError> {
        with_error_handling(
            self.client.select_one(INVOICES, &[Filter::equals("id", id)]),
            Some("Invoice"),
        )
        .await
    }
}

#[async_trait]
impl FeatureFlagRepository for SupabaseFeatureFlagRepository {
    async fn is_enabled(&self, key: &str) -> Result<bool, DataError> {
        with_error_handling(
            async {
                let row = self
                    .client
                    .select_one(FEATURE_FLAGS, &[Filter::equals("key", key)])
                    .await?;
                Ok::<_, Failure>(row.is_some_and(|row| flag_enabled(&row)))
            },
            Some("FeatureFlag"),
        )
        .await
    }

    async fn list(&self) -> Result<Vec<Record>, DataError> {
        with_error_handling(
            self.client.select(FEATURE_FLAGS, &[], Some("key.asc")),
            Some("FeatureFlag"),
        )
        .await
    }
}

fn flag_enabled(row: &Record) -> bool {
    row.get("enabled").and_then(Value::as_bool).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::enabled(json!({ "key": "beta", "enabled": true }), true)]
    #[case::disabled(json!({ "key": "beta", "enabled": false }), false)]
    #[case::missing_column(json!({ "key": "beta" }), false)]
    #[case::non_boolean(json!({ "key": "beta", "enabled": "yes" }), false)]
    fn reads_enabled_column(#[case] row: Value, #[case] expected: bool) {
        let Value::Object(record) = row else {
            panic!("fixture rows are objects");
        };
        assert_eq!(flag_enabled(&record), expected);
    }
}
