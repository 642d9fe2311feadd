//! Supabase binding: one HTTP client shared by a repository per domain.

mod auth;
mod client;
mod registry;
mod settings;
mod storage;
mod tables;

pub use auth::SupabaseUserRepository;
pub use client::SupabaseClient;
pub use registry::supabase_registry;
pub use settings::{SupabaseSettings, SupabaseSetupError};
pub use storage::SupabaseStorageRepository;
pub use tables::{
    SupabaseAddressRepository, SupabaseBillingRepository, SupabaseFeatureFlagRepository,
    SupabasePaymentRepository, SupabaseProfileRepository, SupabasePropertyRepository,
    SupabaseSubscriptionRepository, SupabaseSystemRepository, SupabaseTranslationRepository,
};
