//! `provider-check`: resolve the data provider the way the application would.
//!
//! Loads `SUPABASE_*` and `DATA_PROVIDER` from the environment, applies any
//! `--use domain=impl` overrides, and builds the provider once. A resolution
//! failure exits non-zero with the failing domain in the report.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::sync::{Arc, OnceLock};

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use data_provider::domain::Domain;
use data_provider::outbound::supabase::{SupabaseClient, SupabaseSettings, supabase_registry};
use data_provider::provider::{DataProvider, DomainOverride, ProviderFactory, ProviderOverrides};

/// The process-wide provider, set once at start-up.
static PROVIDER: OnceLock<Arc<DataProvider>> = OnceLock::new();

/// `provider-check` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = data_provider::PROGRAM_NAME,
    about = "Resolve the data provider for every domain and report the outcome",
    version
)]
struct CliArgs {
    /// Per-domain override, e.g. `--use user=supabase`. Repeatable.
    #[arg(long = "use", value_name = "domain=impl")]
    overrides: Vec<DomainOverride>,
    /// Log the implementations available for each domain.
    ///
    /// The registry is built from a live client, so `SUPABASE_URL` and
    /// `SUPABASE_ANON_KEY` must be set for this too.
    #[arg(long)]
    list: bool,
    /// Look up one feature flag through the resolved provider.
    #[arg(long = "flag", value_name = "key")]
    flag: Option<String>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let settings = SupabaseSettings::from_environment()?;
    let client = SupabaseClient::from_settings(&settings)?;
    let factory = ProviderFactory::new(supabase_registry(Arc::new(client)));

    if args.list {
        for domain in Domain::ALL {
            let available = factory.registry().list_available_implementations(domain);
            let names: Vec<&str> = available.iter().map(|id| id.as_str()).collect();
            info!(%domain, available = ?names, "available implementations");
        }
    }

    let overrides: ProviderOverrides = args.overrides.into_iter().collect();
    let provider = factory
        .build_provider(Some(&overrides))
        .wrap_err("failed to build data provider")?;
    let provider = PROVIDER.get_or_init(|| Arc::new(provider));

    for (domain, id) in provider.config().iter() {
        info!(%domain, implementation = %id, "resolved");
    }

    if let Some(key) = args.flag {
        probe_flag(provider, &key)?;
    }
    Ok(())
}

fn probe_flag(provider: &DataProvider, key: &str) -> Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    let enabled = runtime
        .block_on(provider.feature_flag.is_enabled(key))
        .map_err(|err| eyre!("feature flag lookup failed [{}]: {err}", err.code()))?;
    info!(flag = key, enabled, "feature flag");
    Ok(())
}
