//! Country Collector
//!
//! On-demand sync of the country reference table from the REST Countries
//! API. Run `sync-all` after provisioning a fresh database, or
//! `sync-outdated` from an operational runbook when reference data ages.

use clap::{Parser, Subcommand};
use core_config::country_api::CountryApiConfig;
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv};
use database::postgres::PostgresConfig;
use domain_countries::{CountryService, PgCountryRepository, RestCountriesClient};
use eyre::Result;
use tracing::info;

#[derive(Parser)]
#[command(name = "country-collector")]
#[command(about = "Sync the country reference table from the REST Countries API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upsert every country the reference API returns
    SyncAll,

    /// Re-sync only countries whose data is older than the given age
    SyncOutdated {
        /// Age threshold in days
        #[arg(short, long, default_value_t = 30)]
        days_old: u32,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();

    let environment = Environment::from_env();
    init_tracing(&environment);

    let cli = Cli::parse();

    let db_config = PostgresConfig::from_env()?;
    let api_config = CountryApiConfig::from_env()?;

    info!("Connecting to database...");
    let db = database::postgres::connect_from_config_with_retry(db_config, None)
        .await
        .map_err(|e| eyre::eyre!("Database connection failed: {}", e))?;

    database::postgres::run_migrations::<migration::Migrator>(&db, "country-collector")
        .await
        .map_err(|e| eyre::eyre!("Migration failed: {}", e))?;

    let service = CountryService::new(
        PgCountryRepository::new(db),
        RestCountriesClient::new(api_config),
    );

    let synced = match cli.command {
        Commands::SyncAll => {
            info!("Starting full country sync");
            service.sync_all().await?
        }
        Commands::SyncOutdated { days_old } => {
            info!("Starting outdated country sync (older than {} days)", days_old);
            service.sync_outdated(days_old).await?
        }
    };

    println!("{}", serde_json::json!({ "syncedCount": synced }));
    Ok(())
}
