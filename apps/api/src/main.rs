use axum_helpers::server::{create_app, create_router, health_router};
use core_config::app_info;
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    init_tracing(&config.environment);

    // Connect to PostgreSQL with startup retry, then bring the schema up
    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    database::postgres::run_migrations::<migration::Migrator>(&db, "provhub-api")
        .await
        .map_err(|e| eyre::eyre!("Migration failed: {}", e))?;

    let state = AppState { db };

    let api_routes = api::routes(&state, &config);
    let router = create_router::<openapi::ApiDoc>(api_routes).await?;

    let router = router
        .merge(health_router(app_info!()))
        .merge(api::ready_router(state));

    info!("Swagger UI available at /swagger-ui");
    create_app(router, &config.server).await?;

    Ok(())
}
