use axum::{middleware, Router};
use axum_helpers::auth::jwt_auth_middleware;
use std::sync::Arc;

use domain_countries::{CountryService, PgCountryRepository, RestCountriesClient};
use domain_providers::{PgProviderRepository, ProviderService};
use domain_services::{PgServiceRepository, ServiceService};

use crate::config::Config;
use crate::state::AppState;

pub mod health;

/// Creates the API routes without the `/api` prefix (added by
/// `create_router`).
///
/// Each domain router gets its own repository instances over the shared
/// connection pool and applies its state internally.
pub fn routes(state: &AppState, config: &Config) -> Router {
    let provider_service = ProviderService::new(
        PgProviderRepository::new(state.db.clone()),
        PgServiceRepository::new(state.db.clone()),
    );

    let service_service = ServiceService::new(
        PgServiceRepository::new(state.db.clone()),
        PgProviderRepository::new(state.db.clone()),
        PgCountryRepository::new(state.db.clone()),
    );

    let country_service = CountryService::new(
        PgCountryRepository::new(state.db.clone()),
        RestCountriesClient::new(config.country_api.clone()),
    );

    let jwt_config = Arc::new(config.jwt.clone());

    Router::new()
        .nest("/v1/providers", domain_providers::handlers::router(provider_service))
        .nest("/v1/services", domain_services::handlers::router(service_service))
        .nest("/v1/countries", domain_countries::handlers::router(country_service))
        .layer(middleware::from_fn_with_state(
            jwt_config,
            jwt_auth_middleware,
        ))
}

/// Router with the /ready endpoint performing real dependency checks.
pub fn ready_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
