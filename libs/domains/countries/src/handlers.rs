use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::client::CountryGateway;
use crate::error::CountryResult;
use crate::models::{Country, SyncOutdatedParams, SyncResponse};
use crate::repository::CountryRepository;
use crate::service::CountryService;

const TAG: &str = "countries";

/// OpenAPI documentation for the Countries API
#[derive(OpenApi)]
#[openapi(
    paths(list_countries, get_country, sync_countries, sync_outdated_countries),
    components(schemas(Country, SyncResponse)),
    tags(
        (name = TAG, description = "Country reference data endpoints")
    )
)]
pub struct ApiDoc;

/// Create the countries router with all HTTP endpoints
pub fn router<R, G>(service: CountryService<R, G>) -> Router
where
    R: CountryRepository + 'static,
    G: CountryGateway + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_countries))
        .route("/{code}", get(get_country))
        .route("/sync", post(sync_countries))
        .route("/sync/outdated", post(sync_outdated_countries))
        .with_state(shared_service)
}

/// List all countries
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "List of countries", body = Vec<Country>)
    )
)]
async fn list_countries<R: CountryRepository, G: CountryGateway>(
    State(service): State<Arc<CountryService<R, G>>>,
) -> CountryResult<Json<Vec<Country>>> {
    let countries = service.list().await?;
    Ok(Json(countries))
}

/// Get a country by its alpha-3 code
#[utoipa::path(
    get,
    path = "/{code}",
    tag = TAG,
    params(
        ("code" = String, Path, description = "ISO 3166-1 alpha-3 country code")
    ),
    responses(
        (status = 200, description = "Country found", body = Country),
        (status = 404, description = "Country not found")
    )
)]
async fn get_country<R: CountryRepository, G: CountryGateway>(
    State(service): State<Arc<CountryService<R, G>>>,
    Path(code): Path<String>,
) -> CountryResult<Json<Country>> {
    let country = service.get(&code).await?;
    Ok(Json(country))
}

/// Sync all countries from the reference API
#[utoipa::path(
    post,
    path = "/sync",
    tag = TAG,
    responses(
        (status = 200, description = "Sync completed", body = SyncResponse),
        (status = 503, description = "Reference API unavailable")
    )
)]
async fn sync_countries<R: CountryRepository, G: CountryGateway>(
    State(service): State<Arc<CountryService<R, G>>>,
) -> CountryResult<Json<SyncResponse>> {
    let synced_count = service.sync_all().await?;
    Ok(Json(SyncResponse { synced_count }))
}

/// Re-sync countries whose data is older than the given number of days
#[utoipa::path(
    post,
    path = "/sync/outdated",
    tag = TAG,
    params(SyncOutdatedParams),
    responses(
        (status = 200, description = "Sync completed", body = SyncResponse),
        (status = 503, description = "Reference API unavailable")
    )
)]
async fn sync_outdated_countries<R: CountryRepository, G: CountryGateway>(
    State(service): State<Arc<CountryService<R, G>>>,
    Query(params): Query<SyncOutdatedParams>,
) -> CountryResult<Json<SyncResponse>> {
    let synced_count = service.sync_outdated(params.days_old()).await?;
    Ok(Json(SyncResponse { synced_count }))
}
