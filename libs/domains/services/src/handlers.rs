use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{PagedResult, UuidPath, ValidatedJson};
use domain_countries::CountryRepository;
use domain_providers::{CreatedResponse, ProviderRepository};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ServiceResult;
use crate::models::{CreateService, ServiceDto, ServiceFilter, UpdateService};
use crate::repository::ServiceRepository;
use crate::service::ServiceService;

const TAG: &str = "services";

/// OpenAPI documentation for the Services API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_services,
        create_service,
        get_service,
        get_services_by_provider,
        update_service,
        assign_countries,
        delete_service,
    ),
    components(schemas(ServiceDto, CreateService, UpdateService, CreatedResponse)),
    tags(
        (name = TAG, description = "Service management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the services router with all HTTP endpoints
pub fn router<R, P, C>(service: ServiceService<R, P, C>) -> Router
where
    R: ServiceRepository + 'static,
    P: ProviderRepository + 'static,
    C: CountryRepository + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_services).post(create_service))
        .route("/provider/{providerId}", get(get_services_by_provider))
        .route(
            "/{id}",
            get(get_service).put(update_service).delete(delete_service),
        )
        .route("/{id}/countries", axum::routing::put(assign_countries))
        .with_state(shared_service)
}

/// List services with pagination and filters
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(ServiceFilter),
    responses(
        (status = 200, description = "Paged list of services", body = PagedResult<ServiceDto>)
    )
)]
async fn list_services<R, P, C>(
    State(service): State<Arc<ServiceService<R, P, C>>>,
    Query(filter): Query<ServiceFilter>,
) -> ServiceResult<Json<PagedResult<ServiceDto>>>
where
    R: ServiceRepository,
    P: ProviderRepository,
    C: CountryRepository,
{
    let page = service.list(filter).await?;
    Ok(Json(page))
}

/// Create a new service
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateService,
    responses(
        (status = 201, description = "Service created", body = CreatedResponse),
        (status = 400, description = "Validation failure or unknown country"),
        (status = 404, description = "Provider not found")
    )
)]
async fn create_service<R, P, C>(
    State(service): State<Arc<ServiceService<R, P, C>>>,
    ValidatedJson(input): ValidatedJson<CreateService>,
) -> ServiceResult<impl IntoResponse>
where
    R: ServiceRepository,
    P: ProviderRepository,
    C: CountryRepository,
{
    let id = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// Get a service by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Service ID")
    ),
    responses(
        (status = 200, description = "Service found", body = ServiceDto),
        (status = 404, description = "Service not found")
    )
)]
async fn get_service<R, P, C>(
    State(service): State<Arc<ServiceService<R, P, C>>>,
    UuidPath(id): UuidPath,
) -> ServiceResult<Json<ServiceDto>>
where
    R: ServiceRepository,
    P: ProviderRepository,
    C: CountryRepository,
{
    let dto = service.get(id).await?;
    Ok(Json(dto))
}

/// All services offered by one provider
#[utoipa::path(
    get,
    path = "/provider/{providerId}",
    tag = TAG,
    params(
        ("providerId" = Uuid, Path, description = "Provider ID")
    ),
    responses(
        (status = 200, description = "Services of the provider", body = Vec<ServiceDto>)
    )
)]
async fn get_services_by_provider<R, P, C>(
    State(service): State<Arc<ServiceService<R, P, C>>>,
    UuidPath(provider_id): UuidPath,
) -> ServiceResult<Json<Vec<ServiceDto>>>
where
    R: ServiceRepository,
    P: ProviderRepository,
    C: CountryRepository,
{
    let services = service.get_by_provider(provider_id).await?;
    Ok(Json(services))
}

/// Update a service
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Service ID")
    ),
    request_body = UpdateService,
    responses(
        (status = 204, description = "Service updated"),
        (status = 400, description = "Validation failure or ID mismatch"),
        (status = 404, description = "Service not found")
    )
)]
async fn update_service<R, P, C>(
    State(service): State<Arc<ServiceService<R, P, C>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateService>,
) -> ServiceResult<StatusCode>
where
    R: ServiceRepository,
    P: ProviderRepository,
    C: CountryRepository,
{
    service.update(id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Replace the countries where a service is offered (full replace)
#[utoipa::path(
    put,
    path = "/{id}/countries",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Service ID")
    ),
    request_body = Vec<String>,
    responses(
        (status = 204, description = "Countries replaced"),
        (status = 400, description = "Unknown country code"),
        (status = 404, description = "Service not found")
    )
)]
async fn assign_countries<R, P, C>(
    State(service): State<Arc<ServiceService<R, P, C>>>,
    UuidPath(id): UuidPath,
    Json(codes): Json<Vec<String>>,
) -> ServiceResult<StatusCode>
where
    R: ServiceRepository,
    P: ProviderRepository,
    C: CountryRepository,
{
    service.assign_countries(id, codes).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a service
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Service ID")
    ),
    responses(
        (status = 204, description = "Service deleted"),
        (status = 404, description = "Service not found")
    )
)]
async fn delete_service<R, P, C>(
    State(service): State<Arc<ServiceService<R, P, C>>>,
    UuidPath(id): UuidPath,
) -> ServiceResult<StatusCode>
where
    R: ServiceRepository,
    P: ProviderRepository,
    C: CountryRepository,
{
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
