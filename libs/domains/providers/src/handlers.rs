use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch},
    Json, Router,
};
use axum_helpers::{PagedResult, UuidPath, ValidatedJson};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProviderResult;
use crate::models::{
    CreateProvider, CreatedResponse, CustomFieldDto, ProviderDto, ProviderFilter, UpdateProvider,
};
use crate::repository::ProviderRepository;
use crate::service::{ProviderService, ServiceLink};

const TAG: &str = "providers";

/// OpenAPI documentation for the Providers API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_providers,
        create_provider,
        get_provider,
        get_provider_by_nit,
        update_provider,
        toggle_provider_status,
        delete_provider,
    ),
    components(schemas(
        ProviderDto,
        CustomFieldDto,
        CreateProvider,
        UpdateProvider,
        CreatedResponse
    )),
    tags(
        (name = TAG, description = "Service provider management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the providers router with all HTTP endpoints
pub fn router<R, L>(service: ProviderService<R, L>) -> Router
where
    R: ProviderRepository + 'static,
    L: ServiceLink + 'static,
{
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_providers).post(create_provider))
        .route("/nit/{nit}", get(get_provider_by_nit))
        .route(
            "/{id}",
            get(get_provider)
                .put(update_provider)
                .delete(delete_provider),
        )
        .route("/{id}/toggle-status", patch(toggle_provider_status))
        .with_state(shared_service)
}

/// List providers with pagination and filters
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(ProviderFilter),
    responses(
        (status = 200, description = "Paged list of providers", body = PagedResult<ProviderDto>)
    )
)]
async fn list_providers<R: ProviderRepository, L: ServiceLink>(
    State(service): State<Arc<ProviderService<R, L>>>,
    Query(filter): Query<ProviderFilter>,
) -> ProviderResult<Json<PagedResult<ProviderDto>>> {
    let page = service.list(filter).await?;
    Ok(Json(page))
}

/// Create a new provider
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateProvider,
    responses(
        (status = 201, description = "Provider created", body = CreatedResponse),
        (status = 400, description = "Validation failure or duplicate NIT")
    )
)]
async fn create_provider<R: ProviderRepository, L: ServiceLink>(
    State(service): State<Arc<ProviderService<R, L>>>,
    ValidatedJson(input): ValidatedJson<CreateProvider>,
) -> ProviderResult<impl IntoResponse> {
    let id = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id })))
}

/// Get a provider by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Provider ID")
    ),
    responses(
        (status = 200, description = "Provider found", body = ProviderDto),
        (status = 404, description = "Provider not found")
    )
)]
async fn get_provider<R: ProviderRepository, L: ServiceLink>(
    State(service): State<Arc<ProviderService<R, L>>>,
    UuidPath(id): UuidPath,
) -> ProviderResult<Json<ProviderDto>> {
    let provider = service.get(id).await?;
    Ok(Json(provider))
}

/// Get a provider by NIT
#[utoipa::path(
    get,
    path = "/nit/{nit}",
    tag = TAG,
    params(
        ("nit" = String, Path, description = "Provider NIT")
    ),
    responses(
        (status = 200, description = "Provider found", body = ProviderDto),
        (status = 404, description = "Provider not found")
    )
)]
async fn get_provider_by_nit<R: ProviderRepository, L: ServiceLink>(
    State(service): State<Arc<ProviderService<R, L>>>,
    Path(nit): Path<String>,
) -> ProviderResult<Json<ProviderDto>> {
    let provider = service.get_by_nit(&nit).await?;
    Ok(Json(provider))
}

/// Update a provider
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Provider ID")
    ),
    request_body = UpdateProvider,
    responses(
        (status = 204, description = "Provider updated"),
        (status = 400, description = "Validation failure or ID mismatch"),
        (status = 404, description = "Provider not found")
    )
)]
async fn update_provider<R: ProviderRepository, L: ServiceLink>(
    State(service): State<Arc<ProviderService<R, L>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProvider>,
) -> ProviderResult<StatusCode> {
    service.update(id, input).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Toggle a provider's active status
#[utoipa::path(
    patch,
    path = "/{id}/toggle-status",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Provider ID")
    ),
    responses(
        (status = 204, description = "Status toggled"),
        (status = 404, description = "Provider not found")
    )
)]
async fn toggle_provider_status<R: ProviderRepository, L: ServiceLink>(
    State(service): State<Arc<ProviderService<R, L>>>,
    UuidPath(id): UuidPath,
) -> ProviderResult<StatusCode> {
    service.toggle_status(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Delete a provider (blocked while services reference it)
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG,
    params(
        ("id" = Uuid, Path, description = "Provider ID")
    ),
    responses(
        (status = 204, description = "Provider deleted"),
        (status = 400, description = "Provider still has services"),
        (status = 404, description = "Provider not found")
    )
)]
async fn delete_provider<R: ProviderRepository, L: ServiceLink>(
    State(service): State<Arc<ProviderService<R, L>>>,
    UuidPath(id): UuidPath,
) -> ProviderResult<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
