use utoipa::OpenApi;

/// Combined OpenAPI document for the whole API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "ProvHub API",
        description = "CRUD management backend for service providers, their services, and the countries where they operate",
    ),
    nest(
        (path = "/api/v1/providers", api = domain_providers::handlers::ApiDoc),
        (path = "/api/v1/services", api = domain_services::handlers::ApiDoc),
        (path = "/api/v1/countries", api = domain_countries::handlers::ApiDoc),
    ),
    components(schemas(axum_helpers::ErrorResponse))
)]
pub struct ApiDoc;
