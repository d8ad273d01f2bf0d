use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

/// Error code returned when the NIT pre-check (or the unique index) trips.
pub const DUPLICATE_NIT: &str = "DUPLICATE_NIT";

/// Error code returned when deletion is blocked by referencing services.
pub const PROVIDER_HAS_SERVICES: &str = "PROVIDER_HAS_SERVICES";

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider not found: {0}")]
    NotFound(Uuid),

    #[error("Provider with NIT '{0}' not found")]
    NotFoundByNit(String),

    #[error("Provider with NIT '{0}' already exists")]
    DuplicateNit(String),

    #[error("Provider has services and cannot be deleted")]
    HasServices(Uuid),

    #[error("NIT cannot be empty")]
    EmptyNit,

    #[error("NIT cannot exceed {max} characters")]
    NitTooLong { max: usize },

    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Email '{0}' is not valid")]
    InvalidEmail(String),

    #[error("Provider name cannot be empty")]
    EmptyName,

    #[error("Provider name cannot exceed {max} characters")]
    NameTooLong { max: usize },

    #[error("Field name cannot be empty")]
    EmptyFieldName,

    #[error("Custom field with id {0} not found")]
    CustomFieldNotFound(Uuid),

    #[error("ID in path does not match ID in body")]
    IdMismatch,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Single translation point from domain failures to transport responses.
impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotFound(id) => {
                AppError::not_found(format!("Provider with id '{}' was not found", id))
            }
            ProviderError::NotFoundByNit(nit) => {
                AppError::not_found(format!("Provider with NIT '{}' was not found", nit))
            }
            ProviderError::CustomFieldNotFound(id) => {
                AppError::not_found(format!("Custom field with id '{}' was not found", id))
            }
            ProviderError::DuplicateNit(nit) => AppError::bad_request_with_code(
                format!("Provider with NIT '{}' already exists", nit),
                DUPLICATE_NIT,
            ),
            ProviderError::HasServices(_) => AppError::bad_request_with_code(
                "Cannot delete provider with associated services",
                PROVIDER_HAS_SERVICES,
            ),
            ProviderError::EmptyNit
            | ProviderError::NitTooLong { .. }
            | ProviderError::EmptyEmail
            | ProviderError::InvalidEmail(_)
            | ProviderError::EmptyName
            | ProviderError::NameTooLong { .. }
            | ProviderError::EmptyFieldName
            | ProviderError::IdMismatch => AppError::bad_request(err.to_string()),
            ProviderError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProviderError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
