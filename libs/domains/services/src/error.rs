use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use domain_countries::error::COUNTRY_NOT_FOUND;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Service not found: {0}")]
    NotFound(Uuid),

    #[error("Provider not found: {0}")]
    ProviderNotFound(Uuid),

    #[error("Country with code '{0}' not found")]
    CountryNotFound(String),

    #[error("ProviderId cannot be empty")]
    EmptyProviderId,

    #[error("Service name cannot be empty")]
    EmptyName,

    #[error("Service name cannot exceed {max} characters")]
    NameTooLong { max: usize },

    #[error("Country code cannot be empty")]
    EmptyCountryCode,

    #[error("Country {0} is already assigned to this service")]
    DuplicateCountry(String),

    #[error("Country {0} is not assigned to this service")]
    CountryNotAssigned(String),

    #[error("Amount cannot be negative")]
    NegativeAmount,

    #[error("Currency '{0}' is not a 3-letter code")]
    InvalidCurrency(String),

    #[error("Cannot operate on money with different currencies ({left} vs {right})")]
    CurrencyMismatch { left: String, right: String },

    #[error("ID in path does not match ID in body")]
    IdMismatch,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Single translation point from domain failures to transport responses.
impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(id) => {
                AppError::not_found(format!("Service with id '{}' was not found", id))
            }
            ServiceError::ProviderNotFound(id) => {
                AppError::not_found(format!("Provider with id '{}' was not found", id))
            }
            ServiceError::CountryNotAssigned(code) => AppError::not_found(format!(
                "Country {} is not assigned to this service",
                code
            )),
            ServiceError::CountryNotFound(code) => AppError::bad_request_with_code(
                format!("Country with code '{}' not found", code),
                COUNTRY_NOT_FOUND,
            ),
            ServiceError::EmptyProviderId
            | ServiceError::EmptyName
            | ServiceError::NameTooLong { .. }
            | ServiceError::EmptyCountryCode
            | ServiceError::DuplicateCountry(_)
            | ServiceError::NegativeAmount
            | ServiceError::InvalidCurrency(_)
            | ServiceError::CurrencyMismatch { .. }
            | ServiceError::IdMismatch => AppError::bad_request(err.to_string()),
            ServiceError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
