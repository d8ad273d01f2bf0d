use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// Error code surfaced when a requested country code is not in the
/// reference table. Also used by the services domain when validating
/// country assignments.
pub const COUNTRY_NOT_FOUND: &str = "COUNTRY_NOT_FOUND";

#[derive(Debug, Error)]
pub enum CountryError {
    #[error("Country code cannot be empty")]
    EmptyCode,

    #[error("Country name cannot be empty")]
    EmptyName,

    #[error("Country code must be exactly 3 characters (ISO 3166-1 alpha-3): '{0}'")]
    InvalidCode(String),

    #[error("Country with code '{0}' not found")]
    NotFound(String),

    #[error("Country API error: {0}")]
    Api(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CountryResult<T> = Result<T, CountryError>;

/// Single translation point from domain failures to transport responses.
impl From<CountryError> for AppError {
    fn from(err: CountryError) -> Self {
        match err {
            CountryError::NotFound(code) => {
                AppError::not_found(format!("Country with code '{}' not found", code))
            }
            CountryError::EmptyCode | CountryError::EmptyName | CountryError::InvalidCode(_) => {
                AppError::bad_request(err.to_string())
            }
            CountryError::Api(msg) => {
                AppError::ServiceUnavailable(format!("Country API unavailable: {}", msg))
            }
            CountryError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CountryError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
