pub mod codes;
pub mod handlers;

use std::collections::BTreeMap;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Error as UuidError;
use validator::ValidationErrors;

/// Standard error response structure.
///
/// Returned for all error responses:
/// - `error`: human-readable error message
/// - `errorCode`: optional machine-readable identifier (e.g. "DUPLICATE_NIT")
/// - `errors`: field-keyed validation messages, present only for validation failures
///
/// # JSON Example
///
/// ```json
/// {
///   "error": "Provider with NIT '900123456' already exists",
///   "errorCode": "DUPLICATE_NIT"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Machine-readable error identifier for programmatic handling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// Field-keyed validation messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

/// Application error type that converts into HTTP responses.
///
/// Domain error enums implement `From<DomainError> for AppError`, making the
/// axum boundary the single place where failures become status codes.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("UUID error: {0}")]
    UuidError(#[from] UuidError),

    #[error("Bad Request: {message}")]
    BadRequest {
        message: String,
        code: Option<String>,
    },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    /// 400 with no error code.
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest {
            message: message.into(),
            code: None,
        }
    }

    /// 400 carrying a machine-readable error code.
    pub fn bad_request_with_code(message: impl Into<String>, code: &str) -> Self {
        AppError::BadRequest {
            message: message.into(),
            code: Some(code.to_string()),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }
}

/// Flattens `validator` errors into the `{ field: [messages] }` map
/// exposed by [`ErrorResponse`]. Field names are camel-cased to match the
/// JSON wire format.
pub fn validation_error_map(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (camel_case(field), messages)
        })
        .collect()
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "An internal error occurred".to_string(),
                        error_code: Some(codes::INTERNAL_ERROR.to_string()),
                        errors: None,
                    },
                )
            }
            AppError::JsonExtractorRejection(e) => {
                tracing::info!("JSON extraction error: {:?}", e);
                (
                    e.status(),
                    ErrorResponse {
                        error: e.body_text(),
                        error_code: None,
                        errors: None,
                    },
                )
            }
            AppError::ValidationError(e) => {
                tracing::info!("Validation error: {:?}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "One or more validation errors occurred".to_string(),
                        error_code: Some(codes::VALIDATION_ERROR.to_string()),
                        errors: Some(validation_error_map(&e)),
                    },
                )
            }
            AppError::UuidError(e) => {
                tracing::info!("UUID error: {:?}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Invalid UUID in request".to_string(),
                        error_code: Some(codes::INVALID_ID.to_string()),
                        errors: None,
                    },
                )
            }
            AppError::BadRequest { message, code } => {
                tracing::info!("Bad request: {}", message);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: message,
                        error_code: code,
                        errors: None,
                    },
                )
            }
            AppError::Unauthorized(message) => {
                tracing::info!("Unauthorized: {}", message);
                (
                    StatusCode::UNAUTHORIZED,
                    ErrorResponse {
                        error: message,
                        error_code: Some(codes::UNAUTHORIZED.to_string()),
                        errors: None,
                    },
                )
            }
            AppError::NotFound(message) => {
                tracing::info!("Not found: {}", message);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse {
                        error: message,
                        error_code: Some(codes::NOT_FOUND.to_string()),
                        errors: None,
                    },
                )
            }
            AppError::InternalServerError(message) => {
                tracing::error!("Internal server error: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "An internal error occurred".to_string(),
                        error_code: Some(codes::INTERNAL_ERROR.to_string()),
                        errors: None,
                    },
                )
            }
            AppError::ServiceUnavailable(message) => {
                tracing::error!("Service unavailable: {}", message);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse {
                        error: message,
                        error_code: Some(codes::SERVICE_UNAVAILABLE.to_string()),
                        errors: None,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
