//! JSON extractor with automatic validation using the validator crate.

use crate::errors::{codes, validation_error_map, ErrorResponse};
use axum::{
    extract::{FromRequest, Json, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor with automatic validation.
///
/// Validates the request body using the `validator` crate's `Validate` trait
/// and returns the field-keyed error map on failure.
///
/// # Example
/// ```ignore
/// use axum_helpers::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct CreateProvider {
///     #[validate(length(min = 1, max = 200))]
///     name: String,
///     #[validate(email)]
///     email: String,
/// }
///
/// async fn create_provider(ValidatedJson(payload): ValidatedJson<CreateProvider>) -> String {
///     format!("Creating provider: {}", payload.name)
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| e.into_response())?;

        data.validate().map_err(|e| {
            let error_response = ErrorResponse {
                error: "One or more validation errors occurred".to_string(),
                error_code: Some(codes::VALIDATION_ERROR.to_string()),
                errors: Some(validation_error_map(&e)),
            };

            (StatusCode::BAD_REQUEST, axum::Json(error_response)).into_response()
        })?;

        Ok(ValidatedJson(data))
    }
}
