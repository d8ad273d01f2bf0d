//! JWT bearer-token validation middleware.
//!
//! Token issuance belongs to an external identity service; this module only
//! validates `Authorization: Bearer` headers on inbound requests.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use core_config::{env_or_default, env_required, ConfigError, FromEnv};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::errors::AppError;

/// JWT validation configuration.
///
/// Loaded from environment variables:
/// - `AUTH_ENABLED` (default: false) - whether bearer validation is applied
/// - `JWT_SECRET` (required when enabled) - at least 32 characters
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub enabled: bool,
    /// JWT signing secret (minimum 32 characters)
    pub secret: String,
}

impl JwtConfig {
    /// Create an enabled JwtConfig with the given secret.
    ///
    /// # Panics
    /// Panics if the secret is less than 32 characters.
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        assert!(
            secret.len() >= 32,
            "JWT secret must be at least 32 characters"
        );
        Self {
            enabled: true,
            secret,
        }
    }

    /// Validation disabled (development default).
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            secret: String::new(),
        }
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let enabled = env_or_default("AUTH_ENABLED", "false") == "true";

        if !enabled {
            return Ok(Self::disabled());
        }

        let secret = env_required("JWT_SECRET")?;
        if secret.len() < 32 {
            return Err(ConfigError::ParseError {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least 32 characters for security (got {}). Generate one with: openssl rand -base64 32",
                    secret.len()
                ),
            });
        }

        Ok(Self { enabled, secret })
    }
}

/// Claims carried by accepted bearer tokens.
///
/// Inserted as a request extension so handlers can read the caller identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (unix seconds)
    pub exp: i64,
    /// Issued at (unix seconds)
    pub iat: i64,
}

/// Axum middleware validating the `Authorization: Bearer` header.
///
/// Rejects with 401 when the header is missing, malformed, or the token
/// fails signature/expiry validation. No-op when validation is disabled.
pub async fn jwt_auth_middleware(
    State(config): State<Arc<JwtConfig>>,
    mut request: Request,
    next: Next,
) -> Response {
    if !config.enabled {
        return next.run(request).await;
    }

    let token = match bearer_token(&request) {
        Some(token) => token,
        None => {
            return AppError::Unauthorized("Missing bearer token".to_string()).into_response();
        }
    };

    match decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    ) {
        Ok(data) => {
            request.extensions_mut().insert(data.claims);
            next.run(request).await
        }
        Err(e) => {
            tracing::info!("JWT validation failed: {}", e);
            AppError::Unauthorized("Invalid or expired token".to_string()).into_response()
        }
    }
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_disabled_by_default() {
        temp_env::with_vars([("AUTH_ENABLED", None::<&str>), ("JWT_SECRET", None)], || {
            let config = JwtConfig::from_env().unwrap();
            assert!(!config.enabled);
        });
    }

    #[test]
    fn test_jwt_config_requires_secret_when_enabled() {
        temp_env::with_vars(
            [("AUTH_ENABLED", Some("true")), ("JWT_SECRET", None)],
            || {
                assert!(JwtConfig::from_env().is_err());
            },
        );
    }

    #[test]
    fn test_jwt_config_rejects_short_secret() {
        temp_env::with_vars(
            [("AUTH_ENABLED", Some("true")), ("JWT_SECRET", Some("short"))],
            || {
                let err = JwtConfig::from_env().unwrap_err();
                assert!(err.to_string().contains("32 characters"));
            },
        );
    }
}
