//! Value objects owned by the providers domain.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::ValidateEmail;

use crate::error::{ProviderError, ProviderResult};

const NIT_MAX_LENGTH: usize = 20;

/// NIT (tax identification number), the provider's external unique key.
///
/// Any non-empty string up to 20 characters is accepted as-is; no format
/// normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct Nit(String);

impl Nit {
    pub fn new(value: &str) -> ProviderResult<Self> {
        if value.trim().is_empty() {
            return Err(ProviderError::EmptyNit);
        }
        if value.chars().count() > NIT_MAX_LENGTH {
            return Err(ProviderError::NitTooLong {
                max: NIT_MAX_LENGTH,
            });
        }

        Ok(Self(value.to_string()))
    }

    /// Rehydrates a value that was validated before persistence.
    pub(crate) fn from_stored(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Nit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated email address, normalized to lower-case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn new(value: &str) -> ProviderResult<Self> {
        if value.trim().is_empty() {
            return Err(ProviderError::EmptyEmail);
        }
        if !value.validate_email() {
            return Err(ProviderError::InvalidEmail(value.to_string()));
        }

        Ok(Self(value.to_lowercase()))
    }

    /// Rehydrates a value that was validated before persistence.
    pub(crate) fn from_stored(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
