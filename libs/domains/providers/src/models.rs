use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProviderError, ProviderResult};
use crate::events::ProviderEvent;
use crate::values::{Email, Nit};

const NAME_MAX_LENGTH: usize = 200;

fn validate_name(name: &str) -> ProviderResult<()> {
    if name.trim().is_empty() {
        return Err(ProviderError::EmptyName);
    }
    if name.chars().count() > NAME_MAX_LENGTH {
        return Err(ProviderError::NameTooLong {
            max: NAME_MAX_LENGTH,
        });
    }
    Ok(())
}

/// Named custom field owned by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomField {
    pub id: Uuid,
    pub field_name: String,
    pub field_value: String,
    pub field_type: String,
}

/// Provider aggregate root.
///
/// Owns its custom fields; field names are unique within one provider.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: Uuid,
    pub nit: Nit,
    pub name: String,
    pub email: Email,
    pub is_active: bool,
    pub custom_fields: Vec<CustomField>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Entity identity: two providers are the same iff their ids match.
impl PartialEq for Provider {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Provider {}

impl Provider {
    /// Creates a new provider with a fresh id.
    ///
    /// Emits `ProviderCreated` as an explicit side-output.
    pub fn create(
        nit: Nit,
        name: &str,
        email: Email,
    ) -> ProviderResult<(Self, ProviderEvent)> {
        validate_name(name)?;

        let now = Utc::now();
        let provider = Self {
            id: Uuid::new_v4(),
            nit,
            name: name.to_string(),
            email,
            is_active: true,
            custom_fields: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        let event = ProviderEvent::Created {
            provider_id: provider.id,
            name: provider.name.clone(),
            nit: provider.nit.as_str().to_string(),
        };

        Ok((provider, event))
    }

    /// Replaces name and email after re-validating the name.
    pub fn update(&mut self, name: &str, email: Email) -> ProviderResult<()> {
        validate_name(name)?;

        self.name = name.to_string();
        self.email = email;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Adds a custom field, or updates the value/type of an existing field
    /// with the same name (idempotent-by-name).
    ///
    /// Only a genuinely new field emits `CustomFieldAdded`.
    pub fn add_custom_field(
        &mut self,
        field_name: &str,
        field_value: &str,
        field_type: &str,
    ) -> ProviderResult<Option<ProviderEvent>> {
        if field_name.trim().is_empty() {
            return Err(ProviderError::EmptyFieldName);
        }

        let event = match self
            .custom_fields
            .iter_mut()
            .find(|f| f.field_name == field_name)
        {
            Some(existing) => {
                existing.field_value = field_value.to_string();
                existing.field_type = field_type.to_string();
                None
            }
            None => {
                self.custom_fields.push(CustomField {
                    id: Uuid::new_v4(),
                    field_name: field_name.to_string(),
                    field_value: field_value.to_string(),
                    field_type: field_type.to_string(),
                });
                Some(ProviderEvent::CustomFieldAdded {
                    provider_id: self.id,
                    field_name: field_name.to_string(),
                })
            }
        };

        self.updated_at = Utc::now();
        Ok(event)
    }

    /// Removes a custom field by id.
    pub fn remove_custom_field(&mut self, custom_field_id: Uuid) -> ProviderResult<()> {
        let position = self
            .custom_fields
            .iter()
            .position(|f| f.id == custom_field_id)
            .ok_or(ProviderError::CustomFieldNotFound(custom_field_id))?;

        self.custom_fields.remove(position);
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn activate(&mut self) {
        self.is_active = true;
        self.updated_at = Utc::now();
    }

    pub fn deactivate(&mut self) -> ProviderEvent {
        self.is_active = false;
        self.updated_at = Utc::now();
        ProviderEvent::Deactivated {
            provider_id: self.id,
        }
    }
}

/// Custom field as carried on the wire: `{ key, value, type }`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CustomFieldDto {
    #[validate(length(min = 1, message = "Field key cannot be empty"))]
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub field_type: String,
}

/// Provider as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProviderDto {
    pub id: Uuid,
    pub nit: String,
    pub name: String,
    pub email: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub custom_fields: Vec<CustomFieldDto>,
}

impl From<Provider> for ProviderDto {
    fn from(provider: Provider) -> Self {
        Self {
            id: provider.id,
            nit: provider.nit.into_string(),
            name: provider.name,
            email: provider.email.into_string(),
            is_active: provider.is_active,
            created_at: provider.created_at,
            updated_at: provider.updated_at,
            custom_fields: provider
                .custom_fields
                .into_iter()
                .map(|f| CustomFieldDto {
                    key: f.field_name,
                    value: f.field_value,
                    field_type: f.field_type,
                })
                .collect(),
        }
    }
}

/// Command payload for creating a provider.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProvider {
    #[validate(length(min = 1, max = 20, message = "NIT must be between 1 and 20 characters"))]
    pub nit: String,
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: String,
    #[validate(email(message = "Email is not a valid address"))]
    pub email: String,
    #[validate(nested)]
    pub custom_fields: Option<Vec<CustomFieldDto>>,
}

/// Command payload for updating a provider. The id must match the path.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProvider {
    pub id: Uuid,
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: String,
    #[validate(email(message = "Email is not a valid address"))]
    pub email: String,
}

/// Query filters for listing providers.
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProviderFilter {
    /// Case-insensitive match against name or NIT
    pub search_term: Option<String>,
    pub is_active: Option<bool>,
    /// Current page number (1-based)
    pub page_number: Option<u64>,
    /// Number of items per page (1-100, default 10)
    pub page_size: Option<u64>,
}

impl ProviderFilter {
    pub fn pagination(&self) -> axum_helpers::PaginationParams {
        axum_helpers::PaginationParams {
            page_number: self.page_number,
            page_size: self.page_size,
        }
    }
}

/// Body of a 201 response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedResponse {
    pub id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> Provider {
        let (provider, _) = Provider::create(
            Nit::new("900123456").unwrap(),
            "Tekus SAS",
            Email::new("info@tekus.com").unwrap(),
        )
        .unwrap();
        provider
    }

    #[test]
    fn test_create_sets_defaults_and_emits_event() {
        let (provider, event) = Provider::create(
            Nit::new("900123456").unwrap(),
            "Tekus SAS",
            Email::new("INFO@tekus.com").unwrap(),
        )
        .unwrap();

        assert!(provider.is_active);
        assert!(provider.custom_fields.is_empty());
        assert_eq!(provider.email.as_str(), "info@tekus.com");
        assert!(matches!(
            event,
            ProviderEvent::Created { provider_id, .. } if provider_id == provider.id
        ));
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let result = Provider::create(
            Nit::new("900123456").unwrap(),
            "   ",
            Email::new("info@tekus.com").unwrap(),
        );
        assert!(matches!(result, Err(ProviderError::EmptyName)));
    }

    #[test]
    fn test_create_rejects_over_long_name() {
        let result = Provider::create(
            Nit::new("900123456").unwrap(),
            &"x".repeat(201),
            Email::new("info@tekus.com").unwrap(),
        );
        assert!(matches!(result, Err(ProviderError::NameTooLong { .. })));
    }

    #[test]
    fn test_update_replaces_fields() {
        let mut provider = provider();
        provider
            .update("Tekus Colombia", Email::new("sales@tekus.com").unwrap())
            .unwrap();

        assert_eq!(provider.name, "Tekus Colombia");
        assert_eq!(provider.email.as_str(), "sales@tekus.com");
    }

    #[test]
    fn test_update_revalidates_name() {
        let mut provider = provider();
        assert!(provider
            .update("", Email::new("sales@tekus.com").unwrap())
            .is_err());
        assert_eq!(provider.name, "Tekus SAS");
    }

    #[test]
    fn test_add_custom_field_is_idempotent_by_name() {
        let mut provider = provider();

        let first = provider
            .add_custom_field("country", "Colombia", "text")
            .unwrap();
        assert!(first.is_some());

        let second = provider
            .add_custom_field("country", "Peru", "text")
            .unwrap();
        assert!(second.is_none());

        assert_eq!(provider.custom_fields.len(), 1);
        assert_eq!(provider.custom_fields[0].field_value, "Peru");
    }

    #[test]
    fn test_add_custom_field_rejects_blank_name() {
        let mut provider = provider();
        assert!(matches!(
            provider.add_custom_field("  ", "x", "text"),
            Err(ProviderError::EmptyFieldName)
        ));
    }

    #[test]
    fn test_remove_custom_field() {
        let mut provider = provider();
        provider
            .add_custom_field("country", "Colombia", "text")
            .unwrap();
        let field_id = provider.custom_fields[0].id;

        provider.remove_custom_field(field_id).unwrap();
        assert!(provider.custom_fields.is_empty());
    }

    #[test]
    fn test_remove_missing_custom_field_fails() {
        let mut provider = provider();
        let missing = Uuid::new_v4();
        assert!(matches!(
            provider.remove_custom_field(missing),
            Err(ProviderError::CustomFieldNotFound(id)) if id == missing
        ));
    }

    #[test]
    fn test_deactivate_emits_event() {
        let mut provider = provider();
        let event = provider.deactivate();
        assert!(!provider.is_active);
        assert!(matches!(event, ProviderEvent::Deactivated { .. }));

        provider.activate();
        assert!(provider.is_active);
    }

    #[test]
    fn test_identity_equality_by_id() {
        let a = provider();
        let mut b = a.clone();
        b.name = "Renamed".to_string();
        assert_eq!(a, b);

        let c = provider();
        assert_ne!(a, c);
    }

    #[test]
    fn test_dto_maps_custom_fields_to_wire_shape() {
        let mut provider = provider();
        provider
            .add_custom_field("country", "Colombia", "text")
            .unwrap();

        let dto: ProviderDto = provider.into();
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["customFields"][0]["key"], "country");
        assert_eq!(json["customFields"][0]["type"], "text");
        assert!(json["isActive"].as_bool().unwrap());
    }
}
