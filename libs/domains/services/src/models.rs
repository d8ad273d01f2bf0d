use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::error::{ServiceError, ServiceResult};
use crate::events::ServiceEvent;
use crate::money::Money;

const NAME_MAX_LENGTH: usize = 200;

fn validate_name(name: &str) -> ServiceResult<()> {
    if name.trim().is_empty() {
        return Err(ServiceError::EmptyName);
    }
    if name.chars().count() > NAME_MAX_LENGTH {
        return Err(ServiceError::NameTooLong {
            max: NAME_MAX_LENGTH,
        });
    }
    Ok(())
}

fn normalize_code(code: &str) -> ServiceResult<String> {
    let code = code.trim();
    if code.is_empty() {
        return Err(ServiceError::EmptyCountryCode);
    }
    Ok(code.to_uppercase())
}

/// Service aggregate root.
///
/// Belongs to one provider and owns the set of country codes where it is
/// offered (upper-cased, no duplicates).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub name: String,
    pub hourly_rate: Money,
    pub description: Option<String>,
    pub is_active: bool,
    pub countries: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Entity identity: two services are the same iff their ids match.
impl PartialEq for Service {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Service {}

impl Service {
    /// Creates a new service with a fresh id.
    ///
    /// Emits `ServiceCreated` as an explicit side-output.
    pub fn create(
        provider_id: Uuid,
        name: &str,
        hourly_rate: Money,
        description: Option<String>,
    ) -> ServiceResult<(Self, ServiceEvent)> {
        if provider_id.is_nil() {
            return Err(ServiceError::EmptyProviderId);
        }
        validate_name(name)?;

        let now = Utc::now();
        let service = Self {
            id: Uuid::new_v4(),
            provider_id,
            name: name.to_string(),
            hourly_rate,
            description,
            is_active: true,
            countries: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        let event = ServiceEvent::Created {
            service_id: service.id,
            provider_id: service.provider_id,
            name: service.name.clone(),
        };

        Ok((service, event))
    }

    /// Replaces name, rate, and description after re-validating the name.
    pub fn update(
        &mut self,
        name: &str,
        hourly_rate: Money,
        description: Option<String>,
    ) -> ServiceResult<()> {
        validate_name(name)?;

        self.name = name.to_string();
        self.hourly_rate = hourly_rate;
        self.description = description;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Reassigns the service to another provider.
    pub fn change_provider(&mut self, new_provider_id: Uuid) -> ServiceResult<ServiceEvent> {
        if new_provider_id.is_nil() {
            return Err(ServiceError::EmptyProviderId);
        }

        let old_provider_id = self.provider_id;
        self.provider_id = new_provider_id;
        self.updated_at = Utc::now();

        Ok(ServiceEvent::ProviderChanged {
            service_id: self.id,
            old_provider_id,
            new_provider_id,
        })
    }

    /// Assigns a country where this service is offered.
    pub fn assign_country(&mut self, country_code: &str) -> ServiceResult<ServiceEvent> {
        let code = normalize_code(country_code)?;

        if self.countries.contains(&code) {
            return Err(ServiceError::DuplicateCountry(code));
        }

        self.countries.push(code.clone());
        self.updated_at = Utc::now();

        Ok(ServiceEvent::CountryAssigned {
            service_id: self.id,
            country_code: code,
        })
    }

    /// Removes a country assignment.
    pub fn remove_country(&mut self, country_code: &str) -> ServiceResult<()> {
        let code = normalize_code(country_code)?;

        let position = self
            .countries
            .iter()
            .position(|c| c == &code)
            .ok_or(ServiceError::CountryNotAssigned(code))?;

        self.countries.remove(position);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Country codes where this service is offered.
    pub fn country_codes(&self) -> &[String] {
        &self.countries
    }

    /// Whether the service is offered in the given country.
    pub fn is_offered_in(&self, country_code: &str) -> bool {
        normalize_code(country_code)
            .map(|code| self.countries.contains(&code))
            .unwrap_or(false)
    }
}

/// Service as returned by the API, enriched with the provider's name.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDto {
    pub id: Uuid,
    pub name: String,
    pub hourly_rate: f64,
    pub currency: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub provider_id: Uuid,
    pub provider_name: Option<String>,
    pub country_codes: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ServiceDto {
    pub fn from_service(service: Service, provider_name: Option<String>) -> Self {
        Self {
            id: service.id,
            name: service.name,
            hourly_rate: service.hourly_rate.amount(),
            currency: service.hourly_rate.currency().to_string(),
            description: service.description,
            is_active: service.is_active,
            provider_id: service.provider_id,
            provider_name,
            country_codes: service.countries,
            created_at: service.created_at,
            updated_at: service.updated_at,
        }
    }
}

/// Command payload for creating a service.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateService {
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "Hourly rate cannot be negative"))]
    pub hourly_rate: f64,
    /// 3-letter currency code (default USD)
    pub currency: Option<String>,
    pub description: Option<String>,
    pub provider_id: Uuid,
    /// Countries to assign at creation (alpha-3 codes)
    pub country_codes: Option<Vec<String>>,
}

/// Command payload for updating a service. The id must match the path.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateService {
    pub id: Uuid,
    #[validate(length(min = 1, max = 200, message = "Name must be between 1 and 200 characters"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "Hourly rate cannot be negative"))]
    pub hourly_rate: f64,
    /// 3-letter currency code (default USD)
    pub currency: Option<String>,
    pub description: Option<String>,
}

/// Query filters for listing services.
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceFilter {
    /// Case-insensitive substring match on name
    pub search_term: Option<String>,
    /// Only services of this provider (takes precedence over countryCode)
    pub provider_id: Option<Uuid>,
    /// Only services offered in this country
    pub country_code: Option<String>,
    /// Current page number (1-based)
    pub page_number: Option<u64>,
    /// Number of items per page (1-100, default 10)
    pub page_size: Option<u64>,
}

impl ServiceFilter {
    pub fn pagination(&self) -> axum_helpers::PaginationParams {
        axum_helpers::PaginationParams {
            page_number: self.page_number,
            page_size: self.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> Service {
        let (service, _) = Service::create(
            Uuid::new_v4(),
            "Cloud Hosting",
            Money::usd(150.5).unwrap(),
            Some("Managed hosting".to_string()),
        )
        .unwrap();
        service
    }

    #[test]
    fn test_create_sets_defaults_and_emits_event() {
        let provider_id = Uuid::new_v4();
        let (service, event) = Service::create(
            provider_id,
            "Cloud Hosting",
            Money::usd(150.5).unwrap(),
            None,
        )
        .unwrap();

        assert!(service.is_active);
        assert!(service.countries.is_empty());
        assert!(matches!(
            event,
            ServiceEvent::Created { provider_id: p, .. } if p == provider_id
        ));
    }

    #[test]
    fn test_create_rejects_nil_provider() {
        let result = Service::create(Uuid::nil(), "Cloud", Money::usd(1.0).unwrap(), None);
        assert!(matches!(result, Err(ServiceError::EmptyProviderId)));
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let result = Service::create(Uuid::new_v4(), "  ", Money::usd(1.0).unwrap(), None);
        assert!(matches!(result, Err(ServiceError::EmptyName)));
    }

    #[test]
    fn test_assign_country_normalizes_and_rejects_duplicates() {
        let mut service = service();

        service.assign_country("col").unwrap();
        assert_eq!(service.country_codes(), ["COL"]);

        assert!(matches!(
            service.assign_country("COL"),
            Err(ServiceError::DuplicateCountry(code)) if code == "COL"
        ));
    }

    #[test]
    fn test_assign_country_rejects_blank() {
        let mut service = service();
        assert!(matches!(
            service.assign_country("  "),
            Err(ServiceError::EmptyCountryCode)
        ));
    }

    #[test]
    fn test_remove_country() {
        let mut service = service();
        service.assign_country("COL").unwrap();

        service.remove_country("col").unwrap();
        assert!(service.country_codes().is_empty());
    }

    #[test]
    fn test_remove_unassigned_country_fails() {
        let mut service = service();
        assert!(matches!(
            service.remove_country("PER"),
            Err(ServiceError::CountryNotAssigned(code)) if code == "PER"
        ));
    }

    #[test]
    fn test_is_offered_in() {
        let mut service = service();
        service.assign_country("COL").unwrap();

        assert!(service.is_offered_in("col"));
        assert!(!service.is_offered_in("PER"));
        assert!(!service.is_offered_in(""));
    }

    #[test]
    fn test_change_provider_emits_event_with_both_ids() {
        let mut service = service();
        let old = service.provider_id;
        let new = Uuid::new_v4();

        let event = service.change_provider(new).unwrap();
        assert_eq!(service.provider_id, new);
        assert!(matches!(
            event,
            ServiceEvent::ProviderChanged { old_provider_id, new_provider_id, .. }
                if old_provider_id == old && new_provider_id == new
        ));
    }

    #[test]
    fn test_change_provider_rejects_nil() {
        let mut service = service();
        assert!(matches!(
            service.change_provider(Uuid::nil()),
            Err(ServiceError::EmptyProviderId)
        ));
    }

    #[test]
    fn test_update_replaces_fields() {
        let mut service = service();
        service
            .update("Cloud Premium", Money::usd(200.0).unwrap(), None)
            .unwrap();

        assert_eq!(service.name, "Cloud Premium");
        assert_eq!(service.hourly_rate.amount(), 200.0);
        assert!(service.description.is_none());
    }

    #[test]
    fn test_identity_equality_by_id() {
        let a = service();
        let mut b = a.clone();
        b.name = "Renamed".to_string();
        assert_eq!(a, b);
        assert_ne!(a, service());
    }

    #[test]
    fn test_dto_flattens_money() {
        let mut service = service();
        service.assign_country("COL").unwrap();

        let dto = ServiceDto::from_service(service, Some("Tekus SAS".to_string()));
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["hourlyRate"], 150.5);
        assert_eq!(json["currency"], "USD");
        assert_eq!(json["providerName"], "Tekus SAS");
        assert_eq!(json["countryCodes"][0], "COL");
    }
}
