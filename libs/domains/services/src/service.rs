use axum_helpers::PagedResult;
use domain_countries::CountryRepository;
use domain_providers::ProviderRepository;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::events::ServiceEvent;
use crate::models::{CreateService, Service, ServiceDto, ServiceFilter, UpdateService};
use crate::money::{Money, DEFAULT_CURRENCY};
use crate::repository::ServiceRepository;

/// Service layer for Service business logic.
///
/// Cross-aggregate preconditions (provider existence, country existence)
/// are checked against the owning domains before any mutation reaches the
/// repository.
#[derive(Clone)]
pub struct ServiceService<R, P, C>
where
    R: ServiceRepository,
    P: ProviderRepository,
    C: CountryRepository,
{
    repository: Arc<R>,
    providers: Arc<P>,
    countries: Arc<C>,
}

impl<R, P, C> ServiceService<R, P, C>
where
    R: ServiceRepository,
    P: ProviderRepository,
    C: CountryRepository,
{
    pub fn new(repository: R, providers: P, countries: C) -> Self {
        Self {
            repository: Arc::new(repository),
            providers: Arc::new(providers),
            countries: Arc::new(countries),
        }
    }

    fn publish(&self, event: &ServiceEvent) {
        // Informational only; there is no dispatcher
        tracing::info!(event = event.name(), ?event, "Domain event");
    }

    /// Every requested code must exist in the country table before any
    /// mutation is staged; an invalid code therefore persists nothing.
    async fn ensure_countries_exist(&self, codes: &[String]) -> ServiceResult<()> {
        for code in codes {
            let exists = self
                .countries
                .exists(code)
                .await
                .map_err(|e| ServiceError::Internal(e.to_string()))?;
            if !exists {
                return Err(ServiceError::CountryNotFound(code.to_uppercase()));
            }
        }
        Ok(())
    }

    async fn provider_names(
        &self,
        services: &[Service],
    ) -> ServiceResult<HashMap<Uuid, String>> {
        let distinct: HashSet<Uuid> = services.iter().map(|s| s.provider_id).collect();

        let mut names = HashMap::new();
        for provider_id in distinct {
            let provider = self
                .providers
                .get_by_id(provider_id)
                .await
                .map_err(|e| ServiceError::Internal(e.to_string()))?;
            if let Some(provider) = provider {
                names.insert(provider_id, provider.name);
            }
        }
        Ok(names)
    }

    async fn enrich(&self, services: Vec<Service>) -> ServiceResult<Vec<ServiceDto>> {
        let names = self.provider_names(&services).await?;
        Ok(services
            .into_iter()
            .map(|s| {
                let name = names.get(&s.provider_id).cloned();
                ServiceDto::from_service(s, name)
            })
            .collect())
    }

    /// List services: provider filter takes precedence over country filter,
    /// then in-memory name search, then pagination, then provider-name
    /// enrichment.
    pub async fn list(&self, filter: ServiceFilter) -> ServiceResult<PagedResult<ServiceDto>> {
        let mut services = if let Some(provider_id) = filter.provider_id {
            self.repository.get_by_provider(provider_id).await?
        } else if let Some(ref country_code) = filter.country_code {
            self.repository.get_by_country(country_code).await?
        } else {
            self.repository.get_all().await?
        };

        if let Some(ref term) = filter.search_term {
            let term = term.to_lowercase();
            services.retain(|s| s.name.to_lowercase().contains(&term));
        }

        let total = services.len() as u64;
        let page = filter.pagination();

        let page_items: Vec<Service> = services
            .into_iter()
            .skip(page.skip() as usize)
            .take(page.page_size() as usize)
            .collect();

        let items = self.enrich(page_items).await?;
        Ok(PagedResult::new(
            items,
            total,
            page.page_number(),
            page.page_size(),
        ))
    }

    /// Get a service by ID
    pub async fn get(&self, id: Uuid) -> ServiceResult<ServiceDto> {
        let service = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(id))?;

        let mut enriched = self.enrich(vec![service]).await?;
        Ok(enriched.remove(0))
    }

    /// All services of one provider
    pub async fn get_by_provider(&self, provider_id: Uuid) -> ServiceResult<Vec<ServiceDto>> {
        let services = self.repository.get_by_provider(provider_id).await?;
        self.enrich(services).await
    }

    /// Create a new service.
    ///
    /// The provider must exist and every requested country code must be in
    /// the country table; only then is the aggregate built and persisted.
    pub async fn create(&self, input: CreateService) -> ServiceResult<Uuid> {
        let provider = self
            .providers
            .get_by_id(input.provider_id)
            .await
            .map_err(|e| ServiceError::Internal(e.to_string()))?;
        if provider.is_none() {
            return Err(ServiceError::ProviderNotFound(input.provider_id));
        }

        let country_codes = input.country_codes.unwrap_or_default();
        self.ensure_countries_exist(&country_codes).await?;

        let currency = input.currency.as_deref().unwrap_or(DEFAULT_CURRENCY);
        let hourly_rate = Money::new(input.hourly_rate, currency)?;

        let (mut service, created) = Service::create(
            input.provider_id,
            &input.name,
            hourly_rate,
            input.description,
        )?;
        self.publish(&created);

        for code in &country_codes {
            let event = service.assign_country(code)?;
            self.publish(&event);
        }

        let service = self.repository.insert(service).await?;
        Ok(service.id)
    }

    /// Update a service's name, rate, and description
    pub async fn update(&self, id: Uuid, input: UpdateService) -> ServiceResult<()> {
        if id != input.id {
            return Err(ServiceError::IdMismatch);
        }

        let mut service = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(id))?;

        let currency = input.currency.as_deref().unwrap_or(DEFAULT_CURRENCY);
        let hourly_rate = Money::new(input.hourly_rate, currency)?;

        service.update(&input.name, hourly_rate, input.description)?;

        self.repository.update(service).await?;
        Ok(())
    }

    /// Replace the full set of countries assigned to a service.
    ///
    /// The entire requested set is validated before the existing
    /// assignments are cleared, and the clear + reassign is persisted as
    /// one repository update, so a bad code leaves the service untouched.
    pub async fn assign_countries(&self, id: Uuid, codes: Vec<String>) -> ServiceResult<()> {
        let mut service = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(id))?;

        self.ensure_countries_exist(&codes).await?;

        for code in service.country_codes().to_vec() {
            service.remove_country(&code)?;
        }

        for code in &codes {
            let event = service.assign_country(code)?;
            self.publish(&event);
        }

        self.repository.update(service).await?;
        Ok(())
    }

    /// Delete a service
    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(ServiceError::NotFound(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryServiceRepository;
    use domain_countries::{Country, InMemoryCountryRepository};
    use domain_providers::{Email, InMemoryProviderRepository, Nit, Provider};

    struct Fixture {
        service: ServiceService<
            InMemoryServiceRepository,
            InMemoryProviderRepository,
            InMemoryCountryRepository,
        >,
        repo: InMemoryServiceRepository,
        provider_id: Uuid,
    }

    async fn fixture() -> Fixture {
        let providers = InMemoryProviderRepository::new();
        let countries = InMemoryCountryRepository::new();
        let repo = InMemoryServiceRepository::new();

        let (provider, _) = Provider::create(
            Nit::new("900123456").unwrap(),
            "Tekus SAS",
            Email::new("info@tekus.com").unwrap(),
        )
        .unwrap();
        let provider_id = provider.id;
        providers.insert(provider).await.unwrap();

        for (code, name) in [("COL", "Colombia"), ("PER", "Peru"), ("MEX", "Mexico")] {
            countries
                .upsert(Country::new(code, name).unwrap())
                .await
                .unwrap();
        }

        Fixture {
            service: ServiceService::new(repo.clone(), providers, countries),
            repo,
            provider_id,
        }
    }

    fn create_input(provider_id: Uuid, countries: &[&str]) -> CreateService {
        CreateService {
            name: "Cloud".to_string(),
            hourly_rate: 150.5,
            currency: Some("USD".to_string()),
            description: None,
            provider_id,
            country_codes: Some(countries.iter().map(|c| c.to_string()).collect()),
        }
    }

    #[tokio::test]
    async fn test_create_with_unknown_provider_fails() {
        let f = fixture().await;
        let result = f.service.create(create_input(Uuid::new_v4(), &[])).await;
        assert!(matches!(result, Err(ServiceError::ProviderNotFound(_))));
    }

    #[tokio::test]
    async fn test_create_with_unknown_country_persists_nothing() {
        let f = fixture().await;

        let result = f
            .service
            .create(create_input(f.provider_id, &["COL", "XXX"]))
            .await;

        assert!(matches!(
            result,
            Err(ServiceError::CountryNotFound(code)) if code == "XXX"
        ));
        assert!(f.repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_defaults_currency_to_usd() {
        let f = fixture().await;

        let mut input = create_input(f.provider_id, &["COL"]);
        input.currency = None;
        let id = f.service.create(input).await.unwrap();

        let dto = f.service.get(id).await.unwrap();
        assert_eq!(dto.currency, "USD");
        assert_eq!(dto.hourly_rate, 150.5);
        assert_eq!(dto.country_codes, ["COL"]);
        assert_eq!(dto.provider_name.as_deref(), Some("Tekus SAS"));
    }

    #[tokio::test]
    async fn test_create_rejects_negative_rate() {
        let f = fixture().await;
        let mut input = create_input(f.provider_id, &[]);
        input.hourly_rate = -1.0;

        assert!(matches!(
            f.service.create(input).await,
            Err(ServiceError::NegativeAmount)
        ));
    }

    #[tokio::test]
    async fn test_assign_countries_replaces_full_set() {
        let f = fixture().await;
        let id = f
            .service
            .create(create_input(f.provider_id, &["COL", "PER"]))
            .await
            .unwrap();

        f.service
            .assign_countries(id, vec!["MEX".to_string()])
            .await
            .unwrap();

        let dto = f.service.get(id).await.unwrap();
        assert_eq!(dto.country_codes, ["MEX"]);
    }

    #[tokio::test]
    async fn test_assign_countries_with_invalid_code_changes_nothing() {
        let f = fixture().await;
        let id = f
            .service
            .create(create_input(f.provider_id, &["COL"]))
            .await
            .unwrap();

        let result = f
            .service
            .assign_countries(id, vec!["PER".to_string(), "XXX".to_string()])
            .await;

        assert!(matches!(result, Err(ServiceError::CountryNotFound(_))));

        // The failed replace left the original assignment in place
        let dto = f.service.get(id).await.unwrap();
        assert_eq!(dto.country_codes, ["COL"]);
    }

    #[tokio::test]
    async fn test_assign_countries_clears_when_given_empty_set() {
        let f = fixture().await;
        let id = f
            .service
            .create(create_input(f.provider_id, &["COL"]))
            .await
            .unwrap();

        f.service.assign_countries(id, vec![]).await.unwrap();

        let dto = f.service.get(id).await.unwrap();
        assert!(dto.country_codes.is_empty());
    }

    #[tokio::test]
    async fn test_list_provider_filter_takes_precedence_over_country() {
        let f = fixture().await;
        f.service
            .create(create_input(f.provider_id, &["COL"]))
            .await
            .unwrap();

        // Both filters set: provider filter wins, so the unknown country
        // filter is ignored
        let page = f
            .service
            .list(ServiceFilter {
                provider_id: Some(f.provider_id),
                country_code: Some("XXX".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(page.total_count, 1);
    }

    #[tokio::test]
    async fn test_list_filters_by_country() {
        let f = fixture().await;
        f.service
            .create(create_input(f.provider_id, &["COL"]))
            .await
            .unwrap();
        f.service
            .create(create_input(f.provider_id, &["PER"]))
            .await
            .unwrap();

        let page = f
            .service
            .list(ServiceFilter {
                country_code: Some("col".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].country_codes, ["COL"]);
    }

    #[tokio::test]
    async fn test_list_search_and_pagination() {
        let f = fixture().await;
        for i in 0..5 {
            let mut input = create_input(f.provider_id, &[]);
            input.name = format!("Cloud {}", i);
            f.service.create(input).await.unwrap();
        }
        let mut input = create_input(f.provider_id, &[]);
        input.name = "Consulting".to_string();
        f.service.create(input).await.unwrap();

        let page = f
            .service
            .list(ServiceFilter {
                search_term: Some("cloud".to_string()),
                page_number: Some(2),
                page_size: Some(3),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(page.total_count, 5);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 2);
        assert!(page.has_previous_page);
        assert!(!page.has_next_page);
    }

    #[tokio::test]
    async fn test_update_id_mismatch() {
        let f = fixture().await;
        let result = f
            .service
            .update(
                Uuid::new_v4(),
                UpdateService {
                    id: Uuid::new_v4(),
                    name: "Cloud".to_string(),
                    hourly_rate: 1.0,
                    currency: None,
                    description: None,
                },
            )
            .await;

        assert!(matches!(result, Err(ServiceError::IdMismatch)));
    }

    #[tokio::test]
    async fn test_delete_missing_service_is_not_found() {
        let f = fixture().await;
        assert!(matches!(
            f.service.delete(Uuid::new_v4()).await,
            Err(ServiceError::NotFound(_))
        ));
    }
}
