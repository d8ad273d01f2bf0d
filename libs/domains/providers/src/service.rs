use async_trait::async_trait;
use axum_helpers::PagedResult;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{ProviderError, ProviderResult};
use crate::events::ProviderEvent;
use crate::models::{CreateProvider, Provider, ProviderDto, ProviderFilter, UpdateProvider};
use crate::repository::ProviderRepository;
use crate::values::{Email, Nit};

/// Gateway into the services domain, used for the delete guard.
///
/// Defined here (and implemented by the services domain's repositories) so
/// the provider crate does not depend on the services crate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceLink: Send + Sync {
    /// Whether any service still references the provider
    async fn provider_has_services(&self, provider_id: Uuid) -> ProviderResult<bool>;
}

/// ServiceLink for deployments without the services domain wired in
/// (development tools, isolated tests).
#[derive(Debug, Default, Clone)]
pub struct NoServices;

#[async_trait]
impl ServiceLink for NoServices {
    async fn provider_has_services(&self, _provider_id: Uuid) -> ProviderResult<bool> {
        Ok(false)
    }
}

/// Service layer for Provider business logic
#[derive(Clone)]
pub struct ProviderService<R: ProviderRepository, L: ServiceLink> {
    repository: Arc<R>,
    services: Arc<L>,
}

impl<R: ProviderRepository, L: ServiceLink> ProviderService<R, L> {
    pub fn new(repository: R, services: L) -> Self {
        Self {
            repository: Arc::new(repository),
            services: Arc::new(services),
        }
    }

    fn publish(&self, event: &ProviderEvent) {
        // Informational only; there is no dispatcher
        tracing::info!(event = event.name(), ?event, "Domain event");
    }

    /// List providers with filters and pagination
    pub async fn list(&self, filter: ProviderFilter) -> ProviderResult<PagedResult<ProviderDto>> {
        let page = filter.pagination();
        let (providers, total) = self.repository.list(filter).await?;

        let items = providers.into_iter().map(ProviderDto::from).collect();
        Ok(PagedResult::new(
            items,
            total,
            page.page_number(),
            page.page_size(),
        ))
    }

    /// Get a provider by ID
    pub async fn get(&self, id: Uuid) -> ProviderResult<ProviderDto> {
        let provider = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ProviderError::NotFound(id))?;

        Ok(provider.into())
    }

    /// Get a provider by NIT
    pub async fn get_by_nit(&self, nit: &str) -> ProviderResult<ProviderDto> {
        let provider = self
            .repository
            .get_by_nit(nit)
            .await?
            .ok_or_else(|| ProviderError::NotFoundByNit(nit.to_string()))?;

        Ok(provider.into())
    }

    /// Create a new provider.
    ///
    /// The NIT is pre-checked against the repository; the unique index
    /// backs this up under concurrent creates.
    pub async fn create(&self, input: CreateProvider) -> ProviderResult<Uuid> {
        if self.repository.exists_by_nit(&input.nit).await? {
            return Err(ProviderError::DuplicateNit(input.nit));
        }

        let nit = Nit::new(&input.nit)?;
        let email = Email::new(&input.email)?;
        let (mut provider, created) = Provider::create(nit, &input.name, email)?;
        self.publish(&created);

        if let Some(fields) = input.custom_fields {
            for field in fields {
                if let Some(event) =
                    provider.add_custom_field(&field.key, &field.value, &field.field_type)?
                {
                    self.publish(&event);
                }
            }
        }

        let provider = self.repository.insert(provider).await?;
        Ok(provider.id)
    }

    /// Update a provider's name and email
    pub async fn update(&self, id: Uuid, input: UpdateProvider) -> ProviderResult<()> {
        if id != input.id {
            return Err(ProviderError::IdMismatch);
        }

        let mut provider = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ProviderError::NotFound(id))?;

        let email = Email::new(&input.email)?;
        provider.update(&input.name, email)?;

        self.repository.update(provider).await?;
        Ok(())
    }

    /// Flip the provider's active flag
    pub async fn toggle_status(&self, id: Uuid) -> ProviderResult<()> {
        let mut provider = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ProviderError::NotFound(id))?;

        if provider.is_active {
            let event = provider.deactivate();
            self.publish(&event);
        } else {
            provider.activate();
        }

        self.repository.update(provider).await?;
        Ok(())
    }

    /// Delete a provider.
    ///
    /// Blocked (never cascaded) while services reference the provider.
    pub async fn delete(&self, id: Uuid) -> ProviderResult<()> {
        let provider = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ProviderError::NotFound(id))?;

        if self.services.provider_has_services(provider.id).await? {
            return Err(ProviderError::HasServices(provider.id));
        }

        let deleted = self.repository.delete(id).await?;
        if !deleted {
            return Err(ProviderError::NotFound(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CustomFieldDto;
    use crate::repository::MockProviderRepository;
    use mockall::predicate::eq;

    fn sample_provider() -> Provider {
        let (provider, _) = Provider::create(
            Nit::new("900123456").unwrap(),
            "Tekus SAS",
            Email::new("info@tekus.com").unwrap(),
        )
        .unwrap();
        provider
    }

    fn create_input() -> CreateProvider {
        CreateProvider {
            nit: "900123456".to_string(),
            name: "Tekus SAS".to_string(),
            email: "info@tekus.com".to_string(),
            custom_fields: None,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_nit() {
        let mut repo = MockProviderRepository::new();
        repo.expect_exists_by_nit()
            .with(eq("900123456"))
            .returning(|_| Ok(true));
        repo.expect_insert().never();

        let service = ProviderService::new(repo, MockServiceLink::new());
        let result = service.create(create_input()).await;

        assert!(matches!(result, Err(ProviderError::DuplicateNit(nit)) if nit == "900123456"));
    }

    #[tokio::test]
    async fn test_create_persists_custom_fields_through_aggregate() {
        let mut repo = MockProviderRepository::new();
        repo.expect_exists_by_nit().returning(|_| Ok(false));
        repo.expect_insert()
            .withf(|p| {
                p.custom_fields.len() == 1
                    && p.custom_fields[0].field_name == "country"
                    && p.custom_fields[0].field_value == "Peru"
            })
            .returning(|p| Ok(p));

        let service = ProviderService::new(repo, MockServiceLink::new());
        let mut input = create_input();
        // Duplicate keys collapse to the latest value
        input.custom_fields = Some(vec![
            CustomFieldDto {
                key: "country".to_string(),
                value: "Colombia".to_string(),
                field_type: "text".to_string(),
            },
            CustomFieldDto {
                key: "country".to_string(),
                value: "Peru".to_string(),
                field_type: "text".to_string(),
            },
        ]);

        service.create(input).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_email() {
        let mut repo = MockProviderRepository::new();
        repo.expect_exists_by_nit().returning(|_| Ok(false));
        repo.expect_insert().never();

        let service = ProviderService::new(repo, MockServiceLink::new());
        let mut input = create_input();
        input.email = "not-an-email".to_string();

        assert!(matches!(
            service.create(input).await,
            Err(ProviderError::InvalidEmail(_))
        ));
    }

    #[tokio::test]
    async fn test_update_rejects_id_mismatch() {
        let repo = MockProviderRepository::new();
        let service = ProviderService::new(repo, MockServiceLink::new());

        let result = service
            .update(
                Uuid::new_v4(),
                UpdateProvider {
                    id: Uuid::new_v4(),
                    name: "Tekus SAS".to_string(),
                    email: "info@tekus.com".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(ProviderError::IdMismatch)));
    }

    #[tokio::test]
    async fn test_delete_blocked_when_provider_has_services() {
        let provider = sample_provider();
        let id = provider.id;

        let mut repo = MockProviderRepository::new();
        repo.expect_get_by_id()
            .with(eq(id))
            .returning(move |_| Ok(Some(provider.clone())));
        repo.expect_delete().never();

        let mut services = MockServiceLink::new();
        services
            .expect_provider_has_services()
            .with(eq(id))
            .returning(|_| Ok(true));

        let service = ProviderService::new(repo, services);
        let result = service.delete(id).await;

        assert!(matches!(result, Err(ProviderError::HasServices(_))));
    }

    #[tokio::test]
    async fn test_delete_succeeds_without_services() {
        let provider = sample_provider();
        let id = provider.id;

        let mut repo = MockProviderRepository::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(provider.clone())));
        repo.expect_delete().with(eq(id)).returning(|_| Ok(true));

        let mut services = MockServiceLink::new();
        services
            .expect_provider_has_services()
            .returning(|_| Ok(false));

        let service = ProviderService::new(repo, services);
        service.delete(id).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_missing_provider_is_not_found() {
        let mut repo = MockProviderRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let service = ProviderService::new(repo, MockServiceLink::new());
        let result = service.delete(Uuid::new_v4()).await;

        assert!(matches!(result, Err(ProviderError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_toggle_status_deactivates_active_provider() {
        let provider = sample_provider();
        let id = provider.id;

        let mut repo = MockProviderRepository::new();
        repo.expect_get_by_id()
            .returning(move |_| Ok(Some(provider.clone())));
        repo.expect_update()
            .withf(|p| !p.is_active)
            .returning(|p| Ok(p));

        let service = ProviderService::new(repo, MockServiceLink::new());
        service.toggle_status(id).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_wraps_in_paged_result() {
        let mut repo = MockProviderRepository::new();
        repo.expect_list()
            .returning(|_| Ok((vec![sample_provider()], 10)));

        let service = ProviderService::new(repo, MockServiceLink::new());
        let page = service
            .list(ProviderFilter {
                page_number: Some(1),
                page_size: Some(3),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(page.total_count, 10);
        assert_eq!(page.total_pages, 4);
        assert!(page.has_next_page);
        assert!(!page.has_previous_page);
    }
}
