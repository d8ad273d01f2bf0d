use async_trait::async_trait;
use domain_providers::{ProviderError, ProviderResult, ServiceLink};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::models::Service;

/// Repository trait for Service persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// Persist a new service with its country assignments
    async fn insert(&self, service: Service) -> ServiceResult<Service>;

    /// Get a service by ID (countries included)
    async fn get_by_id(&self, id: Uuid) -> ServiceResult<Option<Service>>;

    /// All services, newest first
    async fn get_all(&self) -> ServiceResult<Vec<Service>>;

    /// Services belonging to a provider
    async fn get_by_provider(&self, provider_id: Uuid) -> ServiceResult<Vec<Service>>;

    /// Services offered in a country
    async fn get_by_country(&self, country_code: &str) -> ServiceResult<Vec<Service>>;

    /// Persist changes to an existing service; the stored country set is
    /// replaced to match the aggregate
    async fn update(&self, service: Service) -> ServiceResult<Service>;

    /// Delete a service by ID
    async fn delete(&self, id: Uuid) -> ServiceResult<bool>;

    /// Number of services referencing a provider
    async fn count_by_provider(&self, provider_id: Uuid) -> ServiceResult<u64>;
}

/// In-memory implementation of ServiceRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryServiceRepository {
    services: Arc<RwLock<HashMap<Uuid, Service>>>,
}

impl InMemoryServiceRepository {
    pub fn new() -> Self {
        Self {
            services: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn sorted_newest_first(mut services: Vec<Service>) -> Vec<Service> {
        services.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        services
    }
}

#[async_trait]
impl ServiceRepository for InMemoryServiceRepository {
    async fn insert(&self, service: Service) -> ServiceResult<Service> {
        let mut services = self.services.write().await;
        services.insert(service.id, service.clone());

        tracing::info!(service_id = %service.id, "Created service");
        Ok(service)
    }

    async fn get_by_id(&self, id: Uuid) -> ServiceResult<Option<Service>> {
        let services = self.services.read().await;
        Ok(services.get(&id).cloned())
    }

    async fn get_all(&self) -> ServiceResult<Vec<Service>> {
        let services = self.services.read().await;
        Ok(Self::sorted_newest_first(
            services.values().cloned().collect(),
        ))
    }

    async fn get_by_provider(&self, provider_id: Uuid) -> ServiceResult<Vec<Service>> {
        let services = self.services.read().await;
        Ok(Self::sorted_newest_first(
            services
                .values()
                .filter(|s| s.provider_id == provider_id)
                .cloned()
                .collect(),
        ))
    }

    async fn get_by_country(&self, country_code: &str) -> ServiceResult<Vec<Service>> {
        let code = country_code.to_uppercase();
        let services = self.services.read().await;
        Ok(Self::sorted_newest_first(
            services
                .values()
                .filter(|s| s.countries.contains(&code))
                .cloned()
                .collect(),
        ))
    }

    async fn update(&self, service: Service) -> ServiceResult<Service> {
        let mut services = self.services.write().await;

        if !services.contains_key(&service.id) {
            return Err(ServiceError::NotFound(service.id));
        }

        services.insert(service.id, service.clone());

        tracing::info!(service_id = %service.id, "Updated service");
        Ok(service)
    }

    async fn delete(&self, id: Uuid) -> ServiceResult<bool> {
        let mut services = self.services.write().await;

        if services.remove(&id).is_some() {
            tracing::info!(service_id = %id, "Deleted service");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn count_by_provider(&self, provider_id: Uuid) -> ServiceResult<u64> {
        let services = self.services.read().await;
        Ok(services
            .values()
            .filter(|s| s.provider_id == provider_id)
            .count() as u64)
    }
}

/// The providers domain asks "does this provider still have services?"
/// through this link when guarding deletions.
#[async_trait]
impl ServiceLink for InMemoryServiceRepository {
    async fn provider_has_services(&self, provider_id: Uuid) -> ProviderResult<bool> {
        let count = self
            .count_by_provider(provider_id)
            .await
            .map_err(|e| ProviderError::Internal(e.to_string()))?;
        Ok(count > 0)
    }
}
