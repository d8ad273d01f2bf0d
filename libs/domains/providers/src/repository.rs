use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProviderError, ProviderResult};
use crate::models::{Provider, ProviderFilter};

/// Repository trait for Provider persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProviderRepository: Send + Sync {
    /// Persist a new provider (with its custom fields)
    async fn insert(&self, provider: Provider) -> ProviderResult<Provider>;

    /// Get a provider by ID
    async fn get_by_id(&self, id: Uuid) -> ProviderResult<Option<Provider>>;

    /// Get a provider by NIT
    async fn get_by_nit(&self, nit: &str) -> ProviderResult<Option<Provider>>;

    /// List providers matching the filter, returning the page plus the
    /// total count across all pages
    async fn list(&self, filter: ProviderFilter) -> ProviderResult<(Vec<Provider>, u64)>;

    /// Persist changes to an existing provider; the stored custom-field
    /// set is replaced to match the aggregate
    async fn update(&self, provider: Provider) -> ProviderResult<Provider>;

    /// Delete a provider by ID
    async fn delete(&self, id: Uuid) -> ProviderResult<bool>;

    /// Check if a provider with the given NIT exists
    async fn exists_by_nit(&self, nit: &str) -> ProviderResult<bool>;
}

/// In-memory implementation of ProviderRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProviderRepository {
    providers: Arc<RwLock<HashMap<Uuid, Provider>>>,
}

impl InMemoryProviderRepository {
    pub fn new() -> Self {
        Self {
            providers: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ProviderRepository for InMemoryProviderRepository {
    async fn insert(&self, provider: Provider) -> ProviderResult<Provider> {
        let mut providers = self.providers.write().await;

        if providers
            .values()
            .any(|p| p.nit.as_str() == provider.nit.as_str())
        {
            return Err(ProviderError::DuplicateNit(
                provider.nit.as_str().to_string(),
            ));
        }

        providers.insert(provider.id, provider.clone());

        tracing::info!(provider_id = %provider.id, "Created provider");
        Ok(provider)
    }

    async fn get_by_id(&self, id: Uuid) -> ProviderResult<Option<Provider>> {
        let providers = self.providers.read().await;
        Ok(providers.get(&id).cloned())
    }

    async fn get_by_nit(&self, nit: &str) -> ProviderResult<Option<Provider>> {
        let providers = self.providers.read().await;
        Ok(providers
            .values()
            .find(|p| p.nit.as_str() == nit)
            .cloned())
    }

    async fn list(&self, filter: ProviderFilter) -> ProviderResult<(Vec<Provider>, u64)> {
        let providers = self.providers.read().await;

        let search = filter.search_term.as_deref().map(str::to_lowercase);

        let mut result: Vec<Provider> = providers
            .values()
            .filter(|p| {
                if let Some(ref term) = search {
                    let matches = p.name.to_lowercase().contains(term)
                        || p.nit.as_str().to_lowercase().contains(term);
                    if !matches {
                        return false;
                    }
                }
                if let Some(is_active) = filter.is_active {
                    if p.is_active != is_active {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();

        // Newest first
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = result.len() as u64;
        let page = filter.pagination();

        let items: Vec<Provider> = result
            .into_iter()
            .skip(page.skip() as usize)
            .take(page.page_size() as usize)
            .collect();

        Ok((items, total))
    }

    async fn update(&self, provider: Provider) -> ProviderResult<Provider> {
        let mut providers = self.providers.write().await;

        if !providers.contains_key(&provider.id) {
            return Err(ProviderError::NotFound(provider.id));
        }

        providers.insert(provider.id, provider.clone());

        tracing::info!(provider_id = %provider.id, "Updated provider");
        Ok(provider)
    }

    async fn delete(&self, id: Uuid) -> ProviderResult<bool> {
        let mut providers = self.providers.write().await;

        if providers.remove(&id).is_some() {
            tracing::info!(provider_id = %id, "Deleted provider");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn exists_by_nit(&self, nit: &str) -> ProviderResult<bool> {
        let providers = self.providers.read().await;
        Ok(providers.values().any(|p| p.nit.as_str() == nit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::{Email, Nit};

    fn provider(nit: &str, name: &str) -> Provider {
        let (provider, _) = Provider::create(
            Nit::new(nit).unwrap(),
            name,
            Email::new("info@tekus.com").unwrap(),
        )
        .unwrap();
        provider
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = InMemoryProviderRepository::new();
        let created = repo.insert(provider("900123456", "Tekus SAS")).await.unwrap();

        let fetched = repo.get_by_id(created.id).await.unwrap();
        assert_eq!(fetched.unwrap().id, created.id);

        let by_nit = repo.get_by_nit("900123456").await.unwrap();
        assert_eq!(by_nit.unwrap().id, created.id);
    }

    #[tokio::test]
    async fn test_insert_duplicate_nit_fails() {
        let repo = InMemoryProviderRepository::new();
        repo.insert(provider("900123456", "Tekus SAS")).await.unwrap();

        let result = repo.insert(provider("900123456", "Other SAS")).await;
        assert!(matches!(result, Err(ProviderError::DuplicateNit(_))));
    }

    #[tokio::test]
    async fn test_list_with_search_term() {
        let repo = InMemoryProviderRepository::new();
        repo.insert(provider("900123456", "Tekus SAS")).await.unwrap();
        repo.insert(provider("800999999", "Acme Corp")).await.unwrap();

        let (items, total) = repo
            .list(ProviderFilter {
                search_term: Some("tekus".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(total, 1);
        assert_eq!(items[0].name, "Tekus SAS");

        // NIT is searchable too
        let (items, _) = repo
            .list(ProviderFilter {
                search_term: Some("800999".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(items[0].name, "Acme Corp");
    }

    #[tokio::test]
    async fn test_list_filters_by_active() {
        let repo = InMemoryProviderRepository::new();
        let mut inactive = provider("900123456", "Tekus SAS");
        inactive.deactivate();
        repo.insert(inactive).await.unwrap();
        repo.insert(provider("800999999", "Acme Corp")).await.unwrap();

        let (items, total) = repo
            .list(ProviderFilter {
                is_active: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(total, 1);
        assert_eq!(items[0].name, "Acme Corp");
    }

    #[tokio::test]
    async fn test_list_paginates() {
        let repo = InMemoryProviderRepository::new();
        for i in 0..5 {
            repo.insert(provider(&format!("90000000{}", i), &format!("Provider {}", i)))
                .await
                .unwrap();
        }

        let (items, total) = repo
            .list(ProviderFilter {
                page_number: Some(2),
                page_size: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(total, 5);
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn test_update_missing_provider_fails() {
        let repo = InMemoryProviderRepository::new();
        let result = repo.update(provider("900123456", "Tekus SAS")).await;
        assert!(matches!(result, Err(ProviderError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryProviderRepository::new();
        let created = repo.insert(provider("900123456", "Tekus SAS")).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
    }
}
