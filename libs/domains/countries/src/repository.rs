use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::CountryResult;
use crate::models::Country;

/// Repository trait for Country persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CountryRepository: Send + Sync {
    /// List all countries ordered by name
    async fn get_all(&self) -> CountryResult<Vec<Country>>;

    /// Get a country by its alpha-3 code
    async fn get_by_code(&self, code: &str) -> CountryResult<Option<Country>>;

    /// Check whether a country code exists
    async fn exists(&self, code: &str) -> CountryResult<bool>;

    /// Insert or update a country keyed by its code
    async fn upsert(&self, country: Country) -> CountryResult<Country>;

    /// Countries whose last sync is older than the given number of hours
    async fn get_outdated(&self, hours: i64) -> CountryResult<Vec<Country>>;
}

/// In-memory implementation of CountryRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCountryRepository {
    countries: Arc<RwLock<HashMap<String, Country>>>,
}

impl InMemoryCountryRepository {
    pub fn new() -> Self {
        Self {
            countries: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl CountryRepository for InMemoryCountryRepository {
    async fn get_all(&self) -> CountryResult<Vec<Country>> {
        let countries = self.countries.read().await;
        let mut result: Vec<Country> = countries.values().cloned().collect();
        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }

    async fn get_by_code(&self, code: &str) -> CountryResult<Option<Country>> {
        let countries = self.countries.read().await;
        Ok(countries.get(&code.to_uppercase()).cloned())
    }

    async fn exists(&self, code: &str) -> CountryResult<bool> {
        let countries = self.countries.read().await;
        Ok(countries.contains_key(&code.to_uppercase()))
    }

    async fn upsert(&self, country: Country) -> CountryResult<Country> {
        let mut countries = self.countries.write().await;
        countries.insert(country.code.clone(), country.clone());
        Ok(country)
    }

    async fn get_outdated(&self, hours: i64) -> CountryResult<Vec<Country>> {
        let cutoff = Utc::now() - Duration::hours(hours);
        let countries = self.countries.read().await;
        Ok(countries
            .values()
            .filter(|c| c.last_sync < cutoff)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_and_get() {
        let repo = InMemoryCountryRepository::new();

        let country = Country::new("COL", "Colombia").unwrap();
        repo.upsert(country).await.unwrap();

        let fetched = repo.get_by_code("COL").await.unwrap();
        assert_eq!(fetched.unwrap().name, "Colombia");
        assert!(repo.exists("COL").await.unwrap());
        assert!(!repo.exists("PER").await.unwrap());
    }

    #[tokio::test]
    async fn test_get_by_code_is_case_insensitive() {
        let repo = InMemoryCountryRepository::new();
        repo.upsert(Country::new("COL", "Colombia").unwrap())
            .await
            .unwrap();

        assert!(repo.get_by_code("col").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing() {
        let repo = InMemoryCountryRepository::new();
        repo.upsert(Country::new("COL", "Colombia").unwrap())
            .await
            .unwrap();
        repo.upsert(Country::new("COL", "Republic of Colombia").unwrap())
            .await
            .unwrap();

        let all = repo.get_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Republic of Colombia");
    }

    #[tokio::test]
    async fn test_get_all_sorted_by_name() {
        let repo = InMemoryCountryRepository::new();
        repo.upsert(Country::new("PER", "Peru").unwrap())
            .await
            .unwrap();
        repo.upsert(Country::new("COL", "Colombia").unwrap())
            .await
            .unwrap();

        let all = repo.get_all().await.unwrap();
        assert_eq!(all[0].code, "COL");
        assert_eq!(all[1].code, "PER");
    }

    #[tokio::test]
    async fn test_get_outdated_filters_fresh_rows() {
        let repo = InMemoryCountryRepository::new();
        let mut stale = Country::new("COL", "Colombia").unwrap();
        stale.last_sync = Utc::now() - Duration::days(60);
        repo.upsert(stale).await.unwrap();
        repo.upsert(Country::new("PER", "Peru").unwrap())
            .await
            .unwrap();

        let outdated = repo.get_outdated(30 * 24).await.unwrap();
        assert_eq!(outdated.len(), 1);
        assert_eq!(outdated[0].code, "COL");
    }
}
