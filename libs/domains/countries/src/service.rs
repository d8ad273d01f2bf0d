use std::sync::Arc;
use tracing::{info, warn};

use crate::client::CountryGateway;
use crate::error::{CountryError, CountryResult};
use crate::models::Country;
use crate::repository::CountryRepository;

/// Service layer for country queries and reference-data sync
#[derive(Clone)]
pub struct CountryService<R: CountryRepository, G: CountryGateway> {
    repository: Arc<R>,
    gateway: Arc<G>,
}

impl<R: CountryRepository, G: CountryGateway> CountryService<R, G> {
    pub fn new(repository: R, gateway: G) -> Self {
        Self {
            repository: Arc::new(repository),
            gateway: Arc::new(gateway),
        }
    }

    /// List all known countries
    pub async fn list(&self) -> CountryResult<Vec<Country>> {
        self.repository.get_all().await
    }

    /// Get a country by alpha-3 code
    pub async fn get(&self, code: &str) -> CountryResult<Country> {
        self.repository
            .get_by_code(code)
            .await?
            .ok_or_else(|| CountryError::NotFound(code.to_uppercase()))
    }

    /// Full sync: upsert every valid record the reference API returns.
    ///
    /// Records missing a code or name are skipped, matching the behavior
    /// of the reference API's sparse entries.
    pub async fn sync_all(&self) -> CountryResult<u64> {
        info!("Starting full country synchronization");

        let records = self.gateway.fetch_all().await?;
        let mut synced = 0u64;

        for record in records {
            let Some(name) = record.common_name() else {
                continue;
            };
            if record.cca3.is_empty() {
                continue;
            }

            match Country::new(&record.cca3, name) {
                Ok(country) => {
                    self.repository.upsert(country).await?;
                    synced += 1;
                }
                Err(e) => {
                    warn!(code = %record.cca3, "Skipping invalid country record: {}", e);
                }
            }
        }

        info!("Successfully synchronized {} countries", synced);
        Ok(synced)
    }

    /// Re-sync countries whose data is older than `days_old` days.
    ///
    /// Each outdated row is refreshed individually from the API; codes the
    /// API no longer knows are left untouched.
    pub async fn sync_outdated(&self, days_old: u32) -> CountryResult<u64> {
        info!(
            "Starting outdated countries synchronization (older than {} days)",
            days_old
        );

        let hours = i64::from(days_old) * 24;
        let outdated = self.repository.get_outdated(hours).await?;

        if outdated.is_empty() {
            info!("No outdated countries found");
            return Ok(0);
        }

        let mut synced = 0u64;

        for mut country in outdated {
            match self.gateway.fetch_by_code(&country.code).await? {
                Some(record) => {
                    let Some(name) = record.common_name() else {
                        warn!(code = %country.code, "API record has no name, skipping");
                        continue;
                    };
                    country.update_name(name)?;
                    self.repository.upsert(country).await?;
                    synced += 1;
                }
                None => {
                    warn!(code = %country.code, "Country not found in reference API, skipping");
                }
            }
        }

        info!("Successfully synchronized {} outdated countries", synced);
        Ok(synced)
    }
}
