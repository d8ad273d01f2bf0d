//! REST Countries API client.
//!
//! Fetches the country reference data that backs the sync operations.

use async_trait::async_trait;
use core_config::country_api::CountryApiConfig;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{CountryError, CountryResult};

/// Raw country record from the REST Countries API
#[derive(Debug, Clone, Deserialize)]
pub struct CountryRecord {
    /// ISO 3166-1 alpha-3 code
    #[serde(default)]
    pub cca3: String,
    #[serde(default)]
    pub name: Option<CountryNames>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountryNames {
    pub common: String,
}

impl CountryRecord {
    /// The display name, when the API returned one.
    pub fn common_name(&self) -> Option<&str> {
        self.name.as_ref().map(|n| n.common.as_str())
    }
}

/// Gateway to the external country reference API.
///
/// Abstracted behind a trait so sync logic is testable without network
/// access.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CountryGateway: Send + Sync {
    /// Fetch all countries
    async fn fetch_all(&self) -> CountryResult<Vec<CountryRecord>>;

    /// Fetch one country by alpha-3 code; `None` when the API has no match
    async fn fetch_by_code(&self, code: &str) -> CountryResult<Option<CountryRecord>>;
}

/// reqwest-backed client for <https://restcountries.com>
pub struct RestCountriesClient {
    client: Client,
    base_url: String,
}

impl RestCountriesClient {
    pub fn new(config: CountryApiConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl CountryGateway for RestCountriesClient {
    async fn fetch_all(&self) -> CountryResult<Vec<CountryRecord>> {
        let url = format!("{}/all?fields=name,cca2,cca3", self.base_url);
        info!("Fetching all countries from reference API");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CountryError::Api(e.to_string()))?;

        if !response.status().is_success() {
            return Err(CountryError::Api(format!(
                "Country API returned {}",
                response.status()
            )));
        }

        let countries: Vec<CountryRecord> = response
            .json()
            .await
            .map_err(|e| CountryError::Api(e.to_string()))?;

        info!("Fetched {} countries from reference API", countries.len());
        Ok(countries)
    }

    async fn fetch_by_code(&self, code: &str) -> CountryResult<Option<CountryRecord>> {
        let url = format!("{}/alpha/{}?fields=name,cca2,cca3", self.base_url, code);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CountryError::Api(e.to_string()))?;

        if !response.status().is_success() {
            warn!(
                "Country API returned {} for code {}",
                response.status(),
                code
            );
            return Ok(None);
        }

        // The alpha endpoint answers with a single-element list.
        let countries: Vec<CountryRecord> = response
            .json()
            .await
            .map_err(|e| CountryError::Api(e.to_string()))?;

        Ok(countries.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserializes_api_shape() {
        let json = r#"{ "name": { "common": "Colombia", "official": "Republic of Colombia" }, "cca2": "CO", "cca3": "COL" }"#;
        let record: CountryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.cca3, "COL");
        assert_eq!(record.common_name(), Some("Colombia"));
    }

    #[test]
    fn test_record_tolerates_missing_fields() {
        let record: CountryRecord = serde_json::from_str("{}").unwrap();
        assert!(record.cca3.is_empty());
        assert!(record.common_name().is_none());
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client =
            RestCountriesClient::new(CountryApiConfig::new("http://localhost:9090/v3.1/"));
        assert_eq!(client.base_url, "http://localhost:9090/v3.1");
    }
}
