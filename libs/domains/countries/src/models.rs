use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{CountryError, CountryResult};

/// Country reference entity (ISO 3166-1 alpha-3).
///
/// Synced from the external reference API; `last_sync` records when the
/// row was last refreshed.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    /// ISO 3166-1 alpha-3 code, normalized upper-case
    pub code: String,
    pub name: String,
    pub last_sync: DateTime<Utc>,
}

impl Country {
    /// Validates and normalizes a country record.
    ///
    /// The code must be exactly 3 characters after trimming and is stored
    /// upper-cased.
    pub fn new(code: &str, name: &str) -> CountryResult<Self> {
        let code = code.trim();
        if code.is_empty() {
            return Err(CountryError::EmptyCode);
        }
        if name.trim().is_empty() {
            return Err(CountryError::EmptyName);
        }
        if code.chars().count() != 3 {
            return Err(CountryError::InvalidCode(code.to_string()));
        }

        Ok(Self {
            code: code.to_uppercase(),
            name: name.trim().to_string(),
            last_sync: Utc::now(),
        })
    }

    /// Replaces the name from a fresh API record and stamps the sync time.
    pub fn update_name(&mut self, name: &str) -> CountryResult<()> {
        if name.trim().is_empty() {
            return Err(CountryError::EmptyName);
        }
        self.name = name.trim().to_string();
        self.last_sync = Utc::now();
        Ok(())
    }

    /// Stamps the sync time without changing the record.
    pub fn touch_sync(&mut self) {
        self.last_sync = Utc::now();
    }
}

/// Query parameters for the outdated-countries sync endpoint.
#[derive(Debug, Clone, Copy, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncOutdatedParams {
    /// Re-sync countries whose last sync is older than this many days (default 30)
    pub days_old: Option<u32>,
}

impl SyncOutdatedParams {
    pub fn days_old(&self) -> u32 {
        self.days_old.unwrap_or(30)
    }
}

/// Result of a sync run.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    pub synced_count: u64,
}
