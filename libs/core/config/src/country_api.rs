use crate::{env_or_default, ConfigError, FromEnv};

/// Default base URL of the REST Countries reference API.
pub const DEFAULT_COUNTRY_API_BASE_URL: &str = "https://restcountries.com/v3.1";

/// Configuration for the external country reference API
#[derive(Clone, Debug)]
pub struct CountryApiConfig {
    pub base_url: String,
}

impl CountryApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl FromEnv for CountryApiConfig {
    /// COUNTRY_API_BASE_URL overrides the public REST Countries endpoint
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: env_or_default("COUNTRY_API_BASE_URL", DEFAULT_COUNTRY_API_BASE_URL),
        })
    }
}

impl Default for CountryApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_COUNTRY_API_BASE_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_api_config_default_url() {
        temp_env::with_var_unset("COUNTRY_API_BASE_URL", || {
            let config = CountryApiConfig::from_env().unwrap();
            assert_eq!(config.base_url, DEFAULT_COUNTRY_API_BASE_URL);
        });
    }

    #[test]
    fn test_country_api_config_override() {
        temp_env::with_var(
            "COUNTRY_API_BASE_URL",
            Some("http://localhost:9090/v3.1"),
            || {
                let config = CountryApiConfig::from_env().unwrap();
                assert_eq!(config.base_url, "http://localhost:9090/v3.1");
            },
        );
    }
}
