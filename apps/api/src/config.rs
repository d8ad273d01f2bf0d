use axum_helpers::JwtConfig;
use core_config::country_api::CountryApiConfig;
use core_config::server::ServerConfig;
use core_config::{ConfigError, Environment, FromEnv};
use database::postgres::PostgresConfig;

/// Full configuration for the API process, loaded from the environment.
#[derive(Clone)]
pub struct Config {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: PostgresConfig,
    pub jwt: JwtConfig,
    pub country_api: CountryApiConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env()?,
            database: PostgresConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            country_api: CountryApiConfig::from_env()?,
        })
    }
}
