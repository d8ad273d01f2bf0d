//! Countries Domain
//!
//! Reference table of countries where services can be offered. Rows are
//! upserted from the REST Countries API, never created through user
//! commands.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (list, get, sync)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐      ┌─────────────┐
//! │   Service   │ ───► │   Gateway   │  ← REST Countries client
//! └──────┬──────┘      └─────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + implementations)
//! └─────────────┘
//! ```

pub mod client;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use client::{CountryGateway, CountryRecord, RestCountriesClient};
pub use error::{CountryError, CountryResult};
pub use models::{Country, SyncOutdatedParams, SyncResponse};
pub use postgres::PgCountryRepository;
pub use repository::{CountryRepository, InMemoryCountryRepository};
pub use service::CountryService;
