//! Providers Domain
//!
//! Service providers identified by their NIT (tax id), carrying a set of
//! named custom fields. The Provider aggregate owns its custom fields;
//! services referencing a provider block its deletion.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Orchestration, cross-aggregate checks
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + implementations)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Aggregate, value objects, DTOs
//! └─────────────┘
//! ```

pub mod entity;
pub mod error;
pub mod events;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod values;

// Re-export commonly used types
pub use error::{ProviderError, ProviderResult, DUPLICATE_NIT, PROVIDER_HAS_SERVICES};
pub use events::ProviderEvent;
pub use models::{
    CreateProvider, CreatedResponse, CustomField, CustomFieldDto, Provider, ProviderDto,
    ProviderFilter, UpdateProvider,
};
pub use postgres::PgProviderRepository;
pub use repository::{InMemoryProviderRepository, ProviderRepository};
pub use service::{NoServices, ProviderService, ServiceLink};
pub use values::{Email, Nit};
