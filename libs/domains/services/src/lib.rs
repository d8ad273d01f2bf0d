//! Services Domain
//!
//! Services offered by providers, priced with an hourly [`Money`] rate and
//! available in a set of countries. The Service aggregate owns its country
//! assignments; the provider and country references are validated against
//! their own domains before any mutation is persisted.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐      ┌──────────────────────────────┐
//! │   Service   │ ───► │ Provider / Country repository │
//! └──────┬──────┘      └──────────────────────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + implementations)
//! └─────────────┘
//! ```

pub mod entity;
pub mod error;
pub mod events;
pub mod handlers;
pub mod models;
pub mod money;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ServiceError, ServiceResult};
pub use events::ServiceEvent;
pub use models::{
    CreateService, Service, ServiceDto, ServiceFilter, UpdateService,
};
pub use money::Money;
pub use postgres::PgServiceRepository;
pub use repository::{InMemoryServiceRepository, ServiceRepository};
pub use service::ServiceService;
