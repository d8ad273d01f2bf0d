//! Domain events emitted by Service operations.
//!
//! Events are returned as explicit side-outputs of the aggregate methods
//! and logged by the service layer; there is no dispatcher.

use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub enum ServiceEvent {
    Created {
        service_id: Uuid,
        provider_id: Uuid,
        name: String,
    },
    CountryAssigned {
        service_id: Uuid,
        country_code: String,
    },
    ProviderChanged {
        service_id: Uuid,
        old_provider_id: Uuid,
        new_provider_id: Uuid,
    },
}

impl ServiceEvent {
    /// Short event name for structured logging.
    pub fn name(&self) -> &'static str {
        match self {
            ServiceEvent::Created { .. } => "ServiceCreated",
            ServiceEvent::CountryAssigned { .. } => "ServiceCountryAssigned",
            ServiceEvent::ProviderChanged { .. } => "ServiceProviderChanged",
        }
    }
}
