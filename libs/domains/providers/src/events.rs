//! Domain events emitted by Provider operations.
//!
//! Events are returned as explicit side-outputs of the aggregate methods
//! and logged by the service layer; there is no dispatcher.

use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub enum ProviderEvent {
    Created {
        provider_id: Uuid,
        name: String,
        nit: String,
    },
    CustomFieldAdded {
        provider_id: Uuid,
        field_name: String,
    },
    Deactivated {
        provider_id: Uuid,
    },
}

impl ProviderEvent {
    /// Short event name for structured logging.
    pub fn name(&self) -> &'static str {
        match self {
            ProviderEvent::Created { .. } => "ProviderCreated",
            ProviderEvent::CustomFieldAdded { .. } => "ProviderCustomFieldAdded",
            ProviderEvent::Deactivated { .. } => "ProviderDeactivated",
        }
    }
}
