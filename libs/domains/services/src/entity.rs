//! Sea-ORM entities for the services and service_countries tables.

use crate::models::Service;
use crate::money::Money;
use sea_orm::ActiveValue::Set;

pub mod service {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "services")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub provider_id: Uuid,
        pub name: String,
        pub hourly_rate_amount: i64,
        pub hourly_rate_currency: String,
        #[sea_orm(column_type = "Text", nullable)]
        pub description: Option<String>,
        pub is_active: bool,
        pub created_at: DateTimeWithTimeZone,
        pub updated_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::service_country::Entity")]
        ServiceCountries,
    }

    impl Related<super::service_country::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::ServiceCountries.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod service_country {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "service_countries")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub service_id: Uuid,
        #[sea_orm(primary_key, auto_increment = false)]
        pub country_code: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::service::Entity",
            from = "Column::ServiceId",
            to = "super::service::Column::Id"
        )]
        Service,
    }

    impl Related<super::service::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Service.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Rehydrates the aggregate from its rows.
pub fn to_domain(model: service::Model, countries: Vec<service_country::Model>) -> Service {
    Service {
        id: model.id,
        provider_id: model.provider_id,
        name: model.name,
        hourly_rate: Money::from_minor(model.hourly_rate_amount, model.hourly_rate_currency),
        description: model.description,
        is_active: model.is_active,
        countries: countries.into_iter().map(|c| c.country_code).collect(),
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
    }
}

/// Splits the aggregate into its service row and country rows.
pub fn to_active_models(
    service_agg: &Service,
) -> (service::ActiveModel, Vec<service_country::ActiveModel>) {
    let service_model = service::ActiveModel {
        id: Set(service_agg.id),
        provider_id: Set(service_agg.provider_id),
        name: Set(service_agg.name.clone()),
        hourly_rate_amount: Set(service_agg.hourly_rate.amount_minor()),
        hourly_rate_currency: Set(service_agg.hourly_rate.currency().to_string()),
        description: Set(service_agg.description.clone()),
        is_active: Set(service_agg.is_active),
        created_at: Set(service_agg.created_at.into()),
        updated_at: Set(service_agg.updated_at.into()),
    };

    let country_models = service_agg
        .countries
        .iter()
        .map(|code| service_country::ActiveModel {
            service_id: Set(service_agg.id),
            country_code: Set(code.clone()),
        })
        .collect();

    (service_model, country_models)
}
