//! Sea-ORM entities for the providers and provider_custom_fields tables.

use crate::models::{CustomField, Provider};
use crate::values::{Email, Nit};
use sea_orm::ActiveValue::Set;

pub mod provider {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "providers")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub nit: String,
        pub name: String,
        pub email: String,
        pub is_active: bool,
        pub created_at: DateTimeWithTimeZone,
        pub updated_at: DateTimeWithTimeZone,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::custom_field::Entity")]
        CustomFields,
    }

    impl Related<super::custom_field::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::CustomFields.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod custom_field {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "provider_custom_fields")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: Uuid,
        pub provider_id: Uuid,
        pub field_name: String,
        pub field_value: String,
        pub field_type: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::provider::Entity",
            from = "Column::ProviderId",
            to = "super::provider::Column::Id"
        )]
        Provider,
    }

    impl Related<super::provider::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Provider.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Rehydrates the aggregate from its rows.
pub fn to_domain(model: provider::Model, fields: Vec<custom_field::Model>) -> Provider {
    Provider {
        id: model.id,
        nit: Nit::from_stored(model.nit),
        name: model.name,
        email: Email::from_stored(model.email),
        is_active: model.is_active,
        custom_fields: fields
            .into_iter()
            .map(|f| CustomField {
                id: f.id,
                field_name: f.field_name,
                field_value: f.field_value,
                field_type: f.field_type,
            })
            .collect(),
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
    }
}

/// Splits the aggregate into its provider row and custom-field rows.
pub fn to_active_models(
    provider: &Provider,
) -> (provider::ActiveModel, Vec<custom_field::ActiveModel>) {
    let provider_model = provider::ActiveModel {
        id: Set(provider.id),
        nit: Set(provider.nit.as_str().to_string()),
        name: Set(provider.name.clone()),
        email: Set(provider.email.as_str().to_string()),
        is_active: Set(provider.is_active),
        created_at: Set(provider.created_at.into()),
        updated_at: Set(provider.updated_at.into()),
    };

    let field_models = provider
        .custom_fields
        .iter()
        .map(|f| custom_field::ActiveModel {
            id: Set(f.id),
            provider_id: Set(provider.id),
            field_name: Set(f.field_name.clone()),
            field_value: Set(f.field_value.clone()),
            field_type: Set(f.field_type.clone()),
        })
        .collect();

    (provider_model, field_models)
}
