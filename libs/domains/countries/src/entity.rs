use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the countries table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "countries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,
    pub name: String,
    pub last_sync: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::Country {
    fn from(model: Model) -> Self {
        Self {
            code: model.code,
            name: model.name,
            last_sync: model.last_sync.into(),
        }
    }
}

impl From<crate::models::Country> for ActiveModel {
    fn from(country: crate::models::Country) -> Self {
        ActiveModel {
            code: Set(country.code),
            name: Set(country.name),
            last_sync: Set(country.last_sync.into()),
        }
    }
}
