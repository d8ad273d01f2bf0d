use async_trait::async_trait;
use chrono::{Duration, Utc};
use database::BaseRepository;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use crate::{
    entity,
    error::{CountryError, CountryResult},
    models::Country,
    repository::CountryRepository,
};

pub struct PgCountryRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgCountryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl CountryRepository for PgCountryRepository {
    async fn get_all(&self) -> CountryResult<Vec<Country>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Name)
            .all(self.base.db())
            .await
            .map_err(|e| CountryError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn get_by_code(&self, code: &str) -> CountryResult<Option<Country>> {
        let model = self
            .base
            .find_by_id(code.to_uppercase())
            .await
            .map_err(|e| CountryError::Internal(format!("Database error: {}", e)))?;

        Ok(model.map(|m| m.into()))
    }

    async fn exists(&self, code: &str) -> CountryResult<bool> {
        Ok(self.get_by_code(code).await?.is_some())
    }

    async fn upsert(&self, country: Country) -> CountryResult<Country> {
        let active_model: entity::ActiveModel = country.into();

        let model = entity::Entity::insert(active_model)
            .on_conflict(
                OnConflict::column(entity::Column::Code)
                    .update_columns([entity::Column::Name, entity::Column::LastSync])
                    .to_owned(),
            )
            .exec_with_returning(self.base.db())
            .await
            .map_err(|e| CountryError::Internal(format!("Database error: {}", e)))?;

        Ok(model.into())
    }

    async fn get_outdated(&self, hours: i64) -> CountryResult<Vec<Country>> {
        let cutoff = Utc::now() - Duration::hours(hours);

        let models = entity::Entity::find()
            .filter(entity::Column::LastSync.lt(cutoff))
            .all(self.base.db())
            .await
            .map_err(|e| CountryError::Internal(format!("Database error: {}", e)))?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }
}
