use async_trait::async_trait;
use database::BaseRepository;
use domain_providers::{ProviderError, ProviderResult, ServiceLink};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, LoaderTrait, PaginatorTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    entity::{self, service, service_country},
    error::{ServiceError, ServiceResult},
    models::Service,
    repository::ServiceRepository,
};

pub struct PgServiceRepository {
    base: BaseRepository<service::Entity>,
}

impl PgServiceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn db(&self) -> &DatabaseConnection {
        self.base.db()
    }

    fn internal(e: impl std::fmt::Display) -> ServiceError {
        ServiceError::Internal(format!("Database error: {}", e))
    }

    async fn load_countries(
        &self,
        models: Vec<service::Model>,
    ) -> ServiceResult<Vec<Service>> {
        let countries = models
            .load_many(service_country::Entity, self.db())
            .await
            .map_err(Self::internal)?;

        Ok(models
            .into_iter()
            .zip(countries)
            .map(|(model, countries)| entity::to_domain(model, countries))
            .collect())
    }
}

#[async_trait]
impl ServiceRepository for PgServiceRepository {
    async fn insert(&self, service_agg: Service) -> ServiceResult<Service> {
        let (service_model, country_models) = entity::to_active_models(&service_agg);

        // Service row and its country rows commit together
        let txn = self.db().begin().await.map_err(Self::internal)?;

        service::Entity::insert(service_model)
            .exec(&txn)
            .await
            .map_err(Self::internal)?;

        if !country_models.is_empty() {
            service_country::Entity::insert_many(country_models)
                .exec(&txn)
                .await
                .map_err(Self::internal)?;
        }

        txn.commit().await.map_err(Self::internal)?;

        tracing::info!(service_id = %service_agg.id, "Created service");
        Ok(service_agg)
    }

    async fn get_by_id(&self, id: Uuid) -> ServiceResult<Option<Service>> {
        let model = self.base.find_by_id(id).await.map_err(Self::internal)?;

        match model {
            Some(model) => {
                let countries = service_country::Entity::find()
                    .filter(service_country::Column::ServiceId.eq(model.id))
                    .all(self.db())
                    .await
                    .map_err(Self::internal)?;
                Ok(Some(entity::to_domain(model, countries)))
            }
            None => Ok(None),
        }
    }

    async fn get_all(&self) -> ServiceResult<Vec<Service>> {
        let models = service::Entity::find()
            .order_by_desc(service::Column::CreatedAt)
            .all(self.db())
            .await
            .map_err(Self::internal)?;

        self.load_countries(models).await
    }

    async fn get_by_provider(&self, provider_id: Uuid) -> ServiceResult<Vec<Service>> {
        let models = service::Entity::find()
            .filter(service::Column::ProviderId.eq(provider_id))
            .order_by_desc(service::Column::CreatedAt)
            .all(self.db())
            .await
            .map_err(Self::internal)?;

        self.load_countries(models).await
    }

    async fn get_by_country(&self, country_code: &str) -> ServiceResult<Vec<Service>> {
        let service_ids: Vec<Uuid> = service_country::Entity::find()
            .filter(service_country::Column::CountryCode.eq(country_code.to_uppercase()))
            .all(self.db())
            .await
            .map_err(Self::internal)?
            .into_iter()
            .map(|row| row.service_id)
            .collect();

        if service_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = service::Entity::find()
            .filter(service::Column::Id.is_in(service_ids))
            .order_by_desc(service::Column::CreatedAt)
            .all(self.db())
            .await
            .map_err(Self::internal)?;

        self.load_countries(models).await
    }

    async fn update(&self, service_agg: Service) -> ServiceResult<Service> {
        let (service_model, country_models) = entity::to_active_models(&service_agg);

        // Replace the stored country set atomically with the row update
        let txn = self.db().begin().await.map_err(Self::internal)?;

        service::Entity::update(service_model)
            .exec(&txn)
            .await
            .map_err(Self::internal)?;

        service_country::Entity::delete_many()
            .filter(service_country::Column::ServiceId.eq(service_agg.id))
            .exec(&txn)
            .await
            .map_err(Self::internal)?;

        if !country_models.is_empty() {
            service_country::Entity::insert_many(country_models)
                .exec(&txn)
                .await
                .map_err(Self::internal)?;
        }

        txn.commit().await.map_err(Self::internal)?;

        tracing::info!(service_id = %service_agg.id, "Updated service");
        Ok(service_agg)
    }

    async fn delete(&self, id: Uuid) -> ServiceResult<bool> {
        let rows_affected = self.base.delete_by_id(id).await.map_err(Self::internal)?;

        if rows_affected > 0 {
            tracing::info!(service_id = %id, "Deleted service");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn count_by_provider(&self, provider_id: Uuid) -> ServiceResult<u64> {
        service::Entity::find()
            .filter(service::Column::ProviderId.eq(provider_id))
            .count(self.db())
            .await
            .map_err(Self::internal)
    }
}

/// The providers domain asks "does this provider still have services?"
/// through this link when guarding deletions.
#[async_trait]
impl ServiceLink for PgServiceRepository {
    async fn provider_has_services(&self, provider_id: Uuid) -> ProviderResult<bool> {
        let count = self
            .count_by_provider(provider_id)
            .await
            .map_err(|e| ProviderError::Internal(e.to_string()))?;
        Ok(count > 0)
    }
}
