use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, LoaderTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    entity::{self, custom_field, provider},
    error::{ProviderError, ProviderResult},
    models::{Provider, ProviderFilter},
    repository::ProviderRepository,
};

pub struct PgProviderRepository {
    base: BaseRepository<provider::Entity>,
}

impl PgProviderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn db(&self) -> &DatabaseConnection {
        self.base.db()
    }

    fn internal(e: impl std::fmt::Display) -> ProviderError {
        ProviderError::Internal(format!("Database error: {}", e))
    }

    async fn load_aggregate(
        &self,
        model: provider::Model,
    ) -> ProviderResult<Provider> {
        let fields = custom_field::Entity::find()
            .filter(custom_field::Column::ProviderId.eq(model.id))
            .all(self.db())
            .await
            .map_err(Self::internal)?;

        Ok(entity::to_domain(model, fields))
    }
}

#[async_trait]
impl ProviderRepository for PgProviderRepository {
    async fn insert(&self, provider_agg: Provider) -> ProviderResult<Provider> {
        let nit = provider_agg.nit.as_str().to_string();
        let (provider_model, field_models) = entity::to_active_models(&provider_agg);

        let txn = self.db().begin().await.map_err(Self::internal)?;

        provider::Entity::insert(provider_model)
            .exec(&txn)
            .await
            .map_err(|e| match e.sql_err() {
                // The unique index on nit backs the application pre-check
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    ProviderError::DuplicateNit(nit.clone())
                }
                _ => Self::internal(e),
            })?;

        if !field_models.is_empty() {
            custom_field::Entity::insert_many(field_models)
                .exec(&txn)
                .await
                .map_err(Self::internal)?;
        }

        txn.commit().await.map_err(Self::internal)?;

        tracing::info!(provider_id = %provider_agg.id, "Created provider");
        Ok(provider_agg)
    }

    async fn get_by_id(&self, id: Uuid) -> ProviderResult<Option<Provider>> {
        let model = self.base.find_by_id(id).await.map_err(Self::internal)?;

        match model {
            Some(model) => Ok(Some(self.load_aggregate(model).await?)),
            None => Ok(None),
        }
    }

    async fn get_by_nit(&self, nit: &str) -> ProviderResult<Option<Provider>> {
        let model = provider::Entity::find()
            .filter(provider::Column::Nit.eq(nit))
            .one(self.db())
            .await
            .map_err(Self::internal)?;

        match model {
            Some(model) => Ok(Some(self.load_aggregate(model).await?)),
            None => Ok(None),
        }
    }

    async fn list(&self, filter: ProviderFilter) -> ProviderResult<(Vec<Provider>, u64)> {
        let mut query = provider::Entity::find();

        if let Some(ref term) = filter.search_term {
            let pattern = format!("%{}%", term);
            query = query.filter(
                Condition::any()
                    .add(Expr::col(provider::Column::Name).ilike(pattern.clone()))
                    .add(Expr::col(provider::Column::Nit).ilike(pattern)),
            );
        }

        if let Some(is_active) = filter.is_active {
            query = query.filter(provider::Column::IsActive.eq(is_active));
        }

        let total = query
            .clone()
            .count(self.db())
            .await
            .map_err(Self::internal)?;

        let page = filter.pagination();
        let models = query
            .order_by_desc(provider::Column::CreatedAt)
            .offset(page.skip())
            .limit(page.page_size())
            .all(self.db())
            .await
            .map_err(Self::internal)?;

        let fields = models
            .load_many(custom_field::Entity, self.db())
            .await
            .map_err(Self::internal)?;

        let providers = models
            .into_iter()
            .zip(fields)
            .map(|(model, fields)| entity::to_domain(model, fields))
            .collect();

        Ok((providers, total))
    }

    async fn update(&self, provider_agg: Provider) -> ProviderResult<Provider> {
        let (provider_model, field_models) = entity::to_active_models(&provider_agg);

        let txn = self.db().begin().await.map_err(Self::internal)?;

        provider::Entity::update(provider_model)
            .exec(&txn)
            .await
            .map_err(Self::internal)?;

        // Replace the stored field set with the aggregate's
        custom_field::Entity::delete_many()
            .filter(custom_field::Column::ProviderId.eq(provider_agg.id))
            .exec(&txn)
            .await
            .map_err(Self::internal)?;

        if !field_models.is_empty() {
            custom_field::Entity::insert_many(field_models)
                .exec(&txn)
                .await
                .map_err(Self::internal)?;
        }

        txn.commit().await.map_err(Self::internal)?;

        tracing::info!(provider_id = %provider_agg.id, "Updated provider");
        Ok(provider_agg)
    }

    async fn delete(&self, id: Uuid) -> ProviderResult<bool> {
        let rows_affected = self.base.delete_by_id(id).await.map_err(Self::internal)?;

        if rows_affected > 0 {
            tracing::info!(provider_id = %id, "Deleted provider");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn exists_by_nit(&self, nit: &str) -> ProviderResult<bool> {
        let count = provider::Entity::find()
            .filter(provider::Column::Nit.eq(nit))
            .count(self.db())
            .await
            .map_err(Self::internal)?;

        Ok(count > 0)
    }
}
