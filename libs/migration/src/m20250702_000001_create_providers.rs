use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Providers::Table)
                    .if_not_exists()
                    .col(pk_uuid(Providers::Id))
                    .col(string_len(Providers::Nit, 20))
                    .col(string_len(Providers::Name, 200))
                    .col(string(Providers::Email))
                    .col(boolean(Providers::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(Providers::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Providers::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // The NIT pre-check in the application races under concurrent
        // creates; this unique index is the backstop.
        manager
            .create_index(
                Index::create()
                    .name("idx_providers_nit")
                    .table(Providers::Table)
                    .col(Providers::Nit)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_providers_created_at")
                    .table(Providers::Table)
                    .col(Providers::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProviderCustomFields::Table)
                    .if_not_exists()
                    .col(pk_uuid(ProviderCustomFields::Id))
                    .col(uuid(ProviderCustomFields::ProviderId))
                    .col(string(ProviderCustomFields::FieldName))
                    .col(string(ProviderCustomFields::FieldValue))
                    .col(string(ProviderCustomFields::FieldType))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_custom_fields_provider")
                            .from(ProviderCustomFields::Table, ProviderCustomFields::ProviderId)
                            .to(Providers::Table, Providers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_custom_fields_provider_name")
                    .table(ProviderCustomFields::Table)
                    .col(ProviderCustomFields::ProviderId)
                    .col(ProviderCustomFields::FieldName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProviderCustomFields::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Providers::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Providers {
    Table,
    Id,
    Nit,
    Name,
    Email,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum ProviderCustomFields {
    Table,
    Id,
    ProviderId,
    FieldName,
    FieldValue,
    FieldType,
}
