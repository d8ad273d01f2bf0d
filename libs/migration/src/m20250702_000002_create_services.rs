use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250702_000000_create_countries::Countries;
use crate::m20250702_000001_create_providers::Providers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Services::Table)
                    .if_not_exists()
                    .col(pk_uuid(Services::Id))
                    .col(uuid(Services::ProviderId))
                    .col(string_len(Services::Name, 200))
                    // Hourly rate stored as minor units plus currency code.
                    .col(big_integer(Services::HourlyRateAmount))
                    .col(char_len(Services::HourlyRateCurrency, 3))
                    .col(text_null(Services::Description))
                    .col(boolean(Services::IsActive).default(true))
                    .col(
                        timestamp_with_time_zone(Services::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Services::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_services_provider")
                            .from(Services::Table, Services::ProviderId)
                            .to(Providers::Table, Providers::Id)
                            // Provider deletion is blocked while services exist.
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_services_provider_id")
                    .table(Services::Table)
                    .col(Services::ProviderId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ServiceCountries::Table)
                    .if_not_exists()
                    .col(uuid(ServiceCountries::ServiceId))
                    .col(char_len(ServiceCountries::CountryCode, 3))
                    .primary_key(
                        Index::create()
                            .col(ServiceCountries::ServiceId)
                            .col(ServiceCountries::CountryCode),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_countries_service")
                            .from(ServiceCountries::Table, ServiceCountries::ServiceId)
                            .to(Services::Table, Services::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_countries_country")
                            .from(ServiceCountries::Table, ServiceCountries::CountryCode)
                            .to(Countries::Table, Countries::Code),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_service_countries_country")
                    .table(ServiceCountries::Table)
                    .col(ServiceCountries::CountryCode)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ServiceCountries::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Services::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Services {
    Table,
    Id,
    ProviderId,
    Name,
    HourlyRateAmount,
    HourlyRateCurrency,
    Description,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum ServiceCountries {
    Table,
    ServiceId,
    CountryCode,
}
