use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Countries are keyed by their ISO 3166-1 alpha-3 code and refreshed
        // from the external reference API.
        manager
            .create_table(
                Table::create()
                    .table(Countries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Countries::Code)
                            .char_len(3)
                            .not_null()
                            .primary_key(),
                    )
                    .col(string(Countries::Name))
                    .col(
                        timestamp_with_time_zone(Countries::LastSync)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_countries_last_sync")
                    .table(Countries::Table)
                    .col(Countries::LastSync)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Countries::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Countries {
    Table,
    Code,
    Name,
    LastSync,
}
