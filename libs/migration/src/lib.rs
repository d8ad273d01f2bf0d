pub use sea_orm_migration::prelude::*;

mod m20250702_000000_create_countries;
mod m20250702_000001_create_providers;
mod m20250702_000002_create_services;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250702_000000_create_countries::Migration),
            Box::new(m20250702_000001_create_providers::Migration),
            Box::new(m20250702_000002_create_services::Migration),
        ]
    }
}
