//! Migrator registering the directory tables in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240401_000001_create_company;
mod m20240401_000002_create_service;
mod m20240401_000003_create_project;
mod m20240401_000004_create_employee;
mod m20240401_000005_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240401_000001_create_company::Migration),
            Box::new(m20240401_000002_create_service::Migration),
            Box::new(m20240401_000003_create_project::Migration),
            Box::new(m20240401_000004_create_employee::Migration),
            // Indexes should always be applied last
            Box::new(m20240401_000005_add_indexes::Migration),
        ]
    }
}
