//! Create `os_construction_services` table with FK to the company table.
//!
//! Deleting a company removes its services (ON DELETE CASCADE).
use sea_orm_migration::{prelude::*, schema::*};

use crate::m20240401_000001_create_company::Company;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Service::Table)
                    .if_not_exists()
                    .col(uuid(Service::Id).primary_key())
                    .col(uuid(Service::CompanyId).not_null())
                    .col(string_len(Service::ServiceName, 255).not_null())
                    .col(ColumnDef::new(Service::Description).text().null())
                    .col(boolean(Service::IsFree).not_null().default(true))
                    .col(ColumnDef::new(Service::EligibilityCriteria).text().null())
                    .col(timestamp_with_time_zone(Service::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Service::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_company")
                            .from(Service::Table, Service::CompanyId)
                            .to(Company::Table, Company::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Service::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Service {
    #[sea_orm(iden = "os_construction_services")]
    Table,
    Id,
    CompanyId,
    ServiceName,
    Description,
    IsFree,
    EligibilityCriteria,
    CreatedAt,
    UpdatedAt,
}
