//! Create `os_construction_projects` table with FK to the company table.
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
                    .table(Project::Table)
                    .if_not_exists()
                    .col(uuid(Project::Id).primary_key())
                    .col(uuid(Project::CompanyId).not_null())
                    .col(string_len(Project::ProjectName, 255).not_null())
                    .col(ColumnDef::new(Project::Location).text().null())
                    .col(ColumnDef::new(Project::StartDate).date().null())
                    .col(ColumnDef::new(Project::EndDate).date().null())
                    .col(string_len(Project::Status, 50).not_null().default("planned"))
                    .col(ColumnDef::new(Project::Description).text().null())
                    .col(ColumnDef::new(Project::BeneficiaryInfo).text().null())
                    .col(timestamp_with_time_zone(Project::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Project::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_company")
                            .from(Project::Table, Project::CompanyId)
                            .to(Company::Table, Company::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Project::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Project {
    #[sea_orm(iden = "os_construction_projects")]
    Table,
    Id,
    CompanyId,
    ProjectName,
    Location,
    StartDate,
    EndDate,
    Status,
    Description,
    BeneficiaryInfo,
    CreatedAt,
    UpdatedAt,
}
