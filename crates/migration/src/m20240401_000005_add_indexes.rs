use sea_orm_migration::prelude::*;

use crate::m20240401_000001_create_company::Company;
use crate::m20240401_000002_create_service::Service;
use crate::m20240401_000003_create_project::Project;
use crate::m20240401_000004_create_employee::Employee;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Company: name lookups
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_company_name")
                    .table(Company::Table)
                    .col(Company::CompanyName)
                    .to_owned(),
            )
            .await?;

        // Children: scoped listing by company_id
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_service_company")
                    .table(Service::Table)
                    .col(Service::CompanyId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_project_company")
                    .table(Project::Table)
                    .col(Project::CompanyId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_employee_company")
                    .table(Employee::Table)
                    .col(Employee::CompanyId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_employee_company").table(Employee::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_project_company").table(Project::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_service_company").table(Service::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_company_name").table(Company::Table).to_owned())
            .await
    }
}
