//! Create `os_construction_employees` table with FK to the company table.
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
                    .table(Employee::Table)
                    .if_not_exists()
                    .col(uuid(Employee::Id).primary_key())
                    .col(uuid(Employee::CompanyId).not_null())
                    .col(string_len(Employee::FullName, 255).not_null())
                    .col(ColumnDef::new(Employee::Position).string_len(100).null())
                    .col(ColumnDef::new(Employee::Email).string_len(255).null())
                    .col(ColumnDef::new(Employee::Phone).string_len(50).null())
                    .col(ColumnDef::new(Employee::Specialization).string_len(100).null())
                    .col(ColumnDef::new(Employee::JoinDate).date().null())
                    .col(timestamp_with_time_zone(Employee::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Employee::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_company")
                            .from(Employee::Table, Employee::CompanyId)
                            .to(Company::Table, Company::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Employee::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Employee {
    #[sea_orm(iden = "os_construction_employees")]
    Table,
    Id,
    CompanyId,
    FullName,
    Position,
    Email,
    Phone,
    Specialization,
    JoinDate,
    CreatedAt,
    UpdatedAt,
}
