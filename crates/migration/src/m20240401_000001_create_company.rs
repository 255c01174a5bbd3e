//! Create `os_construction` (company) table.
//!
//! Root entity; services, projects and employees reference it.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Company::Table)
                    .if_not_exists()
                    .col(uuid(Company::Id).primary_key())
                    .col(string_len(Company::CompanyName, 255).not_null())
                    .col(ColumnDef::new(Company::CompanyAddress).text().null())
                    .col(ColumnDef::new(Company::CompanyEmail).string_len(255).null())
                    .col(ColumnDef::new(Company::CompanyPhone).string_len(50).null())
                    .col(ColumnDef::new(Company::Website).string_len(255).null())
                    .col(ColumnDef::new(Company::Description).text().null())
                    .col(ColumnDef::new(Company::FoundedYear).integer().null())
                    .col(boolean(Company::IsVerified).not_null().default(false))
                    .col(timestamp_with_time_zone(Company::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Company::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Company::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Company {
    #[sea_orm(iden = "os_construction")]
    Table,
    Id,
    CompanyName,
    CompanyAddress,
    CompanyEmail,
    CompanyPhone,
    Website,
    Description,
    FoundedYear,
    IsVerified,
    CreatedAt,
    UpdatedAt,
}
