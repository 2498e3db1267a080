//! create admissions table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Admissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Admissions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Admissions::FirstName).string().not_null())
                    .col(ColumnDef::new(Admissions::LastName).string().not_null())
                    .col(ColumnDef::new(Admissions::DateOfBirth).date().not_null())
                    .col(ColumnDef::new(Admissions::Gender).string().not_null())
                    .col(ColumnDef::new(Admissions::Email).string().not_null())
                    .col(ColumnDef::new(Admissions::Phone).string().not_null())
                    .col(ColumnDef::new(Admissions::Address).string().not_null())
                    .col(ColumnDef::new(Admissions::City).string().not_null())
                    .col(ColumnDef::new(Admissions::Country).string().not_null())
                    .col(ColumnDef::new(Admissions::ClassApplying).string().not_null())
                    .col(
                        ColumnDef::new(Admissions::PreviousSchool)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Admissions::GuardianName).string().not_null())
                    .col(ColumnDef::new(Admissions::GuardianPhone).string().not_null())
                    .col(ColumnDef::new(Admissions::PaymentMethod).string().not_null())
                    .col(ColumnDef::new(Admissions::TotalAmount).double().not_null())
                    .col(
                        ColumnDef::new(Admissions::PaymentStatus)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Admissions::Status)
                            .string()
                            .not_null()
                            .default("pending_review"),
                    )
                    .col(
                        ColumnDef::new(Admissions::SubmittedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_admissions_status")
                    .table(Admissions::Table)
                    .col(Admissions::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Admissions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Admissions {
    Table,
    Id,
    FirstName,
    LastName,
    DateOfBirth,
    Gender,
    Email,
    Phone,
    Address,
    City,
    Country,
    ClassApplying,
    PreviousSchool,
    GuardianName,
    GuardianPhone,
    PaymentMethod,
    TotalAmount,
    PaymentStatus,
    Status,
    SubmittedAt,
}
