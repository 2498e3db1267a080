//! create result_pins table migration.

use sea_orm_migration::prelude::*;

use super::m20260810_000003_create_exams::Exams;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ResultPins::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ResultPins::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ResultPins::PinCode).string().not_null())
                    .col(ColumnDef::new(ResultPins::StudentCode).string().not_null())
                    .col(ColumnDef::new(ResultPins::ExamId).big_integer())
                    .col(
                        ColumnDef::new(ResultPins::MaxUsageCount)
                            .integer()
                            .not_null()
                            .default(5),
                    )
                    .col(
                        ColumnDef::new(ResultPins::CurrentUsageCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ResultPins::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ResultPins::ValidFrom)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ResultPins::ValidUntil)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ResultPins::FirstUsedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(ResultPins::LastUsedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(ResultPins::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_result_pins_exam")
                            .from(ResultPins::Table, ResultPins::ExamId)
                            .to(Exams::Table, Exams::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_result_pins_pin_code")
                    .table(ResultPins::Table)
                    .col(ResultPins::PinCode)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_result_pins_student_code")
                    .table(ResultPins::Table)
                    .col(ResultPins::StudentCode)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ResultPins::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ResultPins {
    Table,
    Id,
    PinCode,
    StudentCode,
    ExamId,
    MaxUsageCount,
    CurrentUsageCount,
    Active,
    ValidFrom,
    ValidUntil,
    FirstUsedAt,
    LastUsedAt,
    CreatedAt,
}
