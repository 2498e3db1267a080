//! create exams table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Exams::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Exams::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Exams::ExamName).string().not_null())
                    .col(ColumnDef::new(Exams::Subject).string().not_null())
                    .col(ColumnDef::new(Exams::ClassName).string().not_null())
                    .col(ColumnDef::new(Exams::ExamDate).date().not_null())
                    .col(
                        ColumnDef::new(Exams::DurationMinutes)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Exams::TotalMarks)
                            .integer()
                            .not_null()
                            .default(100),
                    )
                    .col(
                        ColumnDef::new(Exams::PassingMarks)
                            .integer()
                            .not_null()
                            .default(40),
                    )
                    .col(ColumnDef::new(Exams::Term).string())
                    .col(ColumnDef::new(Exams::AcademicYear).string().not_null())
                    .col(
                        ColumnDef::new(Exams::Status)
                            .string()
                            .not_null()
                            .default("scheduled"),
                    )
                    .col(
                        ColumnDef::new(Exams::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Exams::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Exams::DeletedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        // index for soft deletes
        manager
            .create_index(
                Index::create()
                    .name("idx_exams_deleted_at")
                    .table(Exams::Table)
                    .col(Exams::DeletedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Exams::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Exams {
    Table,
    Id,
    ExamName,
    Subject,
    ClassName,
    ExamDate,
    DurationMinutes,
    TotalMarks,
    PassingMarks,
    Term,
    AcademicYear,
    Status,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
