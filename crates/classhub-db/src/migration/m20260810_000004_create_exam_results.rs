//! create exam_results table migration.

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
                    .table(ExamResults::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ExamResults::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ExamResults::ExamId).big_integer().not_null())
                    .col(ColumnDef::new(ExamResults::StudentCode).string().not_null())
                    .col(
                        ColumnDef::new(ExamResults::StudentName)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(ExamResults::MarksObtained).double().not_null())
                    .col(ColumnDef::new(ExamResults::TotalMarks).integer().not_null())
                    .col(ColumnDef::new(ExamResults::Percentage).double().not_null())
                    .col(ColumnDef::new(ExamResults::Grade).string().not_null())
                    .col(
                        ColumnDef::new(ExamResults::Remarks)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ExamResults::Status)
                            .string()
                            .not_null()
                            .default("draft"),
                    )
                    .col(ColumnDef::new(ExamResults::PublishedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(ExamResults::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ExamResults::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_exam_results_exam")
                            .from(ExamResults::Table, ExamResults::ExamId)
                            .to(Exams::Table, Exams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // the pin checker looks up by (student, status)
        manager
            .create_index(
                Index::create()
                    .name("idx_exam_results_student_code")
                    .table(ExamResults::Table)
                    .col(ExamResults::StudentCode)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_exam_results_exam_id")
                    .table(ExamResults::Table)
                    .col(ExamResults::ExamId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ExamResults::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ExamResults {
    Table,
    Id,
    ExamId,
    StudentCode,
    StudentName,
    MarksObtained,
    TotalMarks,
    Percentage,
    Grade,
    Remarks,
    Status,
    PublishedAt,
    CreatedAt,
    UpdatedAt,
}
