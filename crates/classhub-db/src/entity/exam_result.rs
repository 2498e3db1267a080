//! exam result entity for database storage.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, Set};

use classhub_types::{ExamId, ExamResult, Grade, ResultStatus};

/// exam result database model.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "exam_results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub exam_id: i64,
    pub student_code: String,
    pub student_name: String,
    pub marks_obtained: f64,
    pub total_marks: i32,
    pub percentage: f64,
    pub grade: String,
    pub remarks: String,
    pub status: String,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::exam::Entity",
        from = "Column::ExamId",
        to = "super::exam::Column::Id"
    )]
    Exam,
}

impl Related<super::exam::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exam.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ExamResult {
    fn from(model: Model) -> Self {
        ExamResult {
            id: model.id as u64,
            exam_id: ExamId(model.exam_id as u64),
            student_code: model.student_code,
            student_name: model.student_name,
            marks_obtained: model.marks_obtained,
            total_marks: model.total_marks,
            percentage: model.percentage,
            grade: model.grade.parse().unwrap_or(Grade::F),
            remarks: model.remarks,
            status: model.status.parse().unwrap_or(ResultStatus::Draft),
            published_at: model.published_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&ExamResult> for ActiveModel {
    fn from(result: &ExamResult) -> Self {
        ActiveModel {
            id: if result.id == 0 {
                NotSet
            } else {
                Set(result.id as i64)
            },
            exam_id: Set(result.exam_id.0 as i64),
            student_code: Set(result.student_code.clone()),
            student_name: Set(result.student_name.clone()),
            marks_obtained: Set(result.marks_obtained),
            total_marks: Set(result.total_marks),
            percentage: Set(result.percentage),
            grade: Set(result.grade.as_str().to_string()),
            remarks: Set(result.remarks.clone()),
            status: Set(result.status.as_str().to_string()),
            published_at: Set(result.published_at),
            created_at: Set(result.created_at),
            updated_at: Set(result.updated_at),
        }
    }
}
