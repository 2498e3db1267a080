//! exam entity for database storage.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, Set};

use classhub_types::{Exam, ExamId, ExamStatus};

/// exam database model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "exams")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub exam_name: String,
    pub subject: String,
    pub class_name: String,
    pub exam_date: NaiveDate,
    pub duration_minutes: i32,
    pub total_marks: i32,
    pub passing_marks: i32,
    pub term: Option<String>,
    pub academic_year: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::exam_result::Entity")]
    Results,
}

impl Related<super::exam_result::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Results.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Exam {
    fn from(model: Model) -> Self {
        Exam {
            id: ExamId(model.id as u64),
            exam_name: model.exam_name,
            subject: model.subject,
            class_name: model.class_name,
            exam_date: model.exam_date,
            duration_minutes: model.duration_minutes,
            total_marks: model.total_marks,
            passing_marks: model.passing_marks,
            term: model.term,
            academic_year: model.academic_year,
            status: model.status.parse().unwrap_or(ExamStatus::Scheduled),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<&Exam> for ActiveModel {
    fn from(exam: &Exam) -> Self {
        ActiveModel {
            id: if exam.id.0 == 0 {
                NotSet
            } else {
                Set(exam.id.0 as i64)
            },
            exam_name: Set(exam.exam_name.clone()),
            subject: Set(exam.subject.clone()),
            class_name: Set(exam.class_name.clone()),
            exam_date: Set(exam.exam_date),
            duration_minutes: Set(exam.duration_minutes),
            total_marks: Set(exam.total_marks),
            passing_marks: Set(exam.passing_marks),
            term: Set(exam.term.clone()),
            academic_year: Set(exam.academic_year.clone()),
            status: Set(exam.status.as_str().to_string()),
            created_at: Set(exam.created_at),
            updated_at: Set(exam.updated_at),
            deleted_at: NotSet,
        }
    }
}
