//! attendance record entity for database storage.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, Set};

use classhub_types::{AttendanceRecord, AttendanceStatus};

/// attendance database model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "attendance_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_code: String,
    pub date: NaiveDate,
    pub status: String,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for AttendanceRecord {
    fn from(model: Model) -> Self {
        AttendanceRecord {
            id: model.id as u64,
            student_code: model.student_code,
            date: model.date,
            status: model.status.parse().unwrap_or(AttendanceStatus::Absent),
            recorded_at: model.recorded_at,
        }
    }
}

impl From<&AttendanceRecord> for ActiveModel {
    fn from(record: &AttendanceRecord) -> Self {
        ActiveModel {
            id: if record.id == 0 {
                NotSet
            } else {
                Set(record.id as i64)
            },
            student_code: Set(record.student_code.clone()),
            date: Set(record.date),
            status: Set(record.status.as_str().to_string()),
            recorded_at: Set(record.recorded_at),
        }
    }
}
