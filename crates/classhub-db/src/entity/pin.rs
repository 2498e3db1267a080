//! result-access pin entity for database storage.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, Set};

use classhub_types::{ExamId, PinCode, ResultPin};

use crate::Error;

/// result-access pin database model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "result_pins")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub pin_code: String,
    pub student_code: String,
    pub exam_id: Option<i64>,
    pub max_usage_count: i32,
    pub current_usage_count: i32,
    pub active: bool,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub first_used_at: Option<DateTime<Utc>>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
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

// fallible: a stored code that fails validation is corrupt data, not a
// default we can silently substitute
impl TryFrom<Model> for ResultPin {
    type Error = Error;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let pin_code = PinCode::new(model.pin_code)
            .map_err(|e| Error::InvalidData(format!("stored pin code: {}", e)))?;

        Ok(ResultPin {
            id: model.id as u64,
            pin_code,
            student_code: model.student_code,
            exam_id: model.exam_id.map(|id| ExamId(id as u64)),
            max_usage_count: model.max_usage_count,
            current_usage_count: model.current_usage_count,
            active: model.active,
            valid_from: model.valid_from,
            valid_until: model.valid_until,
            first_used_at: model.first_used_at,
            last_used_at: model.last_used_at,
            created_at: model.created_at,
        })
    }
}

impl From<&ResultPin> for ActiveModel {
    fn from(pin: &ResultPin) -> Self {
        ActiveModel {
            id: if pin.id == 0 {
                NotSet
            } else {
                Set(pin.id as i64)
            },
            pin_code: Set(pin.pin_code.as_str().to_string()),
            student_code: Set(pin.student_code.clone()),
            exam_id: Set(pin.exam_id.map(|id| id.0 as i64)),
            max_usage_count: Set(pin.max_usage_count),
            current_usage_count: Set(pin.current_usage_count),
            active: Set(pin.active),
            valid_from: Set(pin.valid_from),
            valid_until: Set(pin.valid_until),
            first_used_at: Set(pin.first_used_at),
            last_used_at: Set(pin.last_used_at),
            created_at: Set(pin.created_at),
        }
    }
}
