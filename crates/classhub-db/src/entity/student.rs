//! student entity for database storage.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, Set};

use classhub_types::{Student, UserId};

/// student database model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub class_name: String,
    pub roll_number: String,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Student {
    fn from(model: Model) -> Self {
        Student {
            id: model.id as u64,
            student_code: Student::code_for(model.id as u64),
            user_id: model.user_id.map(|id| UserId(id as u64)),
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            class_name: model.class_name,
            roll_number: model.roll_number,
            created_at: model.created_at,
        }
    }
}

impl From<&Student> for ActiveModel {
    fn from(student: &Student) -> Self {
        ActiveModel {
            id: if student.id == 0 {
                NotSet
            } else {
                Set(student.id as i64)
            },
            user_id: Set(student.user_id.map(|id| id.0 as i64)),
            first_name: Set(student.first_name.clone()),
            last_name: Set(student.last_name.clone()),
            email: Set(student.email.clone()),
            class_name: Set(student.class_name.clone()),
            roll_number: Set(student.roll_number.clone()),
            created_at: Set(student.created_at),
            deleted_at: NotSet,
        }
    }
}
