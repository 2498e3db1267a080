//! audit log entity for database storage.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, Set};

use classhub_types::UserId;

use crate::AuditLog;

/// audit log database model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "audit_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: Option<i64>,
    pub actor: String,
    pub role: String,
    pub action: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for AuditLog {
    fn from(model: Model) -> Self {
        AuditLog {
            id: model.id as u64,
            user_id: model.user_id.map(|id| UserId(id as u64)),
            actor: model.actor,
            role: model.role,
            action: model.action,
            created_at: model.created_at,
        }
    }
}

impl From<&AuditLog> for ActiveModel {
    fn from(log: &AuditLog) -> Self {
        ActiveModel {
            id: if log.id == 0 {
                NotSet
            } else {
                Set(log.id as i64)
            },
            user_id: Set(log.user_id.map(|id| id.0 as i64)),
            actor: Set(log.actor.clone()),
            role: Set(log.role.clone()),
            action: Set(log.action.clone()),
            created_at: Set(log.created_at),
        }
    }
}
