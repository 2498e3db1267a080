//! admission application entity for database storage.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, Set};

use classhub_types::{Admission, AdmissionStatus, PaymentStatus};

/// admission application database model.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "admissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub class_applying: String,
    pub previous_school: String,
    pub guardian_name: String,
    pub guardian_phone: String,
    pub payment_method: String,
    pub total_amount: f64,
    pub payment_status: String,
    pub status: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Admission {
    fn from(model: Model) -> Self {
        Admission {
            id: model.id as u64,
            first_name: model.first_name,
            last_name: model.last_name,
            date_of_birth: model.date_of_birth,
            gender: model.gender,
            email: model.email,
            phone: model.phone,
            address: model.address,
            city: model.city,
            country: model.country,
            class_applying: model.class_applying,
            previous_school: model.previous_school,
            guardian_name: model.guardian_name,
            guardian_phone: model.guardian_phone,
            payment_method: model.payment_method,
            total_amount: model.total_amount,
            payment_status: model
                .payment_status
                .parse()
                .unwrap_or(PaymentStatus::Pending),
            status: model.status.parse().unwrap_or(AdmissionStatus::PendingReview),
            submitted_at: model.submitted_at,
        }
    }
}

impl From<&Admission> for ActiveModel {
    fn from(admission: &Admission) -> Self {
        ActiveModel {
            id: if admission.id == 0 {
                NotSet
            } else {
                Set(admission.id as i64)
            },
            first_name: Set(admission.first_name.clone()),
            last_name: Set(admission.last_name.clone()),
            date_of_birth: Set(admission.date_of_birth),
            gender: Set(admission.gender.clone()),
            email: Set(admission.email.clone()),
            phone: Set(admission.phone.clone()),
            address: Set(admission.address.clone()),
            city: Set(admission.city.clone()),
            country: Set(admission.country.clone()),
            class_applying: Set(admission.class_applying.clone()),
            previous_school: Set(admission.previous_school.clone()),
            guardian_name: Set(admission.guardian_name.clone()),
            guardian_phone: Set(admission.guardian_phone.clone()),
            payment_method: Set(admission.payment_method.clone()),
            total_amount: Set(admission.total_amount),
            payment_status: Set(admission.payment_status.as_str().to_string()),
            status: Set(admission.status.as_str().to_string()),
            submitted_at: Set(admission.submitted_at),
        }
    }
}
