//! student records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::UserId;

/// a student enrolled at the school.
///
/// the `student_code` (e.g. `STU001`) is the identifier guardians use with
/// the result checker; it is derived from the database id and never changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    /// unique identifier.
    pub id: u64,

    /// human-readable code, `STU` + zero-padded id.
    pub student_code: String,

    /// linked user account, if the student can sign in.
    pub user_id: Option<UserId>,

    /// given name.
    pub first_name: String,

    /// family name.
    pub last_name: String,

    /// contact email.
    pub email: String,

    /// class assignment, e.g. "Grade 10A".
    pub class_name: String,

    /// roll number within the class.
    pub roll_number: String,

    /// when the record was created.
    pub created_at: DateTime<Utc>,
}

impl Student {
    /// derive the student code for a given id.
    pub fn code_for(id: u64) -> String {
        format!("STU{:03}", id)
    }

    /// create a new student record. the code is derived from the id.
    pub fn new(id: u64, first_name: String, last_name: String) -> Self {
        Self {
            id,
            student_code: Self::code_for(id),
            user_id: None,
            first_name,
            last_name,
            email: String::new(),
            class_name: String::new(),
            roll_number: String::new(),
            created_at: Utc::now(),
        }
    }

    /// full display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
