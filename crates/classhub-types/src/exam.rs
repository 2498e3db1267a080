//! scheduled exams.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// unique identifier for an exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExamId(pub u64);

impl From<u64> for ExamId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ExamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// lifecycle state of an exam.
///
/// the value is validated on the wire, but transitions are not - any state
/// may be written over any other. see the design notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamStatus {
    /// scheduled but not yet started.
    Scheduled,
    /// currently in progress.
    Ongoing,
    /// finished.
    Completed,
    /// called off.
    Cancelled,
}

impl ExamStatus {
    /// the status name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExamStatus::Scheduled => "scheduled",
            ExamStatus::Ongoing => "ongoing",
            ExamStatus::Completed => "completed",
            ExamStatus::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for ExamStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(ExamStatus::Scheduled),
            "ongoing" => Ok(ExamStatus::Ongoing),
            "completed" => Ok(ExamStatus::Completed),
            "cancelled" => Ok(ExamStatus::Cancelled),
            other => Err(crate::Error::invalid(
                "status",
                format!("unknown exam status '{}'", other),
            )),
        }
    }
}

/// a scheduled exam.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exam {
    /// unique identifier.
    pub id: ExamId,

    /// name shown to students, e.g. "Midterm Exam".
    pub exam_name: String,

    /// subject, e.g. "Mathematics".
    pub subject: String,

    /// class the exam is for, e.g. "Grade 10A".
    pub class_name: String,

    /// scheduled date.
    pub exam_date: NaiveDate,

    /// duration in minutes.
    pub duration_minutes: i32,

    /// maximum achievable marks.
    pub total_marks: i32,

    /// minimum marks to pass.
    pub passing_marks: i32,

    /// term label, e.g. "Midterm".
    pub term: Option<String>,

    /// academic year label, e.g. "2025-2026".
    pub academic_year: String,

    /// lifecycle state.
    pub status: ExamStatus,

    /// when the exam was created.
    pub created_at: DateTime<Utc>,

    /// when the exam was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Exam {
    /// default maximum marks for a new exam.
    pub const DEFAULT_TOTAL_MARKS: i32 = 100;

    /// default pass mark for a new exam.
    pub const DEFAULT_PASSING_MARKS: i32 = 40;

    /// create a new scheduled exam with default marking.
    pub fn new(id: ExamId, exam_name: String, subject: String, class_name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            exam_name,
            subject,
            class_name,
            exam_date: now.date_naive(),
            duration_minutes: 60,
            total_marks: Self::DEFAULT_TOTAL_MARKS,
            passing_marks: Self::DEFAULT_PASSING_MARKS,
            term: None,
            academic_year: String::new(),
            status: ExamStatus::Scheduled,
            created_at: now,
            updated_at: now,
        }
    }

    /// derive the exam code for a given id, `EX` + zero-padded id.
    ///
    /// derived from the id rather than stored so it can never drift.
    pub fn code_for(id: ExamId) -> String {
        format!("EX{:03}", id.0)
    }

    /// this exam's human-readable code.
    pub fn exam_code(&self) -> String {
        Self::code_for(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exam_code_scheme() {
        assert_eq!(Exam::code_for(ExamId(1)), "EX001");
        assert_eq!(Exam::code_for(ExamId(99)), "EX099");
        assert_eq!(Exam::code_for(ExamId(1000)), "EX1000");
    }

    #[test]
    fn test_exam_status_wire_format() {
        let json = serde_json::to_string(&ExamStatus::Scheduled).unwrap();
        assert_eq!(json, "\"scheduled\"");

        let parsed: ExamStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(parsed, ExamStatus::Cancelled);
    }

    #[test]
    fn test_exam_status_rejects_unknown() {
        let result: Result<ExamStatus, _> = serde_json::from_str("\"postponed\"");
        assert!(result.is_err());
    }
}
