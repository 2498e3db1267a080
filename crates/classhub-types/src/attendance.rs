//! daily attendance records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// attendance outcome for one student on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    /// in class.
    Present,
    /// not in class.
    Absent,
    /// arrived late.
    Late,
}

impl AttendanceStatus {
    /// the status name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
        }
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            "late" => Ok(AttendanceStatus::Late),
            other => Err(crate::Error::invalid(
                "status",
                format!("unknown attendance status '{}'", other),
            )),
        }
    }
}

/// one student's attendance on one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// unique identifier.
    pub id: u64,

    /// the student, by code.
    pub student_code: String,

    /// the school day.
    pub date: NaiveDate,

    /// outcome.
    pub status: AttendanceStatus,

    /// when the record was entered.
    pub recorded_at: DateTime<Utc>,
}

impl AttendanceRecord {
    /// create a new record stamped now.
    pub fn new(id: u64, student_code: String, date: NaiveDate, status: AttendanceStatus) -> Self {
        Self {
            id,
            student_code,
            date,
            status,
            recorded_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::Present).unwrap(),
            "\"present\""
        );
        let parsed: AttendanceStatus = serde_json::from_str("\"late\"").unwrap();
        assert_eq!(parsed, AttendanceStatus::Late);
    }
}
