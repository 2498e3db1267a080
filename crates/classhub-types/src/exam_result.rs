//! exam results, grades and publication state.
//!
//! percentage and grade are derived fields: they are recomputed together in
//! [`ExamResult::set_marks`] whenever marks change, so they can never
//! disagree with the stored marks. the grade threshold comparison uses the
//! unrounded percentage; only the stored percentage is rounded to 2 dp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::exam::ExamId;

/// letter grade derived from a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    /// 90% and above.
    #[serde(rename = "A+")]
    APlus,
    /// 80% to below 90%.
    A,
    /// 70% to below 80%.
    #[serde(rename = "B+")]
    BPlus,
    /// 60% to below 70%.
    B,
    /// 50% to below 60%.
    #[serde(rename = "C+")]
    CPlus,
    /// 40% to below 50%.
    C,
    /// below 40%.
    F,
}

impl Grade {
    /// derive a grade from a percentage, thresholds evaluated highest-first.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            Grade::APlus
        } else if percentage >= 80.0 {
            Grade::A
        } else if percentage >= 70.0 {
            Grade::BPlus
        } else if percentage >= 60.0 {
            Grade::B
        } else if percentage >= 50.0 {
            Grade::CPlus
        } else if percentage >= 40.0 {
            Grade::C
        } else {
            Grade::F
        }
    }

    /// the grade as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::F => "F",
        }
    }
}

impl std::str::FromStr for Grade {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A+" => Ok(Grade::APlus),
            "A" => Ok(Grade::A),
            "B+" => Ok(Grade::BPlus),
            "B" => Ok(Grade::B),
            "C+" => Ok(Grade::CPlus),
            "C" => Ok(Grade::C),
            "F" => Ok(Grade::F),
            other => Err(crate::Error::invalid("grade", format!("unknown grade '{}'", other))),
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// publication state of a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    /// entered but not visible through the pin checker.
    Draft,
    /// visible through the pin checker.
    Published,
}

impl ResultStatus {
    /// the status name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultStatus::Draft => "draft",
            ResultStatus::Published => "published",
        }
    }
}

impl std::str::FromStr for ResultStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(ResultStatus::Draft),
            "published" => Ok(ResultStatus::Published),
            other => Err(crate::Error::invalid(
                "status",
                format!("unknown result status '{}'", other),
            )),
        }
    }
}

/// a student's result for one exam.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamResult {
    /// unique identifier.
    pub id: u64,

    /// the exam this result belongs to.
    pub exam_id: ExamId,

    /// student code, e.g. "STU001".
    pub student_code: String,

    /// student display name, denormalized for result slips.
    pub student_name: String,

    /// marks the student obtained.
    pub marks_obtained: f64,

    /// maximum marks for the exam.
    pub total_marks: i32,

    /// derived: marks/total * 100, rounded to 2 dp for storage.
    pub percentage: f64,

    /// derived: letter grade from the unrounded percentage.
    pub grade: Grade,

    /// free-form remarks.
    pub remarks: String,

    /// publication state.
    pub status: ResultStatus,

    /// set when the result is published (at creation or via publish).
    pub published_at: Option<DateTime<Utc>>,

    /// when the result was entered.
    pub created_at: DateTime<Utc>,

    /// when the result was last updated.
    pub updated_at: DateTime<Utc>,
}

impl ExamResult {
    /// derive the result code for a given id, `RES` + zero-padded id.
    pub fn code_for(id: u64) -> String {
        format!("RES{:03}", id)
    }

    /// this result's human-readable code.
    pub fn result_code(&self) -> String {
        Self::code_for(self.id)
    }

    /// create a new draft result, deriving percentage and grade.
    pub fn new(id: u64, exam_id: ExamId, student_code: String, marks: f64, total: i32) -> Self {
        let now = Utc::now();
        let mut result = Self {
            id,
            exam_id,
            student_code,
            student_name: String::new(),
            marks_obtained: 0.0,
            total_marks: 0,
            percentage: 0.0,
            grade: Grade::F,
            remarks: String::new(),
            status: ResultStatus::Draft,
            published_at: None,
            created_at: now,
            updated_at: now,
        };
        result.set_marks(marks, total);
        result
    }

    /// set marks, recomputing percentage and grade together.
    ///
    /// this is the only path that touches the derived fields.
    pub fn set_marks(&mut self, marks_obtained: f64, total_marks: i32) {
        self.marks_obtained = marks_obtained;
        self.total_marks = total_marks;
        let raw = if total_marks > 0 {
            marks_obtained / f64::from(total_marks) * 100.0
        } else {
            0.0
        };
        self.grade = Grade::from_percentage(raw);
        self.percentage = (raw * 100.0).round() / 100.0;
    }

    /// mark this result published, stamping `published_at` once.
    pub fn publish(&mut self) {
        self.status = ResultStatus::Published;
        if self.published_at.is_none() {
            self.published_at = Some(Utc::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_thresholds() {
        assert_eq!(Grade::from_percentage(90.0), Grade::APlus);
        assert_eq!(Grade::from_percentage(89.99), Grade::A);
        assert_eq!(Grade::from_percentage(80.0), Grade::A);
        assert_eq!(Grade::from_percentage(70.0), Grade::BPlus);
        assert_eq!(Grade::from_percentage(60.0), Grade::B);
        assert_eq!(Grade::from_percentage(50.0), Grade::CPlus);
        assert_eq!(Grade::from_percentage(40.0), Grade::C);
        assert_eq!(Grade::from_percentage(39.99), Grade::F);
        assert_eq!(Grade::from_percentage(0.0), Grade::F);
    }

    #[test]
    fn test_grade_wire_format() {
        assert_eq!(serde_json::to_string(&Grade::APlus).unwrap(), "\"A+\"");
        assert_eq!(serde_json::to_string(&Grade::F).unwrap(), "\"F\"");
        let parsed: Grade = serde_json::from_str("\"B+\"").unwrap();
        assert_eq!(parsed, Grade::BPlus);
    }

    #[test]
    fn test_set_marks_recomputes_together() {
        let mut result = ExamResult::new(1, ExamId(1), "STU001".to_string(), 42.0, 50);
        assert_eq!(result.percentage, 84.0);
        assert_eq!(result.grade, Grade::A);

        result.set_marks(20.0, 50);
        assert_eq!(result.percentage, 40.0);
        assert_eq!(result.grade, Grade::C);
    }

    #[test]
    fn test_percentage_rounding_does_not_affect_grade() {
        // 35.999.../40 = 89.999...% rounds to 90.0 for storage,
        // but the grade must come from the unrounded value.
        let result = ExamResult::new(1, ExamId(1), "STU001".to_string(), 35.9999, 40);
        assert_eq!(result.percentage, 90.0);
        assert_eq!(result.grade, Grade::A);
    }

    #[test]
    fn test_zero_total_marks_does_not_divide() {
        let result = ExamResult::new(1, ExamId(1), "STU001".to_string(), 10.0, 0);
        assert_eq!(result.percentage, 0.0);
        assert_eq!(result.grade, Grade::F);
    }

    #[test]
    fn test_publish_stamps_once() {
        let mut result = ExamResult::new(1, ExamId(1), "STU001".to_string(), 42.0, 50);
        assert!(result.published_at.is_none());

        result.publish();
        let first = result.published_at.unwrap();

        result.publish();
        assert_eq!(result.published_at.unwrap(), first);
    }

    #[test]
    fn test_result_code_scheme() {
        assert_eq!(ExamResult::code_for(1), "RES001");
        assert_eq!(ExamResult::code_for(207), "RES207");
    }
}
