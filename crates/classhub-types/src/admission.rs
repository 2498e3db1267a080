//! admission applications.
//!
//! applications are append-only: once submitted they are reviewed out of
//! band and there is no update or delete path.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// review state of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionStatus {
    /// submitted, awaiting review.
    PendingReview,
    /// accepted.
    Approved,
    /// turned down.
    Rejected,
}

impl AdmissionStatus {
    /// the status name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            AdmissionStatus::PendingReview => "pending_review",
            AdmissionStatus::Approved => "approved",
            AdmissionStatus::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for AdmissionStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending_review" => Ok(AdmissionStatus::PendingReview),
            "approved" => Ok(AdmissionStatus::Approved),
            "rejected" => Ok(AdmissionStatus::Rejected),
            other => Err(crate::Error::invalid(
                "status",
                format!("unknown admission status '{}'", other),
            )),
        }
    }
}

/// payment state of the application fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// fee received.
    Paid,
    /// fee outstanding.
    Pending,
}

impl PaymentStatus {
    /// the status name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Pending => "pending",
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paid" => Ok(PaymentStatus::Paid),
            "pending" => Ok(PaymentStatus::Pending),
            other => Err(crate::Error::invalid(
                "payment_status",
                format!("unknown payment status '{}'", other),
            )),
        }
    }
}

/// an admission application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admission {
    /// unique identifier.
    pub id: u64,

    /// applicant's given name.
    pub first_name: String,

    /// applicant's family name.
    pub last_name: String,

    /// date of birth.
    pub date_of_birth: NaiveDate,

    /// gender as supplied by the applicant.
    pub gender: String,

    /// contact email.
    pub email: String,

    /// contact phone.
    pub phone: String,

    /// street address.
    pub address: String,

    /// city.
    pub city: String,

    /// country.
    pub country: String,

    /// class applied for, e.g. "Grade 7".
    pub class_applying: String,

    /// previous school, "N/A" when none.
    pub previous_school: String,

    /// guardian's name.
    pub guardian_name: String,

    /// guardian's phone.
    pub guardian_phone: String,

    /// how the application fee was paid.
    pub payment_method: String,

    /// application fee amount.
    pub total_amount: f64,

    /// payment state of the fee.
    pub payment_status: PaymentStatus,

    /// review state.
    pub status: AdmissionStatus,

    /// when the application was submitted.
    pub submitted_at: DateTime<Utc>,
}

impl Admission {
    /// flat application fee.
    pub const APPLICATION_FEE: f64 = 60.0;

    /// derive the human-readable application code for an id and year,
    /// e.g. `APP-2026-0001`.
    pub fn code_for(id: u64, year: i32) -> String {
        format!("APP-{}-{:04}", year, id)
    }

    /// this application's human-readable code.
    pub fn application_code(&self) -> String {
        use chrono::Datelike;
        Self::code_for(self.id, self.submitted_at.year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_code_scheme() {
        assert_eq!(Admission::code_for(1, 2026), "APP-2026-0001");
        assert_eq!(Admission::code_for(123, 2026), "APP-2026-0123");
    }

    #[test]
    fn test_admission_status_wire_format() {
        let json = serde_json::to_string(&AdmissionStatus::PendingReview).unwrap();
        assert_eq!(json, "\"pending_review\"");
    }
}
