//! core types for classhub - a school management backend.
//!
//! this crate provides the fundamental data structures used throughout classhub:
//! - [`user`]: staff/student accounts and roles
//! - [`student`]: student records
//! - [`exam`]: scheduled exams
//! - [`exam_result`]: marks, grades and publication state
//! - [`pin`]: result-access pins and their usage policy
//! - [`admission`]: admission applications
//! - [`config`]: application configuration

#![warn(missing_docs)]

mod admission;
mod attendance;
mod config;
mod error;
mod exam;
mod exam_result;
mod pin;
mod pin_code;
mod student;
mod user;

pub use admission::{Admission, AdmissionStatus, PaymentStatus};
pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use config::{Config, DatabaseConfig, JwtConfig, ServerConfig, SqliteConfig};
pub use error::Error;
pub use exam::{Exam, ExamId, ExamStatus};
pub use exam_result::{ExamResult, Grade, ResultStatus};
pub use pin::{PinDenial, ResultPin};
pub use pin_code::{PinCode, PinCodeError};
pub use student::Student;
pub use user::{Role, User, UserId};

/// result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;
