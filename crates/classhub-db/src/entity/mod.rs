//! sea-orm entity models.

pub mod admission;
pub mod attendance;
pub mod audit_log;
pub mod exam;
pub mod exam_result;
pub mod pin;
pub mod student;
pub mod user;
