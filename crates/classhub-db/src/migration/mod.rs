//! database migrations for classhub.

pub use sea_orm_migration::prelude::*;

mod m20260810_000001_create_users;
mod m20260810_000002_create_students;
mod m20260810_000003_create_exams;
mod m20260810_000004_create_exam_results;
mod m20260810_000005_create_result_pins;
mod m20260810_000006_create_admissions;
mod m20260810_000007_create_attendance_records;
mod m20260810_000008_create_audit_logs;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260810_000001_create_users::Migration),
            Box::new(m20260810_000002_create_students::Migration),
            Box::new(m20260810_000003_create_exams::Migration),
            Box::new(m20260810_000004_create_exam_results::Migration),
            Box::new(m20260810_000005_create_result_pins::Migration),
            Box::new(m20260810_000006_create_admissions::Migration),
            Box::new(m20260810_000007_create_attendance_records::Migration),
            Box::new(m20260810_000008_create_audit_logs::Migration),
        ]
    }
}
