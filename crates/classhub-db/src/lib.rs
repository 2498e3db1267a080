//! database layer for classhub.
//!
//! this crate provides persistent storage for:
//! - Users
//! - Students
//! - Exams and ExamResults
//! - ResultPins
//! - Admissions
//! - AttendanceRecords
//! - AuditLogs

#![warn(missing_docs)]

mod entity;
mod error;
mod migration;

pub use error::Error;

use std::future::Future;

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, Database as SeaOrmDatabase, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use sea_orm_migration::MigratorTrait;

use classhub_types::{
    Admission, AttendanceRecord, Config, Exam, ExamId, ExamResult, PinCode, ResultPin, Role,
    Student, User, UserId,
};

/// an audit trail entry recorded on notable mutations.
#[derive(Clone, Debug, Default)]
pub struct AuditLog {
    /// database id (0 for not-yet-persisted).
    pub id: u64,
    /// the acting user, if the action was authenticated.
    pub user_id: Option<UserId>,
    /// display name of whoever performed the action.
    pub actor: String,
    /// the actor's role at the time, or "public".
    pub role: String,
    /// human-readable description of what happened.
    pub action: String,
    /// when the entry was written.
    pub created_at: DateTime<Utc>,
}

impl AuditLog {
    /// build an entry for an unauthenticated action.
    pub fn public(actor: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            id: 0,
            user_id: None,
            actor: actor.into(),
            role: "public".to_string(),
            action: action.into(),
            created_at: Utc::now(),
        }
    }

    /// build an entry for an action performed by a known user.
    pub fn by_user(user: &User, action: impl Into<String>) -> Self {
        Self {
            id: 0,
            user_id: Some(user.id),
            actor: user.username.clone(),
            role: user.role.as_str().to_string(),
            action: action.into(),
            created_at: Utc::now(),
        }
    }
}

/// filters for the paginated student listing.
#[derive(Clone, Debug, Default)]
pub struct StudentFilter {
    /// case-insensitive substring match over names, email, roll number,
    /// or an exact student code.
    pub search: Option<String>,
    /// restrict to a single class.
    pub class_name: Option<String>,
}

/// filters for the exam result listing.
#[derive(Clone, Debug, Default)]
pub struct ResultFilter {
    /// restrict to a single exam.
    pub exam_id: Option<ExamId>,
    /// restrict to a single student.
    pub student_code: Option<String>,
}

/// result type for database operations.
pub type Result<T> = std::result::Result<T, Error>;

/// database trait for classhub storage operations.
///
/// this trait abstracts over different database backends (sqlite, postgresql).
/// students and exams use soft-delete semantics - records are marked with a
/// `deleted_at` timestamp rather than being physically removed. users are
/// deactivated, never deleted; admissions and audit logs are append-only.
pub trait Database: Send + Sync {
    // ─── Health Check ─────────────────────────────────────────────────────────

    /// ping the database to verify connectivity.
    ///
    /// returns `ok(())` if the database is reachable, `err` otherwise.
    /// used for health checks with a recommended timeout of 1 second.
    fn ping(&self) -> impl Future<Output = Result<()>> + Send;

    // ─── User Operations ─────────────────────────────────────────────────────

    /// create a new user. returns the created user with its assigned id.
    fn create_user(&self, user: &User) -> impl Future<Output = Result<User>> + Send;

    /// get a user by id.
    fn get_user(&self, id: UserId) -> impl Future<Output = Result<Option<User>>> + Send;

    /// get a user by username.
    fn get_user_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>>> + Send;

    /// get a user whose username or email matches, for duplicate checks.
    fn get_user_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> impl Future<Output = Result<Option<User>>> + Send;

    /// list all users.
    fn list_users(&self) -> impl Future<Output = Result<Vec<User>>> + Send;

    /// update an existing user. returns the updated user.
    fn update_user(&self, user: &User) -> impl Future<Output = Result<User>> + Send;

    /// stamp a user's `last_login` with the current time.
    fn touch_last_login(&self, id: UserId) -> impl Future<Output = Result<()>> + Send;

    // ─── Student Operations ──────────────────────────────────────────────────

    /// create a new student. returns the created student with its assigned id
    /// and derived code.
    fn create_student(&self, student: &Student) -> impl Future<Output = Result<Student>> + Send;

    /// get a student by id. returns `none` if not found or soft-deleted.
    fn get_student(&self, id: u64) -> impl Future<Output = Result<Option<Student>>> + Send;

    /// get a student by its display code (e.g. `STU001`).
    fn get_student_by_code(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<Option<Student>>> + Send;

    /// list non-deleted students, filtered and paginated.
    ///
    /// `page` is 1-indexed. returns the page of students plus the total
    /// count of rows matching the filter.
    fn list_students(
        &self,
        filter: &StudentFilter,
        page: u64,
        limit: u64,
    ) -> impl Future<Output = Result<(Vec<Student>, u64)>> + Send;

    /// soft-delete a student by setting `deleted_at` timestamp.
    fn delete_student(&self, id: u64) -> impl Future<Output = Result<()>> + Send;

    // ─── Exam Operations ─────────────────────────────────────────────────────

    /// create a new exam. returns the created exam with its assigned id.
    fn create_exam(&self, exam: &Exam) -> impl Future<Output = Result<Exam>> + Send;

    /// get an exam by id. returns `none` if not found or soft-deleted.
    fn get_exam(&self, id: ExamId) -> impl Future<Output = Result<Option<Exam>>> + Send;

    /// list all non-deleted exams.
    fn list_exams(&self) -> impl Future<Output = Result<Vec<Exam>>> + Send;

    /// update an existing exam. also updates `updated_at` timestamp.
    fn update_exam(&self, exam: &Exam) -> impl Future<Output = Result<Exam>> + Send;

    /// soft-delete an exam by setting `deleted_at` timestamp.
    fn delete_exam(&self, id: ExamId) -> impl Future<Output = Result<()>> + Send;

    // ─── Result Operations ───────────────────────────────────────────────────

    /// create a new exam result.
    fn create_result(&self, result: &ExamResult)
        -> impl Future<Output = Result<ExamResult>> + Send;

    /// get a result by id.
    fn get_result(&self, id: u64) -> impl Future<Output = Result<Option<ExamResult>>> + Send;

    /// list results, optionally restricted to an exam and/or a student.
    fn list_results(
        &self,
        filter: &ResultFilter,
    ) -> impl Future<Output = Result<Vec<ExamResult>>> + Send;

    /// update an existing result. also updates `updated_at` timestamp.
    fn update_result(&self, result: &ExamResult)
        -> impl Future<Output = Result<ExamResult>> + Send;

    /// list a student's published results, optionally scoped to one exam.
    /// draft results never appear here.
    fn list_published_results(
        &self,
        student_code: &str,
        exam_id: Option<ExamId>,
    ) -> impl Future<Output = Result<Vec<ExamResult>>> + Send;

    // ─── Pin Operations ──────────────────────────────────────────────────────

    /// create a new result-access pin.
    fn create_pin(&self, pin: &ResultPin) -> impl Future<Output = Result<ResultPin>> + Send;

    /// get a pin by id.
    fn get_pin(&self, id: u64) -> impl Future<Output = Result<Option<ResultPin>>> + Send;

    /// look up an active pin by (code, student) for the result checker.
    /// inactive pins are invisible here.
    fn get_pin_for_check(
        &self,
        code: &PinCode,
        student_code: &str,
    ) -> impl Future<Output = Result<Option<ResultPin>>> + Send;

    /// list pins, optionally restricted to one student.
    fn list_pins(
        &self,
        student_code: Option<&str>,
    ) -> impl Future<Output = Result<Vec<ResultPin>>> + Send;

    /// consume one use of a pin.
    ///
    /// the increment and the limit check happen in a single conditional
    /// update, so two concurrent checks of a pin with one use left cannot
    /// both succeed. returns `true` if a use was consumed, `false` if the
    /// pin was already at its limit. stamps `last_used_at`, and
    /// `first_used_at` only if unset.
    fn consume_pin_use(&self, id: u64) -> impl Future<Output = Result<bool>> + Send;

    // ─── Admission Operations ────────────────────────────────────────────────

    /// store a new admission application.
    fn create_admission(
        &self,
        admission: &Admission,
    ) -> impl Future<Output = Result<Admission>> + Send;

    /// list all admission applications, newest first.
    fn list_admissions(&self) -> impl Future<Output = Result<Vec<Admission>>> + Send;

    // ─── Attendance Operations ───────────────────────────────────────────────

    /// record an attendance entry.
    fn create_attendance(
        &self,
        record: &AttendanceRecord,
    ) -> impl Future<Output = Result<AttendanceRecord>> + Send;

    /// list attendance records, optionally for one student and/or since a date.
    fn list_attendance(
        &self,
        student_code: Option<&str>,
        since: Option<NaiveDate>,
    ) -> impl Future<Output = Result<Vec<AttendanceRecord>>> + Send;

    /// count (present, total) attendance entries on or after a date.
    fn attendance_counts_since(
        &self,
        since: NaiveDate,
    ) -> impl Future<Output = Result<(u64, u64)>> + Send;

    // ─── Aggregate Counts ────────────────────────────────────────────────────

    /// count non-deleted students.
    fn count_students(&self) -> impl Future<Output = Result<u64>> + Send;

    /// count active users holding a given role.
    fn count_users_with_role(&self, role: Role) -> impl Future<Output = Result<u64>> + Send;

    /// count distinct class names among non-deleted students.
    fn count_classes(&self) -> impl Future<Output = Result<u64>> + Send;

    /// count non-deleted exams.
    fn count_exams(&self) -> impl Future<Output = Result<u64>> + Send;

    /// count published exam results.
    fn count_published_results(&self) -> impl Future<Output = Result<u64>> + Send;

    /// count admission applications still pending review.
    fn count_pending_admissions(&self) -> impl Future<Output = Result<u64>> + Send;

    // ─── Audit Log Operations ────────────────────────────────────────────────

    /// append an audit log entry.
    fn record_audit(&self, entry: &AuditLog) -> impl Future<Output = Result<AuditLog>> + Send;

    /// fetch the most recent audit entries, newest first.
    fn recent_audit_entries(&self, limit: u64)
        -> impl Future<Output = Result<Vec<AuditLog>>> + Send;
}

/// the main database implementation using sea-orm.
#[derive(Clone)]
pub struct ClasshubDb {
    conn: DatabaseConnection,
}

impl ClasshubDb {
    /// create a new database connection from config.
    pub async fn new(config: &Config) -> Result<Self> {
        let url = Self::build_connection_url(&config.database)?;
        let conn: DatabaseConnection = SeaOrmDatabase::connect(&url)
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        let db = Self { conn };

        // enable WAL mode for sqlite if configured
        if config.database.db_type == "sqlite" && config.database.sqlite.write_ahead_log {
            db.enable_wal_mode().await?;
        }

        db.migrate().await?;
        Ok(db)
    }

    /// enable write-ahead logging mode for sqlite.
    ///
    /// WAL mode allows concurrent reads during writes and generally
    /// improves performance. must be called before any writes.
    async fn enable_wal_mode(&self) -> Result<()> {
        use sea_orm::ConnectionTrait;
        self.conn
            .execute_unprepared("PRAGMA journal_mode=WAL")
            .await
            .map_err(|e| Error::Connection(format!("failed to enable WAL mode: {}", e)))?;
        tracing::info!("sqlite WAL mode enabled");
        Ok(())
    }

    /// get the current sqlite journal mode.
    #[cfg(test)]
    async fn get_journal_mode(&self) -> Result<String> {
        use sea_orm::{ConnectionTrait, FromQueryResult};

        #[derive(FromQueryResult)]
        struct JournalMode {
            journal_mode: String,
        }

        let result: Option<JournalMode> = self
            .conn
            .query_one(sea_orm::Statement::from_string(
                sea_orm::DatabaseBackend::Sqlite,
                "PRAGMA journal_mode".to_string(),
            ))
            .await
            .map_err(|e| Error::Connection(e.to_string()))?
            .map(|row| JournalMode::from_query_result(&row, "").unwrap());

        Ok(result.map(|r| r.journal_mode).unwrap_or_default())
    }

    /// build a sea-orm compatible connection url from config.
    fn build_connection_url(config: &classhub_types::DatabaseConfig) -> Result<String> {
        match config.db_type.as_str() {
            "sqlite" => {
                let path = if config.connection_string.starts_with("sqlite:") {
                    config.connection_string.clone()
                } else {
                    format!("sqlite:{}", config.connection_string)
                };
                // add ?mode=rwc to create file if it doesn't exist
                if path.contains('?') {
                    Ok(path)
                } else {
                    Ok(format!("{}?mode=rwc", path))
                }
            }
            "postgres" | "postgresql" => Ok(config.connection_string.clone()),
            other => Err(Error::InvalidData(format!(
                "unsupported database type: {}",
                other
            ))),
        }
    }

    /// create an in-memory sqlite database for testing.
    pub async fn new_in_memory() -> Result<Self> {
        let conn: DatabaseConnection = SeaOrmDatabase::connect("sqlite::memory:")
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        let db = Self { conn };
        db.migrate().await?;
        Ok(db)
    }

    /// run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        migration::Migrator::up(&self.conn, None)
            .await
            .map_err(|e| Error::Migration(e.to_string()))?;
        Ok(())
    }

    /// close the database connection.
    ///
    /// NOTE: sea-orm connections are reference-counted and cleaned up on drop.
    /// this method exists for explicit cleanup and logging purposes.
    pub async fn close(&self) -> Result<()> {
        tracing::debug!("database connection marked for close");
        Ok(())
    }
}

impl Database for ClasshubDb {
    // health check

    async fn ping(&self) -> Result<()> {
        use sea_orm::ConnectionTrait;
        self.conn
            .execute_unprepared("SELECT 1")
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;
        Ok(())
    }

    // user operations

    async fn create_user(&self, user: &User) -> Result<User> {
        let model: entity::user::ActiveModel = user.into();
        let result = model.insert(&self.conn).await?;
        Ok(result.into())
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        let result = entity::user::Entity::find_by_id(id.0 as i64)
            .one(&self.conn)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let result = entity::user::Entity::find()
            .filter(entity::user::Column::Username.eq(username))
            .one(&self.conn)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn get_user_by_username_or_email(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Option<User>> {
        let result = entity::user::Entity::find()
            .filter(
                Condition::any()
                    .add(entity::user::Column::Username.eq(username))
                    .add(entity::user::Column::Email.eq(email)),
            )
            .one(&self.conn)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let results = entity::user::Entity::find()
            .order_by_asc(entity::user::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn update_user(&self, user: &User) -> Result<User> {
        let mut model: entity::user::ActiveModel = user.into();
        model.updated_at = Set(Utc::now());
        let result = model.update(&self.conn).await?;
        Ok(result.into())
    }

    async fn touch_last_login(&self, id: UserId) -> Result<()> {
        let now = Utc::now();
        entity::user::Entity::update_many()
            .col_expr(entity::user::Column::LastLogin, Expr::value(now))
            .col_expr(entity::user::Column::UpdatedAt, Expr::value(now))
            .filter(entity::user::Column::Id.eq(id.0 as i64))
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    // student operations

    async fn create_student(&self, student: &Student) -> Result<Student> {
        let model: entity::student::ActiveModel = student.into();
        let result = model.insert(&self.conn).await?;
        Ok(result.into())
    }

    async fn get_student(&self, id: u64) -> Result<Option<Student>> {
        let result = entity::student::Entity::find_by_id(id as i64)
            .filter(entity::student::Column::DeletedAt.is_null())
            .one(&self.conn)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn get_student_by_code(&self, code: &str) -> Result<Option<Student>> {
        // codes derive from ids, so a code lookup is an id lookup
        let id = match code.strip_prefix("STU").and_then(|s| s.parse::<i64>().ok()) {
            Some(id) => id,
            None => return Ok(None),
        };
        let result = entity::student::Entity::find_by_id(id)
            .filter(entity::student::Column::DeletedAt.is_null())
            .one(&self.conn)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn list_students(
        &self,
        filter: &StudentFilter,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<Student>, u64)> {
        let mut query = entity::student::Entity::find()
            .filter(entity::student::Column::DeletedAt.is_null());

        if let Some(class_name) = &filter.class_name {
            query = query.filter(entity::student::Column::ClassName.eq(class_name));
        }
        if let Some(search) = &filter.search {
            let mut cond = Condition::any()
                .add(entity::student::Column::FirstName.contains(search))
                .add(entity::student::Column::LastName.contains(search))
                .add(entity::student::Column::Email.contains(search))
                .add(entity::student::Column::RollNumber.contains(search));
            if let Some(id) = search.strip_prefix("STU").and_then(|s| s.parse::<i64>().ok()) {
                cond = cond.add(entity::student::Column::Id.eq(id));
            }
            query = query.filter(cond);
        }

        let paginator = query
            .order_by_asc(entity::student::Column::Id)
            .paginate(&self.conn, limit.max(1));
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((models.into_iter().map(Into::into).collect(), total))
    }

    async fn delete_student(&self, id: u64) -> Result<()> {
        entity::student::Entity::update_many()
            .col_expr(entity::student::Column::DeletedAt, Expr::value(Utc::now()))
            .filter(entity::student::Column::Id.eq(id as i64))
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    // exam operations

    async fn create_exam(&self, exam: &Exam) -> Result<Exam> {
        let model: entity::exam::ActiveModel = exam.into();
        let result = model.insert(&self.conn).await?;
        Ok(result.into())
    }

    async fn get_exam(&self, id: ExamId) -> Result<Option<Exam>> {
        let result = entity::exam::Entity::find_by_id(id.0 as i64)
            .filter(entity::exam::Column::DeletedAt.is_null())
            .one(&self.conn)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn list_exams(&self) -> Result<Vec<Exam>> {
        let results = entity::exam::Entity::find()
            .filter(entity::exam::Column::DeletedAt.is_null())
            .order_by_asc(entity::exam::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn update_exam(&self, exam: &Exam) -> Result<Exam> {
        let mut model: entity::exam::ActiveModel = exam.into();
        model.updated_at = Set(Utc::now());
        let result = model.update(&self.conn).await?;
        Ok(result.into())
    }

    async fn delete_exam(&self, id: ExamId) -> Result<()> {
        entity::exam::Entity::update_many()
            .col_expr(entity::exam::Column::DeletedAt, Expr::value(Utc::now()))
            .filter(entity::exam::Column::Id.eq(id.0 as i64))
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    // result operations

    async fn create_result(&self, result: &ExamResult) -> Result<ExamResult> {
        let model: entity::exam_result::ActiveModel = result.into();
        let inserted = model.insert(&self.conn).await?;
        Ok(inserted.into())
    }

    async fn get_result(&self, id: u64) -> Result<Option<ExamResult>> {
        let result = entity::exam_result::Entity::find_by_id(id as i64)
            .one(&self.conn)
            .await?;
        Ok(result.map(Into::into))
    }

    async fn list_results(&self, filter: &ResultFilter) -> Result<Vec<ExamResult>> {
        let mut query = entity::exam_result::Entity::find();
        if let Some(exam_id) = filter.exam_id {
            query = query.filter(entity::exam_result::Column::ExamId.eq(exam_id.0 as i64));
        }
        if let Some(student_code) = &filter.student_code {
            query = query.filter(entity::exam_result::Column::StudentCode.eq(student_code));
        }
        let results = query
            .order_by_asc(entity::exam_result::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn update_result(&self, result: &ExamResult) -> Result<ExamResult> {
        let mut model: entity::exam_result::ActiveModel = result.into();
        model.updated_at = Set(Utc::now());
        let updated = model.update(&self.conn).await?;
        Ok(updated.into())
    }

    async fn list_published_results(
        &self,
        student_code: &str,
        exam_id: Option<ExamId>,
    ) -> Result<Vec<ExamResult>> {
        let mut query = entity::exam_result::Entity::find()
            .filter(entity::exam_result::Column::StudentCode.eq(student_code))
            .filter(entity::exam_result::Column::Status.eq("published"));
        if let Some(exam_id) = exam_id {
            query = query.filter(entity::exam_result::Column::ExamId.eq(exam_id.0 as i64));
        }
        let results = query
            .order_by_asc(entity::exam_result::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    // pin operations

    async fn create_pin(&self, pin: &ResultPin) -> Result<ResultPin> {
        let model: entity::pin::ActiveModel = pin.into();
        let result = model.insert(&self.conn).await?;
        result.try_into()
    }

    async fn get_pin(&self, id: u64) -> Result<Option<ResultPin>> {
        let result = entity::pin::Entity::find_by_id(id as i64)
            .one(&self.conn)
            .await?;
        result.map(TryInto::try_into).transpose()
    }

    async fn get_pin_for_check(
        &self,
        code: &PinCode,
        student_code: &str,
    ) -> Result<Option<ResultPin>> {
        let result = entity::pin::Entity::find()
            .filter(entity::pin::Column::PinCode.eq(code.as_str()))
            .filter(entity::pin::Column::StudentCode.eq(student_code))
            .filter(entity::pin::Column::Active.eq(true))
            .one(&self.conn)
            .await?;
        result.map(TryInto::try_into).transpose()
    }

    async fn list_pins(&self, student_code: Option<&str>) -> Result<Vec<ResultPin>> {
        let mut query = entity::pin::Entity::find();
        if let Some(student_code) = student_code {
            query = query.filter(entity::pin::Column::StudentCode.eq(student_code));
        }
        let results = query
            .order_by_asc(entity::pin::Column::Id)
            .all(&self.conn)
            .await?;
        results.into_iter().map(TryInto::try_into).collect()
    }

    async fn consume_pin_use(&self, id: u64) -> Result<bool> {
        let now = Utc::now();
        let result = entity::pin::Entity::update_many()
            .col_expr(
                entity::pin::Column::CurrentUsageCount,
                Expr::col(entity::pin::Column::CurrentUsageCount).add(1),
            )
            .col_expr(entity::pin::Column::LastUsedAt, Expr::value(now))
            .col_expr(
                entity::pin::Column::FirstUsedAt,
                Func::coalesce([
                    Expr::col(entity::pin::Column::FirstUsedAt).into(),
                    Expr::value(now),
                ])
                .into(),
            )
            .filter(entity::pin::Column::Id.eq(id as i64))
            .filter(
                Expr::col(entity::pin::Column::CurrentUsageCount)
                    .lt(Expr::col(entity::pin::Column::MaxUsageCount)),
            )
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected == 1)
    }

    // admission operations

    async fn create_admission(&self, admission: &Admission) -> Result<Admission> {
        let model: entity::admission::ActiveModel = admission.into();
        let result = model.insert(&self.conn).await?;
        Ok(result.into())
    }

    async fn list_admissions(&self) -> Result<Vec<Admission>> {
        let results = entity::admission::Entity::find()
            .order_by_desc(entity::admission::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    // attendance operations

    async fn create_attendance(&self, record: &AttendanceRecord) -> Result<AttendanceRecord> {
        let model: entity::attendance::ActiveModel = record.into();
        let result = model.insert(&self.conn).await?;
        Ok(result.into())
    }

    async fn list_attendance(
        &self,
        student_code: Option<&str>,
        since: Option<NaiveDate>,
    ) -> Result<Vec<AttendanceRecord>> {
        let mut query = entity::attendance::Entity::find();
        if let Some(student_code) = student_code {
            query = query.filter(entity::attendance::Column::StudentCode.eq(student_code));
        }
        if let Some(since) = since {
            query = query.filter(entity::attendance::Column::Date.gte(since));
        }
        let results = query
            .order_by_desc(entity::attendance::Column::Date)
            .all(&self.conn)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }

    async fn attendance_counts_since(&self, since: NaiveDate) -> Result<(u64, u64)> {
        let total = entity::attendance::Entity::find()
            .filter(entity::attendance::Column::Date.gte(since))
            .count(&self.conn)
            .await?;
        let present = entity::attendance::Entity::find()
            .filter(entity::attendance::Column::Date.gte(since))
            .filter(entity::attendance::Column::Status.eq("present"))
            .count(&self.conn)
            .await?;
        Ok((present, total))
    }

    // aggregate counts

    async fn count_students(&self) -> Result<u64> {
        let count = entity::student::Entity::find()
            .filter(entity::student::Column::DeletedAt.is_null())
            .count(&self.conn)
            .await?;
        Ok(count)
    }

    async fn count_users_with_role(&self, role: Role) -> Result<u64> {
        let count = entity::user::Entity::find()
            .filter(entity::user::Column::Role.eq(role.as_str()))
            .filter(entity::user::Column::Active.eq(true))
            .count(&self.conn)
            .await?;
        Ok(count)
    }

    async fn count_classes(&self) -> Result<u64> {
        let classes: Vec<String> = entity::student::Entity::find()
            .select_only()
            .column(entity::student::Column::ClassName)
            .filter(entity::student::Column::DeletedAt.is_null())
            .distinct()
            .into_tuple()
            .all(&self.conn)
            .await?;
        Ok(classes.len() as u64)
    }

    async fn count_exams(&self) -> Result<u64> {
        let count = entity::exam::Entity::find()
            .filter(entity::exam::Column::DeletedAt.is_null())
            .count(&self.conn)
            .await?;
        Ok(count)
    }

    async fn count_published_results(&self) -> Result<u64> {
        let count = entity::exam_result::Entity::find()
            .filter(entity::exam_result::Column::Status.eq("published"))
            .count(&self.conn)
            .await?;
        Ok(count)
    }

    async fn count_pending_admissions(&self) -> Result<u64> {
        let count = entity::admission::Entity::find()
            .filter(entity::admission::Column::Status.eq("pending_review"))
            .count(&self.conn)
            .await?;
        Ok(count)
    }

    // audit log operations

    async fn record_audit(&self, entry: &AuditLog) -> Result<AuditLog> {
        let model: entity::audit_log::ActiveModel = entry.into();
        let result = model.insert(&self.conn).await?;
        Ok(result.into())
    }

    async fn recent_audit_entries(&self, limit: u64) -> Result<Vec<AuditLog>> {
        let results = entity::audit_log::Entity::find()
            .order_by_desc(entity::audit_log::Column::CreatedAt)
            .order_by_desc(entity::audit_log::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;
        Ok(results.into_iter().map(Into::into).collect())
    }
}
