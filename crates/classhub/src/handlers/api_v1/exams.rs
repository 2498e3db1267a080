//! exam endpoints for api v1.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use classhub_db::{AuditLog, Database};
use classhub_types::{Exam, ExamId, ExamStatus, Role};

use crate::handlers::{ApiError, ApiResponse, AuthContext, JsonBody, OptionExt};
use crate::AppState;

/// exam representation in api responses. the code is derived
/// from the id at serialization time.
#[derive(Debug, Serialize)]
pub struct ExamResponse {
    pub id: u64,
    pub exam_code: String,
    pub exam_name: String,
    pub subject: String,
    pub class_name: String,
    pub exam_date: NaiveDate,
    pub duration_minutes: i32,
    pub total_marks: i32,
    pub passing_marks: i32,
    pub term: Option<String>,
    pub academic_year: String,
    pub status: ExamStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Exam> for ExamResponse {
    fn from(exam: Exam) -> Self {
        Self {
            id: exam.id.0,
            exam_code: exam.exam_code(),
            exam_name: exam.exam_name,
            subject: exam.subject,
            class_name: exam.class_name,
            exam_date: exam.exam_date,
            duration_minutes: exam.duration_minutes,
            total_marks: exam.total_marks,
            passing_marks: exam.passing_marks,
            term: exam.term,
            academic_year: exam.academic_year,
            status: exam.status,
            created_at: exam.created_at.to_rfc3339(),
            updated_at: exam.updated_at.to_rfc3339(),
        }
    }
}

/// payload for the exam listing.
#[derive(Debug, Serialize)]
pub struct ListExamsPayload {
    pub exams: Vec<ExamResponse>,
    pub total: u64,
}

/// request body for creating an exam.
#[derive(Debug, Deserialize)]
pub struct CreateExamRequest {
    #[serde(default)]
    pub exam_name: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub class_name: String,
    pub exam_date: Option<NaiveDate>,
    pub duration_minutes: Option<i32>,
    pub total_marks: Option<i32>,
    pub passing_marks: Option<i32>,
    pub term: Option<String>,
    pub academic_year: Option<String>,
}

/// request body for updating an exam. absent fields keep their value.
#[derive(Debug, Deserialize)]
pub struct UpdateExamRequest {
    pub exam_name: Option<String>,
    pub subject: Option<String>,
    pub class_name: Option<String>,
    pub exam_date: Option<NaiveDate>,
    pub duration_minutes: Option<i32>,
    pub total_marks: Option<i32>,
    pub passing_marks: Option<i32>,
    pub term: Option<String>,
    pub academic_year: Option<String>,
    pub status: Option<ExamStatus>,
}

/// create the exams router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_exams).post(create_exam))
        .route(
            "/{id}",
            get(get_exam).put(update_exam).delete(delete_exam),
        )
}

/// list all exams.
///
/// `GET /api/v1/exams`
async fn list_exams(
    auth: AuthContext,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ListExamsPayload>>, ApiError> {
    auth.authorize(&[Role::Admin, Role::Teacher, Role::Student])?;

    let exams = state.db.list_exams().await.map_err(ApiError::internal)?;
    let total = exams.len() as u64;

    Ok(Json(ApiResponse::data(ListExamsPayload {
        exams: exams.into_iter().map(Into::into).collect(),
        total,
    })))
}

/// get a single exam.
///
/// `GET /api/v1/exams/{id}`
async fn get_exam(
    auth: AuthContext,
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<ExamResponse>>, ApiError> {
    auth.authorize(&[Role::Admin, Role::Teacher, Role::Student])?;

    let exam = state
        .db
        .get_exam(ExamId(id))
        .await
        .map_err(ApiError::internal)?
        .or_not_found("Exam not found")?;

    Ok(Json(ApiResponse::data(exam.into())))
}

/// schedule a new exam.
///
/// `POST /api/v1/exams`
///
/// new exams always start in `scheduled` status.
async fn create_exam(
    auth: AuthContext,
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateExamRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ExamResponse>>), ApiError> {
    auth.authorize(&[Role::Admin, Role::Teacher])?;

    if req.exam_name.is_empty() || req.subject.is_empty() || req.class_name.is_empty() {
        return Err(ApiError::bad_request(
            "Exam name, subject and class are required",
        ));
    }

    let mut exam = Exam::new(ExamId(0), req.exam_name, req.subject, req.class_name);
    if let Some(exam_date) = req.exam_date {
        exam.exam_date = exam_date;
    }
    if let Some(duration_minutes) = req.duration_minutes {
        exam.duration_minutes = duration_minutes;
    }
    if let Some(total_marks) = req.total_marks {
        exam.total_marks = total_marks;
    }
    if let Some(passing_marks) = req.passing_marks {
        exam.passing_marks = passing_marks;
    }
    exam.term = req.term;
    if let Some(academic_year) = req.academic_year {
        exam.academic_year = academic_year;
    }

    let exam = state.db.create_exam(&exam).await.map_err(ApiError::internal)?;
    info!(code = %exam.exam_code(), name = %exam.exam_name, "exam created");

    let _ = state
        .db
        .record_audit(&AuditLog::by_user(
            &auth.user,
            format!("created exam {}", exam.exam_code()),
        ))
        .await;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Exam created successfully",
            exam.into(),
        )),
    ))
}

/// update an exam. only the fields present in the body change.
///
/// `PUT /api/v1/exams/{id}`
///
/// status values are validated by the enum; transitions are not.
async fn update_exam(
    auth: AuthContext,
    State(state): State<AppState>,
    Path(id): Path<u64>,
    JsonBody(req): JsonBody<UpdateExamRequest>,
) -> Result<Json<ApiResponse<ExamResponse>>, ApiError> {
    auth.authorize(&[Role::Admin, Role::Teacher])?;

    let mut exam = state
        .db
        .get_exam(ExamId(id))
        .await
        .map_err(ApiError::internal)?
        .or_not_found("Exam not found")?;

    if let Some(exam_name) = req.exam_name {
        exam.exam_name = exam_name;
    }
    if let Some(subject) = req.subject {
        exam.subject = subject;
    }
    if let Some(class_name) = req.class_name {
        exam.class_name = class_name;
    }
    if let Some(exam_date) = req.exam_date {
        exam.exam_date = exam_date;
    }
    if let Some(duration_minutes) = req.duration_minutes {
        exam.duration_minutes = duration_minutes;
    }
    if let Some(total_marks) = req.total_marks {
        exam.total_marks = total_marks;
    }
    if let Some(passing_marks) = req.passing_marks {
        exam.passing_marks = passing_marks;
    }
    if let Some(term) = req.term {
        exam.term = Some(term);
    }
    if let Some(academic_year) = req.academic_year {
        exam.academic_year = academic_year;
    }
    if let Some(status) = req.status {
        exam.status = status;
    }

    let exam = state.db.update_exam(&exam).await.map_err(ApiError::internal)?;

    Ok(Json(ApiResponse::with_message(
        "Exam updated successfully",
        exam.into(),
    )))
}

/// delete an exam.
///
/// `DELETE /api/v1/exams/{id}`
async fn delete_exam(
    auth: AuthContext,
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    auth.authorize(&[Role::Admin, Role::Teacher])?;

    let exam = state
        .db
        .get_exam(ExamId(id))
        .await
        .map_err(ApiError::internal)?
        .or_not_found("Exam not found")?;

    state
        .db
        .delete_exam(exam.id)
        .await
        .map_err(ApiError::internal)?;
    info!(code = %exam.exam_code(), "exam deleted");

    Ok(Json(ApiResponse::message("Exam deleted successfully")))
}
