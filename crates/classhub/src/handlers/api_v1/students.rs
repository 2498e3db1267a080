//! student endpoints for api v1.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use classhub_db::{AuditLog, Database, StudentFilter};
use classhub_types::{Role, Student};

use crate::handlers::{ApiError, ApiResponse, AuthContext, JsonBody, OptionExt};
use crate::AppState;

/// default page size for the listing.
const DEFAULT_LIMIT: u64 = 20;

/// student representation in api responses.
#[derive(Debug, Serialize)]
pub struct StudentResponse {
    pub id: u64,
    pub student_code: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub class_name: String,
    pub roll_number: String,
    pub created_at: String,
}

impl From<Student> for StudentResponse {
    fn from(student: Student) -> Self {
        Self {
            id: student.id,
            student_code: student.student_code,
            first_name: student.first_name,
            last_name: student.last_name,
            email: student.email,
            class_name: student.class_name,
            roll_number: student.roll_number,
            created_at: student.created_at.to_rfc3339(),
        }
    }
}

/// query parameters for the student listing.
#[derive(Debug, Deserialize)]
pub struct ListStudentsParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub search: Option<String>,
    #[serde(rename = "classId")]
    pub class_id: Option<String>,
}

/// pagination block carried by list responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

/// payload for the student listing.
#[derive(Debug, Serialize)]
pub struct ListStudentsPayload {
    pub students: Vec<StudentResponse>,
    pub pagination: Pagination,
}

/// request body for creating a student.
#[derive(Debug, Deserialize)]
pub struct CreateStudentRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub roll_number: String,
}

/// create the students router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_students).post(create_student))
        .route("/{id}", get(get_student))
}

/// list students with pagination and search.
///
/// `GET /api/v1/students?page&limit&search&classId`
async fn list_students(
    auth: AuthContext,
    State(state): State<AppState>,
    Query(params): Query<ListStudentsParams>,
) -> Result<Json<ApiResponse<ListStudentsPayload>>, ApiError> {
    auth.authorize(&[Role::Admin, Role::Teacher])?;

    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).max(1);

    let filter = StudentFilter {
        search: params.search.filter(|s| !s.is_empty()),
        class_name: params.class_id.filter(|s| !s.is_empty()),
    };

    let (students, total) = state
        .db
        .list_students(&filter, page, limit)
        .await
        .map_err(ApiError::internal)?;

    debug!(count = students.len(), total, page, "listing students");

    Ok(Json(ApiResponse::data(ListStudentsPayload {
        students: students.into_iter().map(Into::into).collect(),
        pagination: Pagination {
            total,
            page,
            limit,
            total_pages: total.div_ceil(limit),
        },
    })))
}

/// get a single student.
///
/// `GET /api/v1/students/{id}`
async fn get_student(
    _auth: AuthContext,
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<StudentResponse>>, ApiError> {
    let student = state
        .db
        .get_student(id)
        .await
        .map_err(ApiError::internal)?
        .or_not_found("Student not found")?;

    Ok(Json(ApiResponse::data(student.into())))
}

/// create a new student record.
///
/// `POST /api/v1/students`
async fn create_student(
    auth: AuthContext,
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateStudentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<StudentResponse>>), ApiError> {
    auth.authorize(&[Role::Admin])?;

    if req.first_name.is_empty() || req.last_name.is_empty() || req.class_name.is_empty() {
        return Err(ApiError::bad_request(
            "First name, last name and class are required",
        ));
    }

    let mut student = Student::new(0, req.first_name, req.last_name);
    student.email = req.email;
    student.class_name = req.class_name;
    student.roll_number = req.roll_number;

    let student = state
        .db
        .create_student(&student)
        .await
        .map_err(ApiError::internal)?;
    info!(code = %student.student_code, "student created");

    let _ = state
        .db
        .record_audit(&AuditLog::by_user(
            &auth.user,
            format!("created student {}", student.student_code),
        ))
        .await;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Student created successfully",
            student.into(),
        )),
    ))
}
