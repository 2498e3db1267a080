//! attendance endpoints for api v1.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use classhub_db::Database;
use classhub_types::{AttendanceRecord, AttendanceStatus, Role};

use crate::handlers::{ApiError, ApiResponse, AuthContext, JsonBody, OptionExt};
use crate::AppState;

/// attendance representation in api responses.
#[derive(Debug, Serialize)]
pub struct AttendanceResponse {
    pub id: u64,
    pub student_id: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub recorded_at: String,
}

impl From<AttendanceRecord> for AttendanceResponse {
    fn from(record: AttendanceRecord) -> Self {
        Self {
            id: record.id,
            student_id: record.student_code,
            date: record.date,
            status: record.status,
            recorded_at: record.recorded_at.to_rfc3339(),
        }
    }
}

/// query parameters for the attendance listing.
#[derive(Debug, Deserialize)]
pub struct ListAttendanceParams {
    pub student_id: Option<String>,
    pub since: Option<NaiveDate>,
}

/// payload for the attendance listing.
#[derive(Debug, Serialize)]
pub struct ListAttendancePayload {
    pub records: Vec<AttendanceResponse>,
    pub total: u64,
}

/// request body for recording attendance.
#[derive(Debug, Deserialize)]
pub struct RecordAttendanceRequest {
    #[serde(default)]
    pub student_id: String,
    pub date: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
}

/// create the attendance router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_attendance).post(record_attendance))
}

/// list attendance records, optionally for one student and/or since a date.
///
/// `GET /api/v1/attendance?student_id&since`
async fn list_attendance(
    auth: AuthContext,
    State(state): State<AppState>,
    Query(params): Query<ListAttendanceParams>,
) -> Result<Json<ApiResponse<ListAttendancePayload>>, ApiError> {
    auth.authorize(&[Role::Admin, Role::Teacher])?;

    let records = state
        .db
        .list_attendance(
            params.student_id.as_deref().filter(|s| !s.is_empty()),
            params.since,
        )
        .await
        .map_err(ApiError::internal)?;
    let total = records.len() as u64;

    Ok(Json(ApiResponse::data(ListAttendancePayload {
        records: records.into_iter().map(Into::into).collect(),
        total,
    })))
}

/// record one student's attendance for a day.
///
/// `POST /api/v1/attendance`
async fn record_attendance(
    auth: AuthContext,
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RecordAttendanceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AttendanceResponse>>), ApiError> {
    auth.authorize(&[Role::Admin, Role::Teacher])?;

    if req.student_id.is_empty() {
        return Err(ApiError::bad_request("Student ID is required"));
    }
    let (date, status) = match (req.date, req.status) {
        (Some(date), Some(status)) => (date, status),
        _ => return Err(ApiError::bad_request("Date and status are required")),
    };

    let student = state
        .db
        .get_student_by_code(&req.student_id)
        .await
        .map_err(ApiError::internal)?
        .or_not_found("Student not found")?;

    let record = AttendanceRecord::new(0, student.student_code, date, status);
    let record = state
        .db
        .create_attendance(&record)
        .await
        .map_err(ApiError::internal)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Attendance recorded successfully",
            record.into(),
        )),
    ))
}
