//! exam result endpoints for api v1, including the public pin checker.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use classhub_db::{AuditLog, Database, ResultFilter};
use classhub_types::{
    ExamId, ExamResult, Grade, PinCode, PinDenial, ResultStatus, Role,
};

use crate::handlers::api_v1::exams::ExamResponse;
use crate::handlers::api_v1::students::StudentResponse;
use crate::handlers::{ApiError, ApiResponse, AuthContext, JsonBody, OptionExt};
use crate::AppState;

/// exam result representation in api responses.
#[derive(Debug, Serialize)]
pub struct ResultResponse {
    pub id: u64,
    pub result_code: String,
    pub exam_id: u64,
    pub student_id: String,
    pub student_name: String,
    pub marks_obtained: f64,
    pub total_marks: i32,
    pub percentage: f64,
    pub grade: Grade,
    pub remarks: String,
    pub status: ResultStatus,
    pub published_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    /// embedded exam details, present on the pin checker path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_details: Option<ExamResponse>,
}

impl From<ExamResult> for ResultResponse {
    fn from(result: ExamResult) -> Self {
        Self {
            id: result.id,
            result_code: ExamResult::code_for(result.id),
            exam_id: result.exam_id.0,
            student_id: result.student_code,
            student_name: result.student_name,
            marks_obtained: result.marks_obtained,
            total_marks: result.total_marks,
            percentage: result.percentage,
            grade: result.grade,
            remarks: result.remarks,
            status: result.status,
            published_at: result.published_at.map(|t| t.to_rfc3339()),
            created_at: result.created_at.to_rfc3339(),
            updated_at: result.updated_at.to_rfc3339(),
            exam_details: None,
        }
    }
}

/// query parameters for the result listing.
#[derive(Debug, Deserialize)]
pub struct ListResultsParams {
    pub exam_id: Option<u64>,
    pub student_id: Option<String>,
}

/// payload for the result listing.
#[derive(Debug, Serialize)]
pub struct ListResultsPayload {
    pub results: Vec<ResultResponse>,
    pub total: u64,
}

/// request body for uploading a result.
#[derive(Debug, Deserialize)]
pub struct CreateResultRequest {
    pub exam_id: Option<u64>,
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub student_name: String,
    pub marks_obtained: Option<f64>,
    pub total_marks: Option<i32>,
    #[serde(default)]
    pub remarks: String,
    pub status: Option<ResultStatus>,
}

/// request body for updating a result.
#[derive(Debug, Deserialize)]
pub struct UpdateResultRequest {
    pub marks_obtained: Option<f64>,
    pub total_marks: Option<i32>,
    pub remarks: Option<String>,
    pub status: Option<ResultStatus>,
}

/// request body for the pin checker.
#[derive(Debug, Deserialize)]
pub struct CheckResultRequest {
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub pin_code: String,
    pub exam_id: Option<u64>,
}

/// usage info returned with checked results.
#[derive(Debug, Serialize)]
pub struct PinInfo {
    pub remaining_checks: i32,
}

/// payload for a successful pin check.
#[derive(Debug, Serialize)]
pub struct CheckResultPayload {
    pub student: StudentResponse,
    pub results: Vec<ResultResponse>,
    pub pin_info: PinInfo,
}

/// create the results router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_results).post(create_result))
        .route("/check", post(check_results))
        .route("/{id}", axum::routing::put(update_result))
        .route("/{id}/publish", post(publish_result))
}

/// list results, optionally filtered by exam or student.
///
/// `GET /api/v1/results?exam_id&student_id`
async fn list_results(
    auth: AuthContext,
    State(state): State<AppState>,
    Query(params): Query<ListResultsParams>,
) -> Result<Json<ApiResponse<ListResultsPayload>>, ApiError> {
    auth.authorize(&[Role::Admin, Role::Teacher])?;

    let filter = ResultFilter {
        exam_id: params.exam_id.map(ExamId),
        student_code: params.student_id.filter(|s| !s.is_empty()),
    };
    let results = state
        .db
        .list_results(&filter)
        .await
        .map_err(ApiError::internal)?;
    let total = results.len() as u64;

    Ok(Json(ApiResponse::data(ListResultsPayload {
        results: results.into_iter().map(Into::into).collect(),
        total,
    })))
}

/// upload a result. percentage and grade are derived server-side.
///
/// `POST /api/v1/results`
async fn create_result(
    auth: AuthContext,
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateResultRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ResultResponse>>), ApiError> {
    auth.authorize(&[Role::Admin, Role::Teacher])?;

    let exam_id = req
        .exam_id
        .ok_or_else(|| ApiError::bad_request("Exam and marks are required"))?;
    let (marks_obtained, total_marks) = match (req.marks_obtained, req.total_marks) {
        (Some(m), Some(t)) if t > 0 => (m, t),
        _ => return Err(ApiError::bad_request("Exam and marks are required")),
    };
    if req.student_id.is_empty() {
        return Err(ApiError::bad_request("Student ID is required"));
    }

    // the exam must exist; results never point at deleted exams
    state
        .db
        .get_exam(ExamId(exam_id))
        .await
        .map_err(ApiError::internal)?
        .or_not_found("Exam not found")?;

    let mut result = ExamResult::new(
        0,
        ExamId(exam_id),
        req.student_id,
        marks_obtained,
        total_marks,
    );
    result.student_name = req.student_name;
    result.remarks = req.remarks;
    if req.status == Some(ResultStatus::Published) {
        result.publish();
    }

    let result = state
        .db
        .create_result(&result)
        .await
        .map_err(ApiError::internal)?;
    info!(
        code = %result.result_code(),
        student = %result.student_code,
        grade = %result.grade,
        "result uploaded"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Result uploaded successfully",
            result.into(),
        )),
    ))
}

/// update a result. marks changes recompute percentage and grade.
///
/// `PUT /api/v1/results/{id}`
async fn update_result(
    auth: AuthContext,
    State(state): State<AppState>,
    Path(id): Path<u64>,
    JsonBody(req): JsonBody<UpdateResultRequest>,
) -> Result<Json<ApiResponse<ResultResponse>>, ApiError> {
    auth.authorize(&[Role::Admin, Role::Teacher])?;

    let mut result = state
        .db
        .get_result(id)
        .await
        .map_err(ApiError::internal)?
        .or_not_found("Result not found")?;

    let marks = req.marks_obtained.unwrap_or(result.marks_obtained);
    let total = req.total_marks.unwrap_or(result.total_marks);
    if total <= 0 {
        return Err(ApiError::bad_request("Total marks must be positive"));
    }
    result.set_marks(marks, total);

    if let Some(remarks) = req.remarks {
        result.remarks = remarks;
    }
    match req.status {
        Some(ResultStatus::Published) => result.publish(),
        Some(ResultStatus::Draft) => result.status = ResultStatus::Draft,
        None => {}
    }

    let result = state
        .db
        .update_result(&result)
        .await
        .map_err(ApiError::internal)?;

    Ok(Json(ApiResponse::with_message(
        "Result updated successfully",
        result.into(),
    )))
}

/// publish a result, stamping `published_at` the first time only.
///
/// `POST /api/v1/results/{id}/publish`
async fn publish_result(
    auth: AuthContext,
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ApiResponse<ResultResponse>>, ApiError> {
    auth.authorize(&[Role::Admin, Role::Teacher])?;

    let mut result = state
        .db
        .get_result(id)
        .await
        .map_err(ApiError::internal)?
        .or_not_found("Result not found")?;

    result.publish();
    let result = state
        .db
        .update_result(&result)
        .await
        .map_err(ApiError::internal)?;
    info!(code = %result.result_code(), "result published");

    let _ = state
        .db
        .record_audit(&AuditLog::by_user(
            &auth.user,
            format!("published result {}", result.result_code()),
        ))
        .await;

    Ok(Json(ApiResponse::with_message(
        "Result published successfully",
        result.into(),
    )))
}

/// check published results with a pin. public endpoint.
///
/// `POST /api/v1/results/check`
///
/// denial order: missing fields, unknown (pin, student) pair, expired,
/// usage limit, missing student record, no published results. only a
/// fully successful check consumes a use.
async fn check_results(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CheckResultRequest>,
) -> Result<Json<ApiResponse<CheckResultPayload>>, ApiError> {
    if req.student_id.is_empty() || req.pin_code.is_empty() {
        return Err(ApiError::bad_request("Student ID and PIN are required"));
    }

    // a malformed code can't match any stored pin
    let pin_code = PinCode::new(req.pin_code)
        .map_err(|_| ApiError::unauthorized("Invalid PIN or Student ID"))?;

    let pin = state
        .db
        .get_pin_for_check(&pin_code, &req.student_id)
        .await
        .map_err(ApiError::internal)?
        .or_unauthorized("Invalid PIN or Student ID")?;

    if let Some(denial) = pin.deny_reason() {
        warn!(student = %req.student_id, reason = ?denial, "pin check denied");
        return Err(match denial {
            PinDenial::Invalid | PinDenial::Expired => ApiError::unauthorized(denial.message()),
            PinDenial::LimitExceeded => ApiError::forbidden(denial.message()),
        });
    }

    let student = state
        .db
        .get_student_by_code(&req.student_id)
        .await
        .map_err(ApiError::internal)?
        .or_not_found("Student not found")?;

    let exam_scope = req.exam_id.map(ExamId);
    let results = state
        .db
        .list_published_results(&student.student_code, exam_scope)
        .await
        .map_err(ApiError::internal)?;
    if results.is_empty() {
        return Err(ApiError::not_found(
            "No published results found for this student",
        ));
    }

    // consume exactly one use; a concurrent check may have taken the last one
    let consumed = state
        .db
        .consume_pin_use(pin.id)
        .await
        .map_err(ApiError::internal)?;
    if !consumed {
        return Err(ApiError::forbidden(PinDenial::LimitExceeded.message()));
    }

    let pin = state
        .db
        .get_pin(pin.id)
        .await
        .map_err(ApiError::internal)?
        .or_unauthorized("Invalid PIN or Student ID")?;

    // embed each result's exam details
    let mut responses = Vec::with_capacity(results.len());
    for result in results {
        let exam = state
            .db
            .get_exam(result.exam_id)
            .await
            .map_err(ApiError::internal)?;
        let mut response = ResultResponse::from(result);
        response.exam_details = exam.map(Into::into);
        responses.push(response);
    }

    info!(student = %student.student_code, remaining = pin.remaining_checks(), "pin check succeeded");

    Ok(Json(ApiResponse::with_message(
        "Results retrieved successfully",
        CheckResultPayload {
            student: student.into(),
            results: responses,
            pin_info: PinInfo {
                remaining_checks: pin.remaining_checks(),
            },
        },
    )))
}
