//! result-access pin endpoints for api v1.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use classhub_db::{AuditLog, Database};
use classhub_types::{ExamId, PinCode, ResultPin, Role};

use crate::handlers::{ApiError, ApiResponse, AuthContext, JsonBody, OptionExt};
use crate::AppState;

/// attempts at generating a globally unique code before giving up.
const GENERATE_ATTEMPTS: usize = 10;

/// pin representation in api responses. the code is only revealed here,
/// at generation and listing time, to staff roles.
#[derive(Debug, Serialize)]
pub struct PinResponse {
    pub id: u64,
    pub pin_code: String,
    pub student_id: String,
    pub exam_id: Option<u64>,
    pub max_usage_count: i32,
    pub current_usage_count: i32,
    pub remaining_checks: i32,
    pub active: bool,
    pub valid_from: String,
    pub valid_until: String,
    pub first_used_at: Option<String>,
    pub last_used_at: Option<String>,
    pub created_at: String,
}

impl From<ResultPin> for PinResponse {
    fn from(pin: ResultPin) -> Self {
        Self {
            id: pin.id,
            remaining_checks: pin.remaining_checks(),
            pin_code: pin.pin_code.into_inner(),
            student_id: pin.student_code,
            exam_id: pin.exam_id.map(|e| e.0),
            max_usage_count: pin.max_usage_count,
            current_usage_count: pin.current_usage_count,
            active: pin.active,
            valid_from: pin.valid_from.to_rfc3339(),
            valid_until: pin.valid_until.to_rfc3339(),
            first_used_at: pin.first_used_at.map(|t| t.to_rfc3339()),
            last_used_at: pin.last_used_at.map(|t| t.to_rfc3339()),
            created_at: pin.created_at.to_rfc3339(),
        }
    }
}

/// request body for generating one pin.
#[derive(Debug, Deserialize)]
pub struct GeneratePinRequest {
    #[serde(default)]
    pub student_id: String,
    pub exam_id: Option<u64>,
    pub max_usage_count: Option<i32>,
    pub valid_days: Option<i64>,
}

/// request body for generating pins for many students at once.
#[derive(Debug, Deserialize)]
pub struct BulkGeneratePinRequest {
    #[serde(default)]
    pub student_ids: Vec<String>,
    pub exam_id: Option<u64>,
    pub max_usage_count: Option<i32>,
    pub valid_days: Option<i64>,
}

/// payload for the bulk generation endpoint.
#[derive(Debug, Serialize)]
pub struct BulkGeneratePayload {
    pub pins: Vec<PinResponse>,
    pub total: u64,
}

/// query parameters for the pin listing.
#[derive(Debug, Deserialize)]
pub struct ListPinsParams {
    pub student_id: Option<String>,
}

/// payload for the pin listing.
#[derive(Debug, Serialize)]
pub struct ListPinsPayload {
    pub pins: Vec<PinResponse>,
    pub total: u64,
}

/// create the pins router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_pins))
        .route("/generate", post(generate_pin))
        .route("/bulk-generate", post(bulk_generate_pins))
}

/// build a pin for one student, applying the request's overrides.
fn build_pin(
    student_code: String,
    exam_id: Option<u64>,
    max_usage_count: Option<i32>,
    valid_days: Option<i64>,
) -> ResultPin {
    let mut pin = ResultPin::new(0, PinCode::generate(), student_code);
    pin.exam_id = exam_id.map(ExamId);
    if let Some(max) = max_usage_count {
        pin.max_usage_count = max;
    }
    if let Some(days) = valid_days {
        pin.valid_until = pin.valid_from + chrono::Duration::days(days);
    }
    pin
}

/// insert a pin, regenerating the code on a uniqueness collision.
async fn insert_with_retry(state: &AppState, pin: ResultPin) -> Result<ResultPin, ApiError> {
    let mut pin = pin;
    for attempt in 0..GENERATE_ATTEMPTS {
        match state.db.create_pin(&pin).await {
            Ok(created) => return Ok(created),
            Err(e) if attempt + 1 < GENERATE_ATTEMPTS => {
                tracing::debug!(error = %e, "pin code collision, regenerating");
                pin.pin_code = PinCode::generate();
            }
            Err(e) => return Err(ApiError::internal(e)),
        }
    }
    Err(ApiError::internal("pin code space exhausted"))
}

/// generate a pin for one student.
///
/// `POST /api/v1/pins/generate`
async fn generate_pin(
    auth: AuthContext,
    State(state): State<AppState>,
    JsonBody(req): JsonBody<GeneratePinRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PinResponse>>), ApiError> {
    auth.authorize(&[Role::Admin, Role::Teacher])?;

    if req.student_id.is_empty() {
        return Err(ApiError::bad_request("Student ID is required"));
    }
    if matches!(req.max_usage_count, Some(max) if max <= 0) {
        return Err(ApiError::bad_request("Usage count must be positive"));
    }

    let student = state
        .db
        .get_student_by_code(&req.student_id)
        .await
        .map_err(ApiError::internal)?
        .or_not_found("Student not found")?;

    let pin = build_pin(
        student.student_code.clone(),
        req.exam_id,
        req.max_usage_count,
        req.valid_days,
    );
    let pin = insert_with_retry(&state, pin).await?;
    info!(student = %student.student_code, pin = %pin.pin_code, "pin generated");

    let _ = state
        .db
        .record_audit(&AuditLog::by_user(
            &auth.user,
            format!("generated a result pin for {}", student.student_code),
        ))
        .await;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "PIN generated successfully",
            pin.into(),
        )),
    ))
}

/// generate pins for a batch of students in one call.
///
/// `POST /api/v1/pins/bulk-generate`
///
/// students that do not exist are skipped rather than failing the batch.
async fn bulk_generate_pins(
    auth: AuthContext,
    State(state): State<AppState>,
    JsonBody(req): JsonBody<BulkGeneratePinRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BulkGeneratePayload>>), ApiError> {
    auth.authorize(&[Role::Admin, Role::Teacher])?;

    if req.student_ids.is_empty() {
        return Err(ApiError::bad_request("Student IDs are required"));
    }

    let mut pins = Vec::with_capacity(req.student_ids.len());
    for student_id in &req.student_ids {
        let Some(student) = state
            .db
            .get_student_by_code(student_id)
            .await
            .map_err(ApiError::internal)?
        else {
            continue;
        };

        let pin = build_pin(
            student.student_code,
            req.exam_id,
            req.max_usage_count,
            req.valid_days,
        );
        pins.push(PinResponse::from(insert_with_retry(&state, pin).await?));
    }

    let total = pins.len() as u64;
    info!(requested = req.student_ids.len(), generated = total, "bulk pin generation");

    let _ = state
        .db
        .record_audit(&AuditLog::by_user(
            &auth.user,
            format!("generated {} result pins", total),
        ))
        .await;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "PINs generated successfully",
            BulkGeneratePayload { pins, total },
        )),
    ))
}

/// list pins, optionally for one student.
///
/// `GET /api/v1/pins?student_id`
async fn list_pins(
    auth: AuthContext,
    State(state): State<AppState>,
    Query(params): Query<ListPinsParams>,
) -> Result<Json<ApiResponse<ListPinsPayload>>, ApiError> {
    auth.authorize(&[Role::Admin, Role::Teacher])?;

    let pins = state
        .db
        .list_pins(params.student_id.as_deref().filter(|s| !s.is_empty()))
        .await
        .map_err(ApiError::internal)?;
    let total = pins.len() as u64;

    Ok(Json(ApiResponse::data(ListPinsPayload {
        pins: pins.into_iter().map(Into::into).collect(),
        total,
    })))
}
