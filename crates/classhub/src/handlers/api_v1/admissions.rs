//! admission application endpoints for api v1.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use classhub_db::{AuditLog, Database};
use classhub_types::{Admission, AdmissionStatus, PaymentStatus, Role};

use crate::handlers::{ApiError, ApiResponse, AuthContext, JsonBody};
use crate::AppState;

/// admission representation in the staff listing.
#[derive(Debug, Serialize)]
pub struct AdmissionResponse {
    pub id: u64,
    pub application_code: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub class_applying: String,
    pub previous_school: String,
    pub guardian_name: String,
    pub guardian_phone: String,
    pub payment_method: String,
    pub total_amount: f64,
    pub payment_status: PaymentStatus,
    pub status: AdmissionStatus,
    pub submitted_at: String,
}

impl From<Admission> for AdmissionResponse {
    fn from(admission: Admission) -> Self {
        Self {
            id: admission.id,
            application_code: admission.application_code(),
            first_name: admission.first_name,
            last_name: admission.last_name,
            date_of_birth: admission.date_of_birth,
            gender: admission.gender,
            email: admission.email,
            phone: admission.phone,
            address: admission.address,
            city: admission.city,
            country: admission.country,
            class_applying: admission.class_applying,
            previous_school: admission.previous_school,
            guardian_name: admission.guardian_name,
            guardian_phone: admission.guardian_phone,
            payment_method: admission.payment_method,
            total_amount: admission.total_amount,
            payment_status: admission.payment_status,
            status: admission.status,
            submitted_at: admission.submitted_at.to_rfc3339(),
        }
    }
}

/// request body for submitting an application.
#[derive(Debug, Deserialize)]
pub struct SubmitAdmissionRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub class_applying: String,
    pub previous_school: Option<String>,
    #[serde(default)]
    pub guardian_name: String,
    #[serde(default)]
    pub guardian_phone: String,
    #[serde(default)]
    pub payment_method: String,
}

/// payload acknowledging a submitted application.
#[derive(Debug, Serialize)]
pub struct SubmitAdmissionPayload {
    pub application_code: String,
    pub status: AdmissionStatus,
    pub payment_status: PaymentStatus,
    pub total_amount: f64,
}

/// payload for the staff listing.
#[derive(Debug, Serialize)]
pub struct ListAdmissionsPayload {
    pub admissions: Vec<AdmissionResponse>,
    pub total: u64,
}

/// create the admissions router.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_admissions).post(submit_admission))
}

/// submit an admission application. public endpoint.
///
/// `POST /api/v1/admissions`
async fn submit_admission(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<SubmitAdmissionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SubmitAdmissionPayload>>), ApiError> {
    if req.first_name.is_empty()
        || req.last_name.is_empty()
        || req.email.is_empty()
        || req.class_applying.is_empty()
        || req.guardian_name.is_empty()
    {
        return Err(ApiError::bad_request("Required application fields are missing"));
    }
    let date_of_birth = req
        .date_of_birth
        .ok_or_else(|| ApiError::bad_request("Date of birth is required"))?;

    let admission = Admission {
        id: 0,
        first_name: req.first_name,
        last_name: req.last_name,
        date_of_birth,
        gender: req.gender,
        email: req.email,
        phone: req.phone,
        address: req.address,
        city: req.city,
        country: req.country,
        class_applying: req.class_applying,
        previous_school: req.previous_school.unwrap_or_else(|| "N/A".to_string()),
        guardian_name: req.guardian_name,
        guardian_phone: req.guardian_phone,
        payment_method: req.payment_method,
        total_amount: Admission::APPLICATION_FEE,
        payment_status: PaymentStatus::Paid,
        status: AdmissionStatus::PendingReview,
        submitted_at: Utc::now(),
    };

    let admission = state
        .db
        .create_admission(&admission)
        .await
        .map_err(ApiError::internal)?;
    info!(code = %admission.application_code(), class = %admission.class_applying, "admission application submitted");

    let _ = state
        .db
        .record_audit(&AuditLog::public(
            format!("{} {}", admission.first_name, admission.last_name),
            format!("submitted admission application {}", admission.application_code()),
        ))
        .await;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Application submitted successfully",
            SubmitAdmissionPayload {
                application_code: admission.application_code(),
                status: admission.status,
                payment_status: admission.payment_status,
                total_amount: admission.total_amount,
            },
        )),
    ))
}

/// list all applications, newest first. admin only.
///
/// `GET /api/v1/admissions`
async fn list_admissions(
    auth: AuthContext,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<ListAdmissionsPayload>>, ApiError> {
    auth.authorize(&[Role::Admin])?;

    let admissions = state
        .db
        .list_admissions()
        .await
        .map_err(ApiError::internal)?;
    let total = admissions.len() as u64;

    Ok(Json(ApiResponse::data(ListAdmissionsPayload {
        admissions: admissions.into_iter().map(Into::into).collect(),
        total,
    })))
}
