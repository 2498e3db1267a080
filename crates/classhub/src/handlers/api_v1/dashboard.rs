//! dashboard statistics endpoint for api v1.

use axum::{extract::State, routing::get, Json, Router};
use chrono::{Duration, Utc};
use serde::Serialize;

use classhub_db::{AuditLog, Database};
use classhub_types::Role;

use crate::handlers::{ApiError, ApiResponse, AuthContext};
use crate::AppState;

/// how far back the attendance rate looks.
const ATTENDANCE_WINDOW_DAYS: i64 = 30;

/// how many recent audit entries the dashboard shows.
const RECENT_ACTIVITY_LIMIT: u64 = 10;

/// one recent-activity line on the dashboard.
#[derive(Debug, Serialize)]
pub struct ActivityEntry {
    pub actor: String,
    pub role: String,
    pub action: String,
    pub timestamp: String,
}

impl From<AuditLog> for ActivityEntry {
    fn from(entry: AuditLog) -> Self {
        Self {
            actor: entry.actor,
            role: entry.role,
            action: entry.action,
            timestamp: entry.created_at.to_rfc3339(),
        }
    }
}

/// aggregate counts shown on the dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_students: u64,
    pub total_teachers: u64,
    pub total_classes: u64,
    pub total_exams: u64,
    pub published_results: u64,
    pub pending_admissions: u64,
    /// whole-number percentage over the trailing window, 0 with no records.
    pub attendance_rate: u64,
    pub recent_activity: Vec<ActivityEntry>,
}

/// create the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route("/stats", get(stats))
}

/// aggregate statistics for the dashboard. any authenticated role.
///
/// `GET /api/v1/dashboard/stats`
async fn stats(
    auth: AuthContext,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardStats>>, ApiError> {
    auth.authorize(&[Role::Admin, Role::Teacher, Role::Student])?;

    let since = (Utc::now() - Duration::days(ATTENDANCE_WINDOW_DAYS)).date_naive();
    let (present, total) = state
        .db
        .attendance_counts_since(since)
        .await
        .map_err(ApiError::internal)?;
    let attendance_rate = if total == 0 {
        0
    } else {
        ((present as f64 / total as f64) * 100.0).round() as u64
    };

    let recent = state
        .db
        .recent_audit_entries(RECENT_ACTIVITY_LIMIT)
        .await
        .map_err(ApiError::internal)?;

    let stats = DashboardStats {
        total_students: state.db.count_students().await.map_err(ApiError::internal)?,
        total_teachers: state
            .db
            .count_users_with_role(Role::Teacher)
            .await
            .map_err(ApiError::internal)?,
        total_classes: state.db.count_classes().await.map_err(ApiError::internal)?,
        total_exams: state.db.count_exams().await.map_err(ApiError::internal)?,
        published_results: state
            .db
            .count_published_results()
            .await
            .map_err(ApiError::internal)?,
        pending_admissions: state
            .db
            .count_pending_admissions()
            .await
            .map_err(ApiError::internal)?,
        attendance_rate,
        recent_activity: recent.into_iter().map(Into::into).collect(),
    };

    Ok(Json(ApiResponse::data(stats)))
}
