//! Report routes
//!
//! REST counterpart of the SMS `report` command. Both paths create through
//! the same [`ReportStore`], so ids stay strictly increasing no matter which
//! channel a report arrives on.

use axum::extract::{Path, State};
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde::Deserialize;

use crate::api::ApiResponse;
use crate::error::{AppError, AppResult};
use crate::features::AppState;
use crate::store::{NewReport, Report, ReportStatus};

/// Create report routes
pub fn reports_routes() -> Router<AppState> {
    Router::new()
        .route("/reports", get(list_reports).post(create_report))
        .route("/reports/:id", patch(update_report))
}

/// List all reports
///
/// GET /api/reports
async fn list_reports(State(state): State<AppState>) -> ApiResponse<Vec<Report>> {
    let data = state.reports.list();
    let count = data.len();
    ApiResponse::success_with_count(data, count)
}

/// Report submission body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReport {
    /// Issue category, e.g. "overcharging" or "reckless driving"
    #[serde(rename = "type", default)]
    pub report_type: String,
    #[serde(default)]
    pub vehicle: String,
    #[serde(default)]
    pub route: String,
    #[serde(default)]
    pub description: String,
    pub phone_number: Option<String>,
}

/// Submit a new report
///
/// POST /api/reports
async fn create_report(
    State(state): State<AppState>,
    Json(body): Json<CreateReport>,
) -> AppResult<ApiResponse<Report>> {
    if body.report_type.trim().is_empty()
        || body.vehicle.trim().is_empty()
        || body.route.trim().is_empty()
    {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    }

    let issue = if body.description.trim().is_empty() {
        body.report_type
    } else {
        format!("{}: {}", body.report_type, body.description.trim())
    };

    let report = state.reports.create(NewReport {
        vehicle: body.vehicle,
        route: body.route,
        issue,
        reporter: body
            .phone_number
            .unwrap_or_else(|| "Anonymous".to_string()),
    });

    Ok(ApiResponse::success(report)
        .with_message("Report submitted successfully")
        .created())
}

/// Status update body
#[derive(Debug, Deserialize)]
pub struct UpdateReport {
    pub status: ReportStatus,
}

/// Update a report's status
///
/// PATCH /api/reports/:id
async fn update_report(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(body): Json<UpdateReport>,
) -> AppResult<ApiResponse<Report>> {
    let report = state
        .reports
        .update_status(id, body.status)
        .ok_or_else(|| AppError::NotFound("Report not found".to_string()))?;
    Ok(ApiResponse::success(report).with_message("Report updated successfully"))
}
