//! Catalog routes
//!
//! Read-only lookups over the predefined route catalog, plus the exact
//! origin/destination fare estimate.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::api::ApiResponse;
use crate::catalog::{Route, TrafficStatus};
use crate::error::{AppError, AppResult};
use crate::features::AppState;

/// Create catalog routes
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/routes", get(list_routes))
        .route("/routes/:id", get(get_route))
        .route("/routes/search/:query", get(search_routes))
        .route("/fare-estimate", post(fare_estimate))
}

/// List all routes
///
/// GET /api/routes
async fn list_routes(State(state): State<AppState>) -> ApiResponse<Vec<Route>> {
    let data = state.catalog.all().to_vec();
    let count = data.len();
    ApiResponse::success_with_count(data, count)
}

/// Get a single route by its stable id
///
/// GET /api/routes/:id
async fn get_route(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> AppResult<ApiResponse<Route>> {
    let route = state
        .catalog
        .by_id(id)
        .cloned()
        .ok_or_else(|| AppError::NotFound("Route not found".to_string()))?;
    Ok(ApiResponse::success(route))
}

/// Search routes by name, origin, or destination
///
/// GET /api/routes/search/:query
async fn search_routes(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> ApiResponse<Vec<Route>> {
    let data: Vec<Route> = state
        .catalog
        .search_all(&query)
        .into_iter()
        .cloned()
        .collect();
    let count = data.len();
    ApiResponse::success_with_count(data, count)
}

/// Fare estimate request body
#[derive(Debug, Deserialize)]
pub struct FareEstimateRequest {
    pub from: String,
    pub to: String,
}

/// Fare estimate for an exact origin/destination pair
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FareEstimate {
    pub route: String,
    pub fare_range: String,
    pub estimated_time: String,
    pub distance: String,
    pub traffic_status: TrafficStatus,
}

/// Estimate the fare between two endpoints
///
/// POST /api/fare-estimate
async fn fare_estimate(
    State(state): State<AppState>,
    Json(request): Json<FareEstimateRequest>,
) -> AppResult<ApiResponse<FareEstimate>> {
    let route = state
        .catalog
        .by_endpoints(&request.from, &request.to)
        .ok_or_else(|| {
            AppError::NotFound("Route not found. Try searching for available routes.".to_string())
        })?;

    Ok(ApiResponse::success(FareEstimate {
        route: route.name.clone(),
        fare_range: route.fare.label(),
        estimated_time: route.estimated_time.label(),
        distance: route.distance.clone(),
        traffic_status: route.traffic_status,
    }))
}
