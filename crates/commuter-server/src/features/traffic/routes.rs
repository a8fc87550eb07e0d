//! Traffic routes

use axum::extract::State;
use axum::routing::get;
use axum::Router;

use crate::api::ApiResponse;
use crate::catalog::TrafficUpdate;
use crate::features::AppState;

/// Create traffic routes
pub fn traffic_routes() -> Router<AppState> {
    Router::new().route("/traffic", get(list_traffic))
}

/// List current traffic updates
///
/// GET /api/traffic
async fn list_traffic(State(state): State<AppState>) -> ApiResponse<Vec<TrafficUpdate>> {
    let data = state.catalog.updates().to_vec();
    let count = data.len();
    ApiResponse::success_with_count(data, count)
}
