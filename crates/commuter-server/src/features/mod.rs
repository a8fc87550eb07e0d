//! Feature modules implementing the commuter-info channels
//!
//! Each feature is a vertical slice owning its HTTP routes:
//!
//! - **ussd**: the USSD webhook and menu session engine
//! - **sms**: the SMS webhook and command interpreter
//! - **catalog**: REST route listing, lookup, search, and fare estimates
//! - **traffic**: REST traffic updates
//! - **reports**: REST report listing, creation, and status updates
//! - **stats**: REST service statistics

pub mod catalog;
pub mod reports;
pub mod sms;
pub mod stats;
pub mod traffic;
pub mod ussd;

use std::sync::Arc;

use axum::routing::post;
use axum::Router;

use crate::catalog::RouteCatalog;
use crate::gateway::NotificationGateway;
use crate::store::{ReportStore, SessionStore};

/// Shared state for all feature routes
///
/// The catalog is read-only; the report and session stores serialize their
/// own mutation internally, so handlers just clone the `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<RouteCatalog>,
    pub reports: Arc<ReportStore>,
    pub sessions: Arc<SessionStore>,
    pub gateway: Arc<dyn NotificationGateway>,
}

/// Creates the application router with all feature routes mounted
///
/// Webhooks live at the root (`/ussd`, `/sms`) per the telecom gateway
/// callbacks; `/test-ussd` is a local simulation alias. The REST API is
/// nested under `/api`, where the SMS webhook is mounted a second time.
pub fn router(state: AppState) -> Router<()> {
    let api = Router::new()
        .merge(catalog::catalog_routes())
        .merge(traffic::traffic_routes())
        .merge(reports::reports_routes())
        .merge(stats::stats_routes())
        .route("/sms", post(sms::handle_sms));

    Router::new()
        .route("/ussd", post(ussd::handle_ussd))
        .route("/test-ussd", post(ussd::handle_ussd))
        .route("/sms", post(sms::handle_sms))
        .nest("/api", api)
        .with_state(state)
}
