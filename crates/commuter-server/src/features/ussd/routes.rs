//! USSD webhook
//!
//! The telecom gateway POSTs one form-encoded request per dialog step and
//! renders whatever plain-text body comes back, treating a `CON ` prefix as
//! "prompt for more input" and `END ` as "terminate the dialog". A request
//! without a session id or phone number is malformed and rejected at the
//! extractor boundary.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Form;
use serde::Deserialize;
use std::sync::Arc;

use super::UssdEngine;
use crate::features::AppState;

/// Gateway USSD callback parameters
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UssdRequest {
    pub session_id: String,
    /// Dialed service code; carried by the protocol but unused here
    #[serde(default)]
    pub service_code: String,
    pub phone_number: String,
    /// Full accumulated dialog text, empty on the first request
    #[serde(default)]
    pub text: String,
}

/// Handle one USSD dialog step
///
/// POST /ussd
pub async fn handle_ussd(
    State(state): State<AppState>,
    Form(request): Form<UssdRequest>,
) -> Response {
    tracing::info!(
        session_id = %request.session_id,
        text = %request.text,
        "USSD step received"
    );

    let engine = UssdEngine::new(
        Arc::clone(&state.catalog),
        Arc::clone(&state.sessions),
        Arc::clone(&state.reports),
    );
    let reply = engine.step(&request.session_id, &request.phone_number, &request.text);

    (
        [(header::CONTENT_TYPE, "text/plain")],
        reply.render(),
    )
        .into_response()
}
