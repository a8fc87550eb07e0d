//! SMS webhook
//!
//! The reply travels over a separate channel (the notification gateway);
//! the webhook's own HTTP response is only an acknowledgment. The upstream
//! transport retries anything that does not look like success, so this
//! handler always returns 200 regardless of delivery outcome: "I received
//! it" is deliberately distinct from "I was able to notify the user".

use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;
use serde::Deserialize;
use std::sync::Arc;

use super::SmsInterpreter;
use crate::features::AppState;

/// Reply attempted when delivery of the real reply fails
const FALLBACK_REPLY: &str = "Sorry, we encountered an error. Please try again later.";

/// Gateway SMS callback parameters
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsRequest {
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub link_id: String,
}

/// Handle one inbound SMS
///
/// POST /sms
pub async fn handle_sms(
    State(state): State<AppState>,
    Form(request): Form<SmsRequest>,
) -> (StatusCode, &'static str) {
    tracing::info!(from = %request.from, text = %request.text, "SMS received");

    let interpreter = SmsInterpreter::new(Arc::clone(&state.catalog), Arc::clone(&state.reports));
    let reply = interpreter.interpret(&request.text, &request.from);

    match state.gateway.send(&request.from, &reply).await {
        Ok(receipt) => {
            tracing::info!(to = %request.from, status = %receipt.status, "SMS reply dispatched");
            (StatusCode::OK, "Received")
        },
        Err(e) => {
            tracing::error!(to = %request.from, error = %e, "SMS reply delivery failed");
            // One best-effort fallback notification; its outcome changes nothing.
            if let Err(e) = state.gateway.send(&request.from, FALLBACK_REPLY).await {
                tracing::error!(to = %request.from, error = %e, "Fallback SMS also failed");
            }
            (StatusCode::OK, "Error handled")
        },
    }
}
