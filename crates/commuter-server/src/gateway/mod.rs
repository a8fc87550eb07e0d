//! Outbound SMS delivery
//!
//! The SMS interpreter replies over a separate channel, not in the webhook's
//! HTTP response. This module is that channel: a [`NotificationGateway`]
//! trait with a live Africa's Talking implementation and a simulated one
//! used whenever no API key is configured. Delivery failures are the
//! caller's problem to isolate; nothing here retries.

mod africastalking;

pub use africastalking::AfricasTalkingGateway;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the outbound SMS transport
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("SMS transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("SMS API rejected the message: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Outcome of a delivery attempt
#[derive(Debug, Clone)]
pub struct DeliveryReceipt {
    /// Transport-reported status, e.g. "Success" or "simulated"
    pub status: String,
    pub message_id: Option<String>,
}

/// Delivers one text message to one phone number
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    async fn send(&self, to: &str, message: &str) -> Result<DeliveryReceipt, GatewayError>;
}

/// Gateway used when no SMS credentials are configured.
///
/// Logs what would have been sent and reports success, so the rest of the
/// service behaves identically with and without a live transport.
#[derive(Debug, Default)]
pub struct SimulatedGateway;

#[async_trait]
impl NotificationGateway for SimulatedGateway {
    async fn send(&self, to: &str, message: &str) -> Result<DeliveryReceipt, GatewayError> {
        tracing::info!(
            to = %to,
            length = message.len(),
            "SMS delivery simulated (no API key configured)"
        );
        tracing::debug!(message = %message, "Simulated SMS body");
        Ok(DeliveryReceipt {
            status: "simulated".to_string(),
            message_id: None,
        })
    }
}
