//! Africa's Talking SMS client

use async_trait::async_trait;
use serde::Deserialize;

use super::{DeliveryReceipt, GatewayError, NotificationGateway};
use crate::config::SmsConfig;

/// Live SMS gateway backed by the Africa's Talking messaging API
#[derive(Debug, Clone)]
pub struct AfricasTalkingGateway {
    client: reqwest::Client,
    endpoint: String,
    username: String,
    api_key: String,
    sender_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SendResponse {
    #[serde(rename = "SMSMessageData")]
    sms_message_data: MessageData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MessageData {
    recipients: Vec<Recipient>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Recipient {
    status: String,
    message_id: Option<String>,
}

impl AfricasTalkingGateway {
    /// Build a gateway from SMS configuration.
    ///
    /// Returns `None` when no API key is configured; the caller falls back
    /// to the simulated gateway.
    pub fn from_config(config: &SmsConfig) -> Option<Self> {
        let api_key = config.api_key.clone()?;
        Some(Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            username: config.username.clone(),
            api_key,
            sender_id: config.sender_id.clone(),
        })
    }
}

#[async_trait]
impl NotificationGateway for AfricasTalkingGateway {
    async fn send(&self, to: &str, message: &str) -> Result<DeliveryReceipt, GatewayError> {
        let mut form = vec![
            ("username", self.username.as_str()),
            ("to", to),
            ("message", message),
        ];
        if let Some(ref sender) = self.sender_id {
            form.push(("from", sender.as_str()));
        }

        tracing::debug!(to = %to, length = message.len(), "Sending SMS via Africa's Talking");

        let response = self
            .client
            .post(&self.endpoint)
            .header("apiKey", &self.api_key)
            .header("Accept", "application/json")
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SendResponse = response.json().await?;
        let recipient = parsed.sms_message_data.recipients.into_iter().next();

        match recipient {
            Some(r) => {
                tracing::info!(to = %to, status = %r.status, "SMS dispatched");
                Ok(DeliveryReceipt {
                    status: r.status,
                    message_id: r.message_id,
                })
            },
            None => Err(GatewayError::Rejected {
                status: status.as_u16(),
                body: "no recipients in API response".to_string(),
            }),
        }
    }
}
