//! Integration tests for the SMS webhook

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        Router,
    };
    use tower::ServiceExt;

    use crate::catalog::RouteCatalog;
    use crate::features::{router, AppState};
    use crate::gateway::{DeliveryReceipt, GatewayError, NotificationGateway};
    use crate::store::{ReportStore, SessionStore};

    /// Records every delivery attempt; fails the first `fail_first` of them.
    #[derive(Default)]
    struct RecordingGateway {
        fail_first: usize,
        sent: Mutex<Vec<(String, String)>>,
    }

    impl RecordingGateway {
        fn failing(fail_first: usize) -> Self {
            Self {
                fail_first,
                ..Self::default()
            }
        }

        fn sent(&self) -> Vec<(String, String)> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NotificationGateway for RecordingGateway {
        async fn send(&self, to: &str, message: &str) -> Result<DeliveryReceipt, GatewayError> {
            let mut sent = self.sent.lock().unwrap();
            sent.push((to.to_string(), message.to_string()));
            if sent.len() <= self.fail_first {
                return Err(GatewayError::Rejected {
                    status: 500,
                    body: "boom".to_string(),
                });
            }
            Ok(DeliveryReceipt {
                status: "Success".to_string(),
                message_id: Some("ATXid_test".to_string()),
            })
        }
    }

    fn state_with(gateway: Arc<RecordingGateway>) -> AppState {
        AppState {
            catalog: Arc::new(RouteCatalog::nairobi()),
            reports: Arc::new(ReportStore::new()),
            sessions: Arc::new(SessionStore::new(Duration::from_secs(60))),
            gateway,
        }
    }

    async fn text_in(app: Router, path: &str, text: &str) -> (StatusCode, String) {
        let body = format!("from=%2B254722000333&to=40141&text={text}");
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(path)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_reply_is_sent_through_the_gateway() {
        let gateway = Arc::new(RecordingGateway::default());
        let state = state_with(Arc::clone(&gateway));

        let (status, ack) = text_in(router(state), "/sms", "help").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ack, "Received");

        let sent = gateway.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "+254722000333");
        assert!(sent[0].1.contains("NAIROBI COMMUTER INFO"));
    }

    #[tokio::test]
    async fn test_webhook_is_mounted_under_api_as_well() {
        let gateway = Arc::new(RecordingGateway::default());
        let state = state_with(Arc::clone(&gateway));

        let (status, _) = text_in(router(state), "/api/sms", "routes").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(gateway.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_delivery_failure_still_acknowledges_success() {
        let gateway = Arc::new(RecordingGateway::failing(2));
        let state = state_with(Arc::clone(&gateway));

        let (status, ack) = text_in(router(state), "/sms", "fare 1").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(ack, "Error handled");

        // Reply plus one fallback attempt, both failed, neither surfaced.
        assert_eq!(gateway.sent().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_delivery_attempts_a_fallback_apology() {
        let gateway = Arc::new(RecordingGateway::failing(1));
        let state = state_with(Arc::clone(&gateway));

        let (status, _) = text_in(router(state), "/sms", "traffic").await;
        assert_eq!(status, StatusCode::OK);

        let sent = gateway.sent();
        assert_eq!(sent.len(), 2);
        assert!(sent[1].1.starts_with("Sorry, we encountered an error"));
    }

    #[tokio::test]
    async fn test_report_command_writes_to_the_shared_store() {
        let gateway = Arc::new(RecordingGateway::default());
        let state = state_with(Arc::clone(&gateway));

        let (status, _) = text_in(
            router(state.clone()),
            "/sms",
            "report kca123a 46 overcharging",
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let all = state.reports.list();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].vehicle, "KCA123A");
        assert_eq!(all[0].reporter, "+254722000333");
    }
}
