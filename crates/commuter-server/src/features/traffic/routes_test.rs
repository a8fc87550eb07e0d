//! Integration tests for traffic routes

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::features::test_helpers::test_router;

    #[tokio::test]
    async fn test_list_traffic_updates() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/traffic")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["count"], 3);
        assert_eq!(body["data"][0]["route"], "Thika Road");
        assert_eq!(body["data"][0]["status"], "heavy");
    }
}
