//! Router

use std::path::Path;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use checkout_core::api::{CAPTURE_PAYMENT_PREFIX, CREATE_ORDER_PATH};

use crate::handlers::{capture_payment, create_order, health_check};
use crate::state::AppState;

/// Build the service router; `static_dir` serves the web client with an
/// `index.html` fallback for client-side routes.
pub fn router(state: AppState, static_dir: Option<&Path>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = Router::new()
        .route("/health", get(health_check))
        .route(CREATE_ORDER_PATH, post(create_order))
        .route(
            &format!("{CAPTURE_PAYMENT_PREFIX}/{{order_id}}"),
            post(capture_payment),
        );

    if let Some(dir) = static_dir {
        let spa = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
        app = app.fallback_service(spa);
    }

    app.layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{Duration, Utc};
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use checkout_core::api::capture_path;
    use checkout_core::{
        CaptureResponse, CheckoutFlow, CheckoutState, CreateOrderResponse, Destination,
        ErrorResponse, FlowError, OrderApi, Tier,
    };
    use checkout_payments::{CheckoutService, OrderRequest, PayPalClient, PayPalConfig};

    async fn provider() -> MockServer {
        MockServer::start().await
    }

    async fn mount_token(server: &MockServer, times: u64) {
        Mock::given(method("POST"))
            .and(path("/v1/oauth2/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "A21AA-test",
                "token_type": "Bearer",
                "expires_in": 32400
            })))
            .expect(times)
            .mount(server)
            .await;
    }

    async fn mount_create(server: &MockServer, response: ResponseTemplate, times: u64) {
        Mock::given(method("POST"))
            .and(path("/v2/checkout/orders"))
            .respond_with(response)
            .expect(times)
            .mount(server)
            .await;
    }

    async fn mount_capture(server: &MockServer, order_id: &str, response: ResponseTemplate, times: u64) {
        Mock::given(method("POST"))
            .and(path(format!("/v2/checkout/orders/{order_id}/capture")))
            .respond_with(response)
            .expect(times)
            .mount(server)
            .await;
    }

    fn order_created(id: &str) -> ResponseTemplate {
        ResponseTemplate::new(201).set_body_json(json!({
            "id": id,
            "status": "PAYER_ACTION_REQUIRED",
            "links": [{"href": format!("https://www.sandbox.paypal.com/checkoutnow?token={id}"), "rel": "payer-action"}]
        }))
    }

    fn capture_with_status(id: &str, status: &str) -> ResponseTemplate {
        ResponseTemplate::new(201).set_body_json(json!({
            "id": id,
            "status": status,
            "payer": {"email_address": "a@b.com"}
        }))
    }

    fn app(server: &MockServer) -> Router {
        let config = PayPalConfig::new(server.uri(), "client-id", "client-secret");
        let order = OrderRequest::single_item(&config);
        let client = PayPalClient::new(config).unwrap();
        router(AppState::new(CheckoutService::new(Arc::new(client), order)), None)
    }

    async fn send_post(app: &Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(Request::builder().method("POST").uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    async fn test_create_order_returns_nested_order() {
        let server = provider().await;
        mount_token(&server, 1).await;
        mount_create(&server, order_created("5O190127TN364715T"), 1).await;

        let (status, body) = send_post(&app(&server), "/paypal/createorder").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["order"]["id"], "5O190127TN364715T");
        assert_eq!(body["order"]["status"], "PAYER_ACTION_REQUIRED");
    }

    #[tokio::test]
    async fn test_create_order_relays_provider_status() {
        let server = provider().await;
        mount_token(&server, 1).await;
        mount_create(
            &server,
            ResponseTemplate::new(500).set_body_json(json!({"name": "INTERNAL_SERVER_ERROR", "message": "An internal server error occurred."})),
            1,
        )
        .await;

        let (status, body) = send_post(&app(&server), "/paypal/createorder").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "An internal server error occurred.");
        assert_eq!(body["details"]["name"], "INTERNAL_SERVER_ERROR");
    }

    #[tokio::test]
    async fn test_token_rejection_is_relayed() {
        let server = provider().await;
        Mock::given(method("POST"))
            .and(path("/v1/oauth2/token"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "invalid_client"})))
            .mount(&server)
            .await;
        mount_create(&server, order_created("UNUSED"), 0).await;

        let (status, body) = send_post(&app(&server), "/paypal/createorder").await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Failed to get access token");
        assert_eq!(body["code"], "TOKEN_ERROR");
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_500() {
        // nothing listens on the discard port
        let config = PayPalConfig::new("http://127.0.0.1:9", "client-id", "client-secret");
        let order = OrderRequest::single_item(&config);
        let client = PayPalClient::new(config).unwrap();
        let app = router(AppState::new(CheckoutService::new(Arc::new(client), order)), None);

        let (status, body) = send_post(&app, "/paypal/createorder").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to get access token");
    }

    #[tokio::test]
    async fn test_completed_capture_returns_session_update() {
        let server = provider().await;
        mount_token(&server, 1).await;
        mount_capture(&server, "ORDER-1", capture_with_status("ORDER-1", "COMPLETED"), 1).await;

        let before = Utc::now();
        let (status, body) = send_post(&app(&server), "/paypal/capturepayment/ORDER-1").await;
        let after = Utc::now();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["email"], "a@b.com");
        assert_eq!(body["user"]["tier"], "pro");
        assert_eq!(body["capture"]["status"], "COMPLETED");
        assert!(body["message"].is_string());

        let response: CaptureResponse = serde_json::from_value(body).unwrap();
        let end = response.user.tier_end_at;
        assert!(end >= before + Duration::days(30));
        assert!(end <= after + Duration::days(30));
    }

    #[tokio::test]
    async fn test_declined_capture_is_400_without_session() {
        let server = provider().await;
        mount_token(&server, 1).await;
        mount_capture(&server, "ORDER-2", capture_with_status("ORDER-2", "DECLINED"), 1).await;

        let (status, body) = send_post(&app(&server), "/paypal/capturepayment/ORDER-2").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "CAPTURE_NOT_COMPLETED");
        assert_eq!(body["details"]["status"], "DECLINED");
        assert!(body.get("user").is_none());
    }

    #[tokio::test]
    async fn test_fabricated_order_id_relays_provider_error() {
        let server = provider().await;
        mount_token(&server, 1).await;
        mount_capture(
            &server,
            "NEVER-CREATED",
            ResponseTemplate::new(404).set_body_json(json!({
                "name": "RESOURCE_NOT_FOUND",
                "message": "The specified resource does not exist."
            })),
            1,
        )
        .await;

        let (status, body) = send_post(&app(&server), "/paypal/capturepayment/NEVER-CREATED").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "The specified resource does not exist.");
        assert_eq!(body["code"], "PROVIDER_ERROR");
    }

    #[tokio::test]
    async fn test_create_and_capture_fetch_separate_tokens() {
        let server = provider().await;
        mount_token(&server, 2).await;
        mount_create(&server, order_created("ORDER-3"), 1).await;
        mount_capture(&server, "ORDER-3", capture_with_status("ORDER-3", "COMPLETED"), 1).await;

        let app = app(&server);
        let (status, _) = send_post(&app, "/paypal/createorder").await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send_post(&app, "/paypal/capturepayment/ORDER-3").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_and_method_guard() {
        let server = provider().await;
        let app = app(&server);

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::builder().uri("/paypal/createorder").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    // ------------------------------------------------------------------------
    // Checkout client driven against the in-process router
    // ------------------------------------------------------------------------

    struct RouterApi {
        app: Router,
    }

    impl RouterApi {
        async fn call(&self, uri: &str) -> checkout_core::Result<Value> {
            let (status, body) = send_post(&self.app, uri).await;
            if status.is_success() {
                return Ok(body);
            }
            let error: ErrorResponse = serde_json::from_value(body)
                .map_err(|e| FlowError::Decode(e.to_string()))?;
            Err(FlowError::Service {
                status: status.as_u16(),
                message: error.error,
            })
        }
    }

    #[async_trait(?Send)]
    impl OrderApi for RouterApi {
        async fn create_order(&self) -> checkout_core::Result<CreateOrderResponse> {
            let body = self.call(CREATE_ORDER_PATH).await?;
            serde_json::from_value(body).map_err(|e| FlowError::Decode(e.to_string()))
        }

        async fn capture_order(&self, order_id: &str) -> checkout_core::Result<CaptureResponse> {
            let body = self.call(&capture_path(order_id)).await?;
            serde_json::from_value(body).map_err(|e| FlowError::Decode(e.to_string()))
        }
    }

    #[tokio::test]
    async fn test_scenario_completed_payment() {
        let server = provider().await;
        mount_token(&server, 2).await;
        mount_create(&server, order_created("ORDER-4"), 1).await;
        mount_capture(&server, "ORDER-4", capture_with_status("ORDER-4", "COMPLETED"), 1).await;

        let flow = CheckoutFlow::new(RouterApi { app: app(&server) });
        let order_id = flow.create().await.unwrap();
        let destination = flow.approve(Some(&order_id)).await;

        assert_eq!(destination.path(), "/complete-payment");
        match flow.state() {
            CheckoutState::Captured { session } => {
                assert_eq!(session.tier, Tier::Pro);
                assert_eq!(session.email.as_deref(), Some("a@b.com"));
            }
            other => panic!("expected captured, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_scenario_create_failure_never_captures() {
        let server = provider().await;
        mount_token(&server, 1).await;
        mount_create(&server, ResponseTemplate::new(500), 1).await;
        Mock::given(method("POST"))
            .and(wiremock::matchers::path_regex(r"^/v2/checkout/orders/.+/capture$"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let flow = CheckoutFlow::new(RouterApi { app: app(&server) });

        let err = flow.create().await.unwrap_err();
        assert!(matches!(err, FlowError::Service { status: 500, .. }));
        assert_eq!(flow.fail(err.user_message()), Destination::Cancel);
        assert_eq!(Destination::Cancel.path(), "/cancel-payment");
    }

    #[tokio::test]
    async fn test_scenario_declined_capture_cancels() {
        let server = provider().await;
        mount_token(&server, 2).await;
        mount_create(&server, order_created("ORDER-5"), 1).await;
        mount_capture(&server, "ORDER-5", capture_with_status("ORDER-5", "DECLINED"), 1).await;

        let flow = CheckoutFlow::new(RouterApi { app: app(&server) });
        let order_id = flow.create().await.unwrap();

        assert_eq!(flow.approve(Some(&order_id)).await.path(), "/cancel-payment");
        assert!(matches!(flow.state(), CheckoutState::Cancelled { .. }));
    }
}
