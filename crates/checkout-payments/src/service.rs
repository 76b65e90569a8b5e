//! Checkout Service
//!
//! The two order service operations: create an order for the configured item,
//! and capture an approved order into a Session Update.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use checkout_core::SessionUpdate;

use crate::capture::CaptureResult;
use crate::error::Result;
use crate::order::{CreatedOrder, OrderRequest};
use crate::provider::PaymentProvider;

/// Result of a capture attempt the provider answered successfully
#[derive(Clone, Debug)]
pub enum CaptureOutcome {
    /// Status was exactly `COMPLETED`
    Completed {
        session: SessionUpdate,
        capture: CaptureResult,
    },
    /// Any other status; reported, never retried
    NotCompleted { capture: CaptureResult },
}

/// Order service
#[derive(Clone)]
pub struct CheckoutService {
    provider: Arc<dyn PaymentProvider>,
    order: OrderRequest,
}

impl CheckoutService {
    /// `order` is the fixed payload sent on every create
    pub fn new(provider: Arc<dyn PaymentProvider>, order: OrderRequest) -> Self {
        Self { provider, order }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Create a provider order
    pub async fn create_order(&self) -> Result<CreatedOrder> {
        self.provider.create_order(&self.order).await
    }

    /// Capture `order_id`; a completed capture grants the tier from `now`
    pub async fn capture_order(&self, order_id: &str, now: DateTime<Utc>) -> Result<CaptureOutcome> {
        let capture = self.provider.capture_order(order_id).await?;

        if !capture.is_completed() {
            tracing::warn!(
                order_id = %order_id,
                status = %capture.status.as_str(),
                "Capture not completed"
            );
            return Ok(CaptureOutcome::NotCompleted { capture });
        }

        let session = SessionUpdate::pro(capture.payer_email.clone(), now);

        tracing::info!(
            order_id = %order_id,
            tier = %session.tier,
            tier_end_at = %session.tier_end_at,
            "Payment captured"
        );

        Ok(CaptureOutcome::Completed { session, capture })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::CaptureStatus;
    use crate::config::PayPalConfig;
    use crate::error::PaymentError;
    use async_trait::async_trait;
    use chrono::Duration;
    use checkout_core::Tier;
    use serde_json::json;
    use std::sync::Mutex;

    /// Provider returning a fixed capture payload
    struct StaticProvider {
        capture: serde_json::Value,
        captured: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl PaymentProvider for StaticProvider {
        async fn create_order(&self, request: &OrderRequest) -> Result<CreatedOrder> {
            assert_eq!(request.intent, "CAPTURE");
            CreatedOrder::from_raw(json!({"id": "ORDER-1", "status": "CREATED"}))
        }

        async fn capture_order(&self, order_id: &str) -> Result<CaptureResult> {
            self.captured.lock().unwrap().push(order_id.to_string());
            if order_id == "UNKNOWN" {
                return Err(PaymentError::Provider {
                    status: 404,
                    message: "The specified resource does not exist.".into(),
                    details: None,
                });
            }
            Ok(CaptureResult::from_raw(self.capture.clone()))
        }

        fn name(&self) -> &str {
            "Static"
        }
    }

    fn service(capture: serde_json::Value) -> CheckoutService {
        let config = PayPalConfig::new("https://api.test", "id", "secret");
        let provider = StaticProvider {
            capture,
            captured: Mutex::new(Vec::new()),
        };
        CheckoutService::new(Arc::new(provider), OrderRequest::single_item(&config))
    }

    #[tokio::test]
    async fn test_create_returns_provider_order() {
        let order = service(json!({})).create_order().await.unwrap();
        assert_eq!(order.id, "ORDER-1");
        assert_eq!(order.raw["status"], "CREATED");
    }

    #[tokio::test]
    async fn test_completed_capture_grants_thirty_days() {
        let service = service(json!({"status": "COMPLETED", "payer": {"email_address": "a@b.com"}}));
        let now = Utc::now();

        match service.capture_order("ORDER-1", now).await.unwrap() {
            CaptureOutcome::Completed { session, capture } => {
                assert_eq!(session.email.as_deref(), Some("a@b.com"));
                assert_eq!(session.tier, Tier::Pro);
                assert_eq!(session.tier_end_at - now, Duration::days(30));
                assert_eq!(capture.status, CaptureStatus::Completed);
            }
            other => panic!("expected completed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_declined_capture_builds_no_session() {
        let service = service(json!({"status": "DECLINED"}));

        match service.capture_order("ORDER-1", Utc::now()).await.unwrap() {
            CaptureOutcome::NotCompleted { capture } => {
                assert_eq!(capture.status.as_str(), "DECLINED");
                assert_eq!(capture.raw["status"], "DECLINED");
            }
            other => panic!("expected not completed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unknown_order_error_propagates() {
        let err = service(json!({"status": "COMPLETED"}))
            .capture_order("UNKNOWN", Utc::now())
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }
}
