//! Order Service Wire Types
//!
//! JSON bodies exchanged between the checkout client and the order service.
//! Provider payloads are carried through as opaque JSON.

use serde::{Deserialize, Serialize};

use crate::session::SessionUpdate;

/// Order creation endpoint
pub const CREATE_ORDER_PATH: &str = "/paypal/createorder";

/// Capture endpoint prefix; the order identifier is the final path segment
pub const CAPTURE_PAYMENT_PREFIX: &str = "/paypal/capturepayment";

/// Landing page after a completed capture
pub const COMPLETE_PAYMENT_PATH: &str = "/complete-payment";

/// Landing page for every failure path
pub const CANCEL_PAYMENT_PATH: &str = "/cancel-payment";

/// Capture endpoint for a specific order
pub fn capture_path(order_id: &str) -> String {
    format!("{CAPTURE_PAYMENT_PREFIX}/{}", urlencoding::encode(order_id))
}

/// `POST /paypal/createorder` success body
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    /// Provider order object, unmodified
    pub order: serde_json::Value,
}

impl CreateOrderResponse {
    /// The identifier the client approves and later captures
    pub fn order_id(&self) -> Option<&str> {
        self.order
            .get("id")
            .and_then(serde_json::Value::as_str)
            .filter(|id| !id.is_empty())
    }
}

/// `POST /paypal/capturepayment/:orderID` success body
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CaptureResponse {
    pub message: String,

    /// Session fields for the external user store
    pub user: SessionUpdate,

    /// Provider capture payload, unmodified
    pub capture: serde_json::Value,
}

/// Error body returned by every failing order service call
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,

    /// Stable machine-readable code
    #[serde(default)]
    pub code: String,

    /// Provider payload or extra context, when available
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_id_from_nested_order() {
        let body: CreateOrderResponse =
            serde_json::from_value(json!({"order": {"id": "5O190127TN364715T", "status": "CREATED"}}))
                .unwrap();
        assert_eq!(body.order_id(), Some("5O190127TN364715T"));
    }

    #[test]
    fn test_order_id_missing_or_empty() {
        let empty = CreateOrderResponse { order: json!({"id": ""}) };
        let missing = CreateOrderResponse { order: json!({"status": "CREATED"}) };
        let numeric = CreateOrderResponse { order: json!({"id": 42}) };

        assert_eq!(empty.order_id(), None);
        assert_eq!(missing.order_id(), None);
        assert_eq!(numeric.order_id(), None);
    }

    #[test]
    fn test_capture_path_escapes_segment() {
        assert_eq!(capture_path("ABC123"), "/paypal/capturepayment/ABC123");
        assert_eq!(capture_path("a/b c"), "/paypal/capturepayment/a%2Fb%20c");
        assert_eq!(capture_path("../x?y#z"), "/paypal/capturepayment/..%2Fx%3Fy%23z");
    }

    #[test]
    fn test_error_body_omits_empty_details() {
        let json = serde_json::to_value(ErrorResponse::new("boom", "CREATE_ORDER_FAILED")).unwrap();
        assert_eq!(json, json!({"error": "boom", "code": "CREATE_ORDER_FAILED"}));

        let parsed: ErrorResponse = serde_json::from_value(json!({"error": "x"})).unwrap();
        assert!(parsed.code.is_empty());
    }
}
