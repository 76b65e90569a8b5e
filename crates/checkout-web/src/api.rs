//! API Client

use async_trait::async_trait;
use checkout_core::api::{CREATE_ORDER_PATH, capture_path};
use checkout_core::{CaptureResponse, CreateOrderResponse, ErrorResponse, FlowError, OrderApi};

/// Order service reached over `fetch` from the page's own origin
pub struct HttpOrderApi {
    client: reqwest::Client,
    origin: String,
}

impl Default for HttpOrderApi {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpOrderApi {
    pub fn new() -> Self {
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_else(|| "http://localhost:3000".into());

        Self {
            client: reqwest::Client::new(),
            origin,
        }
    }

    async fn post(&self, path: &str) -> Result<serde_json::Value, FlowError> {
        let response = self
            .client
            .post(format!("{}{}", self.origin, path))
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| FlowError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| FlowError::Decode(e.to_string()));
        }

        let message = response
            .json::<ErrorResponse>()
            .await
            .map_or_else(|_| "Unknown error".to_string(), |body| body.error);

        leptos::logging::error!("Order service responded {}: {}", status.as_u16(), message);

        Err(FlowError::Service {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait(?Send)]
impl OrderApi for HttpOrderApi {
    async fn create_order(&self) -> Result<CreateOrderResponse, FlowError> {
        let body = self.post(CREATE_ORDER_PATH).await?;
        serde_json::from_value(body).map_err(|e| FlowError::Decode(e.to_string()))
    }

    async fn capture_order(&self, order_id: &str) -> Result<CaptureResponse, FlowError> {
        let body = self.post(&capture_path(order_id)).await?;
        serde_json::from_value(body).map_err(|e| FlowError::Decode(e.to_string()))
    }
}
