//! Payment Provider Abstraction

use async_trait::async_trait;

use crate::capture::CaptureResult;
use crate::error::Result;
use crate::order::{CreatedOrder, OrderRequest};

/// Payment provider trait (Strategy pattern)
///
/// Each call authenticates on its own; implementations hold no per-order
/// state, so ordering between create and capture is the provider's concern.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create an order awaiting buyer approval
    async fn create_order(&self, request: &OrderRequest) -> Result<CreatedOrder>;

    /// Capture a previously approved order
    async fn capture_order(&self, order_id: &str) -> Result<CaptureResult>;

    /// Provider name
    fn name(&self) -> &str;
}
