//! Application State

use std::sync::Arc;

use checkout_payments::CheckoutService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Order service backed by the payment provider
    pub checkout: Arc<CheckoutService>,
}

impl AppState {
    pub fn new(checkout: CheckoutService) -> Self {
        Self {
            checkout: Arc::new(checkout),
        }
    }
}
