//! Error Types

use thiserror::Error;

/// Result type alias for checkout client operations
pub type Result<T> = std::result::Result<T, FlowError>;

/// Failures seen by the checkout client
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// Order service answered with a non-success status
    #[error("Order service responded {status}: {message}")]
    Service { status: u16, message: String },

    /// Request never completed (network, browser, timeout)
    #[error("Request failed: {0}")]
    Transport(String),

    /// Response body could not be read
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Create succeeded but no usable `order.id` came back
    #[error("Invalid order ID received from backend. Expected 'order.id'.")]
    MissingOrderId,

    /// Operation is not valid in the current checkout state
    #[error("Checkout already {0}")]
    InvalidState(&'static str),
}

impl FlowError {
    /// Short text suitable for the payment widget
    pub fn user_message(&self) -> String {
        match self {
            Self::Service { status, message } => {
                format!("Payment server error ({status}): {message}")
            }
            Self::Transport(_) => "Could not reach the payment server.".into(),
            _ => self.to_string(),
        }
    }
}
