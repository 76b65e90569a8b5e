//! Payment Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Payment-related errors
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Client-credentials exchange failed
    #[error("Failed to get access token")]
    Token {
        /// Provider status, when the token endpoint answered
        status: Option<u16>,
        details: Option<serde_json::Value>,
    },

    /// Provider answered an order call with a non-success status
    #[error("PayPal error ({status}): {message}")]
    Provider {
        status: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// Provider call exceeded the configured timeout
    #[error("PayPal request timed out")]
    Timeout,

    /// Network-level failure
    #[error("PayPal request failed: {0}")]
    Transport(String),

    /// Provider payload did not have the expected shape
    #[error("Unexpected PayPal response: {0}")]
    Decode(String),
}

impl PaymentError {
    /// HTTP status to relay to the caller
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Token {
                status: Some(status),
                ..
            }
            | Self::Provider { status, .. } => *status,
            Self::Timeout => 504,
            _ => 500,
        }
    }

    /// Provider payload or context to attach to the error body
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            Self::Token { details, .. } | Self::Provider { details, .. } => details.clone(),
            Self::Transport(msg) | Self::Decode(msg) => Some(serde_json::Value::String(msg.clone())),
            _ => None,
        }
    }

    /// Stable code for the error body
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Token { .. } => "TOKEN_ERROR",
            Self::Provider { .. } => "PROVIDER_ERROR",
            Self::Timeout => "PROVIDER_TIMEOUT",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Decode(_) => "INVALID_PROVIDER_RESPONSE",
        }
    }

    /// Get user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            Self::Provider { message, .. } => message.clone(),
            Self::Config(_) => "Service configuration error.".into(),
            _ => self.to_string(),
        }
    }

    pub(crate) fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
