//! Capture Results

use serde_json::Value;

/// Capture status as reported by the provider
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaptureStatus {
    Completed,
    /// Anything else (`DECLINED`, `PENDING`, missing, ...)
    Other(String),
}

impl CaptureStatus {
    pub fn parse(status: Option<&str>) -> Self {
        match status {
            Some("COMPLETED") => Self::Completed,
            Some(other) => Self::Other(other.to_string()),
            None => Self::Other(String::new()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Completed => "COMPLETED",
            Self::Other(status) => status,
        }
    }
}

/// Fields read from a capture response
#[derive(Clone, Debug)]
pub struct CaptureResult {
    pub status: CaptureStatus,
    pub payer_email: Option<String>,
    /// Full provider payload
    pub raw: Value,
}

impl CaptureResult {
    pub fn from_raw(raw: Value) -> Self {
        let status = CaptureStatus::parse(raw.get("status").and_then(Value::as_str));
        let payer_email = raw
            .pointer("/payer/email_address")
            .and_then(Value::as_str)
            .map(str::to_owned);

        Self {
            status,
            payer_email,
            raw,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == CaptureStatus::Completed
    }
}
