//! Session Update
//!
//! Fields derived from a completed capture, handed back to the caller so an
//! external user/session store can persist them.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// How long a purchase extends the paid tier
pub const TIER_EXTENSION_DAYS: i64 = 30;

/// Account tiers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Free,
    Pro,
}

impl Tier {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session fields produced by a successful capture
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUpdate {
    /// Payer email as reported by the provider
    pub email: Option<String>,

    /// Tier granted by the purchase
    pub tier: Tier,

    /// When the granted tier lapses
    pub tier_end_at: DateTime<Utc>,
}

impl SessionUpdate {
    /// Grant the pro tier for [`TIER_EXTENSION_DAYS`] starting at `now`
    pub fn pro(email: Option<String>, now: DateTime<Utc>) -> Self {
        Self {
            email,
            tier: Tier::Pro,
            tier_end_at: now + Duration::days(TIER_EXTENSION_DAYS),
        }
    }
}
