//! Access Tokens
//!
//! Client-credentials tokens and the optional short-lived cache.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

/// Tokens are dropped from the cache this long before the provider expiry
pub const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Lifetime assumed when the provider omits `expires_in`
const DEFAULT_LIFETIME: Duration = Duration::from_secs(300);

/// Upper bound on any provider-reported lifetime
const MAX_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

/// `POST /v1/oauth2/token` response fields we read
#[derive(Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Bearer credential, never exposed outside the provider client
#[derive(Clone, Debug)]
pub struct AccessToken {
    value: Secret<String>,
    expires_at: Instant,
}

impl AccessToken {
    /// `lifetime` is clamped to one day
    pub fn new(value: impl Into<String>, lifetime: Duration) -> Self {
        let now = Instant::now();
        Self {
            value: Secret::new(value.into()),
            expires_at: now.checked_add(lifetime.min(MAX_LIFETIME)).unwrap_or(now),
        }
    }

    pub(crate) fn from_response(response: TokenResponse) -> Self {
        let lifetime = response
            .expires_in
            .map_or(DEFAULT_LIFETIME, Duration::from_secs);
        Self::new(response.access_token, lifetime)
    }

    pub(crate) fn bearer(&self) -> &str {
        self.value.expose_secret()
    }

    /// Still usable at `now`, keeping [`EXPIRY_MARGIN`] in reserve
    pub fn is_fresh_at(&self, now: Instant) -> bool {
        now.checked_add(EXPIRY_MARGIN)
            .is_some_and(|deadline| deadline < self.expires_at)
    }
}

/// Cache key for a client id and secret pair.
///
/// Hex SHA-256 of both, so the secret itself is never held as a key.
pub fn credential_key(client_id: &str, client_secret: &Secret<String>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(client_id.as_bytes());
    hasher.update([0]);
    hasher.update(client_secret.expose_secret().as_bytes());
    hex::encode(hasher.finalize())
}

/// Tokens keyed by [`credential_key`]
#[derive(Debug, Default)]
pub struct TokenCache {
    entries: RwLock<HashMap<String, AccessToken>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached token for `key`, if it is still fresh
    pub async fn get(&self, key: &str) -> Option<AccessToken> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|token| token.is_fresh_at(Instant::now()))
            .cloned()
    }

    pub async fn put(&self, key: &str, token: AccessToken) {
        self.entries.write().await.insert(key.to_string(), token);
    }

    pub async fn invalidate(&self, key: &str) {
        self.entries.write().await.remove(key);
    }
}
