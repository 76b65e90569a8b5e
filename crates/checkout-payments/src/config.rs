//! Provider Configuration
//!
//! Built once at startup and handed to the client; nothing reads the
//! environment per request.

use std::time::Duration;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use secrecy::Secret;

use crate::error::{PaymentError, Result};

/// PayPal sandbox REST endpoint
pub const SANDBOX_BASE_URL: &str = "https://api-m.sandbox.paypal.com";

/// Product sold by the checkout
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogItem {
    pub name: String,
    pub description: String,
    /// Unit price in USD
    pub price: Decimal,
}

impl Default for CatalogItem {
    fn default() -> Self {
        Self {
            name: "Pro plan (30 days)".into(),
            description: "30 days of pro tier access".into(),
            price: dec!(10.00),
        }
    }
}

/// PayPal client configuration
#[derive(Clone, Debug)]
pub struct PayPalConfig {
    /// REST API base URL
    pub base_url: String,

    /// OAuth client id
    pub client_id: String,

    /// OAuth client secret
    pub client_secret: Secret<String>,

    /// Public site URL used to build approve/cancel redirects
    pub return_base_url: String,

    /// Timeout applied to every provider call
    pub request_timeout: Duration,

    /// Reuse access tokens until shortly before they expire
    pub cache_tokens: bool,

    /// The single line item of every order
    pub item: CatalogItem,
}

impl PayPalConfig {
    pub fn new(
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client_id: client_id.into(),
            client_secret: Secret::new(client_secret.into()),
            return_base_url: "http://localhost:3000".into(),
            request_timeout: Duration::from_secs(30),
            cache_tokens: false,
            item: CatalogItem::default(),
        }
    }

    pub fn with_return_base_url(mut self, url: impl Into<String>) -> Self {
        self.return_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub const fn with_token_cache(mut self, enabled: bool) -> Self {
        self.cache_tokens = enabled;
        self
    }

    /// Create from any key/value source, e.g. `|key| std::env::var(key).ok()`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| PaymentError::Config(format!("{key} not set")))
        };

        let client_id = required("PAYPAL_CLIENT_ID")?;
        let client_secret = required("PAYPAL_CLIENT_SECRET")?;
        let base_url = lookup("PAYPAL_BASEURL").unwrap_or_else(|| SANDBOX_BASE_URL.into());

        let mut config = Self::new(base_url, client_id, client_secret);

        if let Some(url) = lookup("BASE_URL") {
            config = config.with_return_base_url(url);
        }

        if let Some(secs) = lookup("PAYPAL_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                PaymentError::Config(format!("PAYPAL_REQUEST_TIMEOUT_SECS is not a number: {secs}"))
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(flag) = lookup("PAYPAL_TOKEN_CACHE") {
            config.cache_tokens = matches!(flag.to_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }

        if let Some(name) = lookup("CHECKOUT_ITEM_NAME") {
            config.item.name = name;
        }

        if let Some(price) = lookup("CHECKOUT_ITEM_PRICE") {
            let price: Decimal = price.parse().map_err(|_| {
                PaymentError::Config(format!("CHECKOUT_ITEM_PRICE is not a decimal: {price}"))
            })?;
            if price <= Decimal::ZERO {
                return Err(PaymentError::Config("CHECKOUT_ITEM_PRICE must be positive".into()));
            }
            config.item.price = price;
        }

        Ok(config)
    }

    /// Redirect after the buyer approves
    pub fn return_url(&self) -> String {
        format!("{}{}", self.return_base_url, checkout_core::api::COMPLETE_PAYMENT_PATH)
    }

    /// Redirect after the buyer cancels
    pub fn cancel_url(&self) -> String {
        format!("{}{}", self.return_base_url, checkout_core::api::CANCEL_PAYMENT_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = PayPalConfig::from_lookup(lookup(&[
            ("PAYPAL_CLIENT_ID", "client"),
            ("PAYPAL_CLIENT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, SANDBOX_BASE_URL);
        assert_eq!(config.client_secret.expose_secret(), "secret");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(!config.cache_tokens);
        assert_eq!(config.item.price, dec!(10.00));
        assert_eq!(config.return_url(), "http://localhost:3000/complete-payment");
    }

    #[test]
    fn test_overrides() {
        let config = PayPalConfig::from_lookup(lookup(&[
            ("PAYPAL_CLIENT_ID", "client"),
            ("PAYPAL_CLIENT_SECRET", "secret"),
            ("PAYPAL_BASEURL", "https://api-m.paypal.com/"),
            ("BASE_URL", "https://shop.example.com/"),
            ("PAYPAL_REQUEST_TIMEOUT_SECS", "5"),
            ("PAYPAL_TOKEN_CACHE", "true"),
            ("CHECKOUT_ITEM_PRICE", "19.99"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "https://api-m.paypal.com");
        assert_eq!(config.cancel_url(), "https://shop.example.com/cancel-payment");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert!(config.cache_tokens);
        assert_eq!(config.item.price, dec!(19.99));
    }

    #[test]
    fn test_missing_credentials() {
        let err = PayPalConfig::from_lookup(lookup(&[("PAYPAL_CLIENT_ID", "client")])).unwrap_err();
        assert!(matches!(err, PaymentError::Config(msg) if msg.contains("PAYPAL_CLIENT_SECRET")));
    }

    #[test]
    fn test_rejects_bad_price() {
        let result = PayPalConfig::from_lookup(lookup(&[
            ("PAYPAL_CLIENT_ID", "client"),
            ("PAYPAL_CLIENT_SECRET", "secret"),
            ("CHECKOUT_ITEM_PRICE", "-1"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = PayPalConfig::new(SANDBOX_BASE_URL, "client", "hunter2");
        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
