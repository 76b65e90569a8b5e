//! PayPal REST Client
//!
//! Implementation of `PaymentProvider` against the PayPal Orders v2 API.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use serde_json::Value;

use crate::capture::CaptureResult;
use crate::config::PayPalConfig;
use crate::error::{PaymentError, Result};
use crate::order::{CreatedOrder, OrderRequest};
use crate::provider::PaymentProvider;
use crate::token::{AccessToken, TokenCache, TokenResponse, credential_key};

/// PayPal client
pub struct PayPalClient {
    http: Client,
    config: PayPalConfig,
    /// Present only when token caching is enabled
    tokens: Option<TokenCache>,
    cache_key: String,
}

impl PayPalClient {
    /// Create a new PayPal client
    pub fn new(config: PayPalConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| PaymentError::Config(format!("HTTP client: {e}")))?;

        let tokens = config.cache_tokens.then(TokenCache::new);
        let cache_key = credential_key(&config.client_id, &config.client_secret);

        Ok(Self {
            http,
            config,
            tokens,
            cache_key,
        })
    }

    pub const fn config(&self) -> &PayPalConfig {
        &self.config
    }

    /// Exchange client credentials for a fresh bearer token
    pub async fn fetch_token(&self) -> Result<AccessToken> {
        let url = format!("{}/v1/oauth2/token", self.config.base_url);

        let response = self
            .http
            .post(&url)
            .basic_auth(
                &self.config.client_id,
                Some(self.config.client_secret.expose_secret()),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| token_transport_error(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| token_transport_error(&e))?;

        if !status.is_success() {
            tracing::warn!(http.status = status.as_u16(), "PayPal rejected client credentials");
            return Err(PaymentError::Token {
                status: Some(status.as_u16()),
                details: Some(parse_body(&body)),
            });
        }

        let token: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(error = %e, "Malformed PayPal token response");
            PaymentError::Token {
                status: None,
                details: Some(Value::String(format!("malformed token response: {e}"))),
            }
        })?;

        tracing::debug!(expires_in = ?token.expires_in, "Fetched PayPal access token");
        Ok(AccessToken::from_response(token))
    }

    /// Cached token when enabled and fresh, else a fresh fetch.
    ///
    /// The flag reports whether the token came from the cache.
    async fn token(&self) -> Result<(AccessToken, bool)> {
        if let Some(cache) = &self.tokens {
            if let Some(token) = cache.get(&self.cache_key).await {
                return Ok((token, true));
            }
            let token = self.fetch_token().await?;
            cache.put(&self.cache_key, token.clone()).await;
            return Ok((token, false));
        }
        Ok((self.fetch_token().await?, false))
    }

    /// Send an authorized request; a cached token the provider rejects is
    /// replaced by a fresh one and the request repeated once.
    async fn send_authorized<F>(&self, build: F) -> Result<Value>
    where
        F: Fn(&str) -> RequestBuilder + Send + Sync,
    {
        let (token, cached) = self.token().await?;
        let mut response = build(token.bearer())
            .send()
            .await
            .map_err(|e| PaymentError::from_reqwest(&e))?;

        if cached && response.status() == StatusCode::UNAUTHORIZED {
            tracing::info!("Cached PayPal token rejected, fetching a new one");
            if let Some(cache) = &self.tokens {
                cache.invalidate(&self.cache_key).await;
            }
            let token = self.fetch_token().await?;
            if let Some(cache) = &self.tokens {
                cache.put(&self.cache_key, token.clone()).await;
            }
            response = build(token.bearer())
                .send()
                .await
                .map_err(|e| PaymentError::from_reqwest(&e))?;
        }

        read_json(response).await
    }
}

#[async_trait]
impl PaymentProvider for PayPalClient {
    async fn create_order(&self, request: &OrderRequest) -> Result<CreatedOrder> {
        let url = format!("{}/v2/checkout/orders", self.config.base_url);

        let raw = self
            .send_authorized(|token| self.http.post(&url).bearer_auth(token).json(request))
            .await?;
        let order = CreatedOrder::from_raw(raw)?;

        tracing::info!(order_id = %order.id, status = ?order.status, "PayPal order created");
        Ok(order)
    }

    async fn capture_order(&self, order_id: &str) -> Result<CaptureResult> {
        let url = format!(
            "{}/v2/checkout/orders/{}/capture",
            self.config.base_url,
            urlencoding::encode(order_id)
        );

        let raw = self
            .send_authorized(|token| {
                self.http
                    .post(&url)
                    .bearer_auth(token)
                    .header(CONTENT_TYPE, "application/json")
            })
            .await?;
        let capture = CaptureResult::from_raw(raw);

        tracing::info!(
            order_id = %order_id,
            status = %capture.status.as_str(),
            "PayPal capture returned"
        );
        Ok(capture)
    }

    fn name(&self) -> &str {
        "PayPal"
    }
}

/// Decode a provider response, turning non-success statuses into errors
async fn read_json(response: Response) -> Result<Value> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| PaymentError::from_reqwest(&e))?;

    tracing::debug!(http.status = status.as_u16(), "PayPal response");

    if status.is_success() {
        return serde_json::from_str(&body).map_err(|e| PaymentError::Decode(e.to_string()));
    }

    let details = parse_body(&body);
    let message = details
        .get("message")
        .or_else(|| details.get("error_description"))
        .and_then(Value::as_str)
        .map_or_else(
            || {
                status
                    .canonical_reason()
                    .unwrap_or("PayPal request failed")
                    .to_string()
            },
            str::to_owned,
        );

    tracing::warn!(http.status = status.as_u16(), message = %message, "PayPal request failed");

    Err(PaymentError::Provider {
        status: status.as_u16(),
        message,
        details: Some(details),
    })
}

/// Token call failed before a usable body arrived
fn token_transport_error(err: &reqwest::Error) -> PaymentError {
    tracing::error!(error = %err, "PayPal token request failed");
    if err.is_timeout() {
        PaymentError::Timeout
    } else {
        PaymentError::Token {
            status: None,
            details: Some(Value::String(err.to_string())),
        }
    }
}

/// JSON body when it parses, else the raw text
fn parse_body(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}
