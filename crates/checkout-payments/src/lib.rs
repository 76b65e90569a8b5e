//! # checkout-payments
//!
//! PayPal order creation and capture for the checkout service.
//!
//! ## Call Chain
//!
//! Every operation is two sequential provider calls:
//!
//! ```text
//! create:   POST /v1/oauth2/token  ──▶  POST /v2/checkout/orders
//! capture:  POST /v1/oauth2/token  ──▶  POST /v2/checkout/orders/{id}/capture
//! ```
//!
//! Tokens are fetched fresh per operation unless `PayPalConfig::cache_tokens`
//! is set, in which case a rejected cached token falls back to a fresh fetch.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use checkout_payments::{CheckoutService, OrderRequest, PayPalClient, PayPalConfig};
//!
//! let config = PayPalConfig::from_lookup(|key| std::env::var(key).ok())?;
//! let order = OrderRequest::single_item(&config);
//! let service = CheckoutService::new(Arc::new(PayPalClient::new(config)?), order);
//!
//! let created = service.create_order().await?;
//! // buyer approves `created.id` in the hosted widget
//! let outcome = service.capture_order(&created.id, chrono::Utc::now()).await?;
//! ```

mod capture;
mod config;
mod error;
mod order;
mod paypal;
mod provider;
mod service;
mod token;

pub use capture::{CaptureResult, CaptureStatus};
pub use config::{CatalogItem, PayPalConfig, SANDBOX_BASE_URL};
pub use error::{PaymentError, Result};
pub use order::{CreatedOrder, Money, OrderRequest, CURRENCY};
pub use paypal::PayPalClient;
pub use provider::PaymentProvider;
pub use service::{CaptureOutcome, CheckoutService};
pub use token::{AccessToken, TokenCache};
