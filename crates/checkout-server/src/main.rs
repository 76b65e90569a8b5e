//! PayPal checkout order service
//!
//! Axum server exposing order creation and capture, and hosting the
//! compiled web client.

mod config;
mod handlers;
mod routes;
mod state;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use checkout_payments::{CheckoutService, OrderRequest, PayPalClient};

use crate::config::AppConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (reads .env first so RUST_LOG can live there too)
    let config = AppConfig::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        base_url = %config.paypal.base_url,
        token_cache = config.paypal.cache_tokens,
        timeout_secs = config.paypal.request_timeout.as_secs(),
        "PayPal configured"
    );

    // Build the order service
    let order = OrderRequest::single_item(&config.paypal);
    let client = PayPalClient::new(config.paypal)?;
    let state = AppState::new(CheckoutService::new(Arc::new(client), order));

    let static_dir = config.server.static_dir.is_dir().then_some(config.server.static_dir.as_path());
    if static_dir.is_none() {
        tracing::warn!(
            dir = %config.server.static_dir.display(),
            "Static directory missing - web client not served"
        );
    }

    let app = routes::router(state, static_dir);

    // Start server
    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server is running on http://{}", addr);
    tracing::info!("  POST /paypal/createorder              - Create order");
    tracing::info!("  POST /paypal/capturepayment/:orderID  - Capture order");
    tracing::info!("  GET  /health                          - Health check");

    axum::serve(listener, app).await?;

    Ok(())
}
