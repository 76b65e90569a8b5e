//! HTTP Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

use checkout_core::{CaptureResponse, CreateOrderResponse, ErrorResponse};
use checkout_payments::{CaptureOutcome, PaymentError};

use crate::state::AppState;

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ErrorResponse>);

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub provider: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        provider: state.checkout.provider_name().to_string(),
    })
}

/// Create a provider order for the fixed item
pub async fn create_order(
    State(state): State<AppState>,
) -> Result<Json<CreateOrderResponse>, ApiError> {
    let order = state.checkout.create_order().await.map_err(|e| {
        tracing::error!(error = %e, "Create order failed");
        payment_error(&e)
    })?;

    Ok(Json(CreateOrderResponse { order: order.raw }))
}

/// Capture an approved order and derive the session update
pub async fn capture_payment(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<CaptureResponse>, ApiError> {
    let outcome = state
        .checkout
        .capture_order(&order_id, chrono::Utc::now())
        .await
        .map_err(|e| {
            tracing::error!(order_id = %order_id, error = %e, "Capture failed");
            payment_error(&e)
        })?;

    match outcome {
        CaptureOutcome::Completed { session, capture } => Ok(Json(CaptureResponse {
            message: "Payment captured successfully".into(),
            user: session,
            capture: capture.raw,
        })),
        CaptureOutcome::NotCompleted { capture } => Err((
            StatusCode::BAD_REQUEST,
            Json(
                ErrorResponse::new(
                    format!("Payment not completed: {}", capture.status.as_str()),
                    "CAPTURE_NOT_COMPLETED",
                )
                .with_details(capture.raw),
            ),
        )),
    }
}

/// Relay the provider status where known, else 500
fn payment_error(err: &PaymentError) -> ApiError {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    // informational and redirect statuses from the provider are not relayed
    let status = if status.is_client_error() || status.is_server_error() {
        status
    } else {
        StatusCode::BAD_GATEWAY
    };

    let mut body = ErrorResponse::new(err.user_message(), err.code());
    if let Some(details) = err.details() {
        body = body.with_details(details);
    }

    (status, Json(body))
}
