//! Checkout Flow
//!
//! Client-side order lifecycle driven by the payment widget's callbacks.
//!
//! ```text
//! Idle ──create──▶ Created ──approve──▶ Captured   (→ /complete-payment)
//!   │                 │
//!   └──── failure ────┴──── failure ──▶ Cancelled  (→ /cancel-payment)
//! ```
//!
//! Each attempt is single-shot: `Captured` and `Cancelled` are terminal.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::api::{
    CANCEL_PAYMENT_PATH, COMPLETE_PAYMENT_PATH, CaptureResponse, CreateOrderResponse,
};
use crate::error::{FlowError, Result};
use crate::session::SessionUpdate;

/// Calls the checkout client makes against the order service.
///
/// Futures are `?Send` so browser fetch implementations fit; dropping a
/// pending future abandons the call.
#[async_trait(?Send)]
pub trait OrderApi {
    /// `POST /paypal/createorder`
    async fn create_order(&self) -> Result<CreateOrderResponse>;

    /// `POST /paypal/capturepayment/:orderID`
    async fn capture_order(&self, order_id: &str) -> Result<CaptureResponse>;
}

/// Where the browser goes once the flow ends
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Destination {
    Complete,
    Cancel,
}

impl Destination {
    pub const fn path(self) -> &'static str {
        match self {
            Self::Complete => COMPLETE_PAYMENT_PATH,
            Self::Cancel => CANCEL_PAYMENT_PATH,
        }
    }
}

/// Checkout lifecycle state
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CheckoutState {
    #[default]
    Idle,
    Created {
        order_id: String,
    },
    Captured {
        session: SessionUpdate,
    },
    Cancelled {
        reason: String,
    },
}

impl CheckoutState {
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Captured { .. } | Self::Cancelled { .. })
    }

    /// Navigation target for terminal states
    pub const fn destination(&self) -> Option<Destination> {
        match self {
            Self::Captured { .. } => Some(Destination::Complete),
            Self::Cancelled { .. } => Some(Destination::Cancel),
            _ => None,
        }
    }

    const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Created { .. } => "created",
            Self::Captured { .. } => "captured",
            Self::Cancelled { .. } => "cancelled",
        }
    }
}

/// One checkout attempt
pub struct CheckoutFlow<A> {
    api: A,
    state: Mutex<CheckoutState>,
}

impl<A: OrderApi> CheckoutFlow<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: Mutex::new(CheckoutState::Idle),
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> CheckoutState {
        self.lock().clone()
    }

    /// Widget `createOrder` callback.
    ///
    /// Returns the order id for the widget, or the error it should display.
    pub async fn create(&self) -> Result<String> {
        {
            let state = self.lock();
            if *state != CheckoutState::Idle {
                return Err(FlowError::InvalidState(state.name()));
            }
        }

        let outcome = match self.api.create_order().await {
            Ok(body) => body
                .order_id()
                .map(str::to_owned)
                .ok_or(FlowError::MissingOrderId),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(order_id) => {
                tracing::info!(order_id = %order_id, "Order created");
                self.set(CheckoutState::Created {
                    order_id: order_id.clone(),
                });
                Ok(order_id)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error creating order");
                self.set(CheckoutState::Cancelled {
                    reason: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Widget `onApprove` callback; `order_id` is the id the widget reports.
    pub async fn approve(&self, order_id: Option<&str>) -> Destination {
        {
            let mut state = self.lock();
            if let Some(destination) = state.destination() {
                return destination;
            }
            if *state == CheckoutState::Idle {
                *state = CheckoutState::Cancelled {
                    reason: "approval received before an order was created".into(),
                };
                return Destination::Cancel;
            }
        }

        let Some(order_id) = order_id.filter(|id| !id.is_empty()) else {
            tracing::error!("Order ID not found in approval data");
            self.set(CheckoutState::Cancelled {
                reason: "Order ID not found from PayPal data".into(),
            });
            return Destination::Cancel;
        };

        match self.api.capture_order(order_id).await {
            Ok(body) => {
                tracing::info!(order_id = %order_id, tier = %body.user.tier, "Payment captured");
                self.set(CheckoutState::Captured { session: body.user });
                Destination::Complete
            }
            Err(e) => {
                tracing::error!(order_id = %order_id, error = %e, "Error capturing order");
                self.set(CheckoutState::Cancelled {
                    reason: e.to_string(),
                });
                Destination::Cancel
            }
        }
    }

    /// Widget `onError` callback
    pub fn fail(&self, reason: impl Into<String>) -> Destination {
        let mut state = self.lock();
        if let Some(destination) = state.destination() {
            return destination;
        }
        let reason = reason.into();
        tracing::error!(reason = %reason, "Payment widget reported an error");
        *state = CheckoutState::Cancelled { reason };
        Destination::Cancel
    }

    fn set(&self, next: CheckoutState) {
        let mut state = self.lock();
        // a concurrent fail() may already have ended the attempt
        if !state.is_terminal() {
            *state = next;
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CheckoutState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
